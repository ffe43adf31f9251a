/// Recipient number in the digits-only international form the SMS gateway
/// expects, e.g. `79087964781`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber(String);

const MIN_DIGITS: usize = 10;
const MAX_DIGITS: usize = 15;

impl PhoneNumber {
    pub fn parse(s: String) -> Result<PhoneNumber, String> {
        let mut digits = String::with_capacity(s.len());
        for (position, c) in s.trim().chars().enumerate() {
            match c {
                '0'..='9' => digits.push(c),
                '+' if position == 0 => {}
                ' ' | '-' | '(' | ')' => {}
                _ => return Err(format!("{} is not a valid phone number.", s)),
            }
        }
        if digits.len() < MIN_DIGITS || digits.len() > MAX_DIGITS {
            return Err(format!(
                "{} is not a valid phone number: expected {} to {} digits.",
                s, MIN_DIGITS, MAX_DIGITS
            ));
        }
        Ok(Self(digits))
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
