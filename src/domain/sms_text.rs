use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone)]
pub struct SmsText(String);

const MAX_GRAPHEMES: usize = 1000;

impl SmsText {
    pub fn parse(s: String) -> Result<SmsText, String> {
        if s.trim().is_empty() {
            return Err("The message text is required.".to_string());
        }
        if s.graphemes(true).count() > MAX_GRAPHEMES {
            return Err(format!(
                "The message text must not be longer than {} characters.",
                MAX_GRAPHEMES
            ));
        }
        Ok(Self(s))
    }
}

impl AsRef<str> for SmsText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
