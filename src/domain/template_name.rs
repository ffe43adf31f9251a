/// Name of a template stored by the mail service.
///
/// Follows the mail service's naming rule: ASCII letters, digits, `-` and
/// `_`, at most 64 characters.
#[derive(Debug, Clone)]
pub struct TemplateName(String);

const MAX_LENGTH: usize = 64;

impl TemplateName {
    pub fn parse(s: String) -> Result<TemplateName, String> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("The template field is required.".to_string());
        }
        if trimmed.len() > MAX_LENGTH {
            return Err(format!(
                "The template name must not be longer than {} characters.",
                MAX_LENGTH
            ));
        }
        let has_forbidden_characters = trimmed
            .chars()
            .any(|c| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        if has_forbidden_characters {
            return Err(format!("{} is not a valid template name.", trimmed));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl AsRef<str> for TemplateName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
