use super::validation_error;
use crate::domain::{RecipientEmail, TemplateName};
use crate::error::NotificationError;

/// Values substituted into the mail service template.
pub type TemplateContext = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EmailMessage {
    pub recipient: String,
    pub template: String,
    #[serde(default)]
    pub context: TemplateContext,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

/// An [`EmailMessage`] whose fields passed validation.
#[derive(Debug)]
pub struct ValidEmailMessage<'a> {
    pub recipient: RecipientEmail,
    pub template: TemplateName,
    pub context: &'a TemplateContext,
    pub subject: Option<&'a str>,
}

impl EmailMessage {
    pub fn new(recipient: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            template: template.into(),
            ..Self::default()
        }
    }

    pub fn with_context(mut self, context: TemplateContext) -> Self {
        self.context = context;
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn validate(&self) -> Result<(), NotificationError> {
        self.validated().map(|_| ())
    }

    pub fn validated(&self) -> Result<ValidEmailMessage<'_>, NotificationError> {
        let template = TemplateName::parse(self.template.clone());
        let recipient = if self.recipient.trim().is_empty() {
            Err("The email field is required.".to_string())
        } else {
            RecipientEmail::parse(self.recipient.clone())
        };

        match (template, recipient) {
            (Ok(template), Ok(recipient)) => Ok(ValidEmailMessage {
                recipient,
                template,
                context: &self.context,
                subject: self.subject.as_deref().filter(|s| !s.trim().is_empty()),
            }),
            (template, recipient) => Err(validation_error(
                "EmailMessage",
                [template.err(), recipient.err()].into_iter().flatten(),
            )),
        }
    }
}
