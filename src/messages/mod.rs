mod email_message;
mod sms_message;
mod status;

pub use email_message::{EmailMessage, TemplateContext, ValidEmailMessage};
pub use sms_message::{SmsMessage, ValidSmsMessage};
pub use status::SendStatus;

use crate::error::NotificationError;
use crate::providers::ProviderKind;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "channel", rename_all = "lowercase")]
pub enum Notification {
    Email(EmailMessage),
    Sms(SmsMessage),
}

impl Notification {
    pub fn kind(&self) -> ProviderKind {
        match self {
            Notification::Email(_) => ProviderKind::Email,
            Notification::Sms(_) => ProviderKind::Sms,
        }
    }

    pub fn recipient(&self) -> &str {
        match self {
            Notification::Email(message) => &message.recipient,
            Notification::Sms(message) => &message.recipient,
        }
    }

    pub fn validate(&self) -> Result<(), NotificationError> {
        match self {
            Notification::Email(message) => message.validate(),
            Notification::Sms(message) => message.validate(),
        }
    }
}

impl From<EmailMessage> for Notification {
    fn from(message: EmailMessage) -> Self {
        Notification::Email(message)
    }
}

impl From<SmsMessage> for Notification {
    fn from(message: SmsMessage) -> Self {
        Notification::Sms(message)
    }
}

/// Joins validation failures into a single error, one bracketed entry per
/// failure.
fn validation_error(
    source: &str,
    errors: impl IntoIterator<Item = String>,
) -> NotificationError {
    let message = errors
        .into_iter()
        .map(|error| format!("[{} validation error]: {}; ", source, error))
        .collect::<String>();
    NotificationError::Validation(message)
}
