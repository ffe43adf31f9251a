use super::validation_error;
use crate::domain::{PhoneNumber, SmsText};
use crate::error::NotificationError;

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SmsMessage {
    pub recipient: String,
    pub message: String,
}

#[derive(Debug)]
pub struct ValidSmsMessage {
    pub recipient: PhoneNumber,
    pub text: SmsText,
}

impl SmsMessage {
    pub fn new(recipient: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            message: message.into(),
        }
    }

    pub fn validate(&self) -> Result<(), NotificationError> {
        self.validated().map(|_| ())
    }

    pub fn validated(&self) -> Result<ValidSmsMessage, NotificationError> {
        let recipient = PhoneNumber::parse(self.recipient.clone());
        let text = SmsText::parse(self.message.clone());

        match (recipient, text) {
            (Ok(recipient), Ok(text)) => Ok(ValidSmsMessage { recipient, text }),
            (recipient, text) => Err(validation_error(
                "SmsMessage",
                [recipient.err(), text.err()].into_iter().flatten(),
            )),
        }
    }
}
