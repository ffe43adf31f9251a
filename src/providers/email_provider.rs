use super::{wrong_implementation, NotificationProvider, ProviderKind};
use crate::email::Mailer;
use crate::error::NotificationError;
use crate::messages::{Notification, SendStatus};
use anyhow::Context;
use async_trait::async_trait;
use std::sync::Arc;

/// Delivers [`EmailMessage`](crate::messages::EmailMessage)s through the host
/// mail service.
pub struct EmailProvider {
    mailer: Arc<dyn Mailer>,
}

impl EmailProvider {
    pub fn new(mailer: Arc<dyn Mailer>) -> Self {
        Self { mailer }
    }
}

#[async_trait]
impl NotificationProvider for EmailProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Email
    }

    #[tracing::instrument(name = "Send email notification", skip(self, notification))]
    async fn send(&self, notification: &Notification) -> Result<SendStatus, NotificationError> {
        let message = match notification {
            Notification::Email(message) => message.validated()?,
            other => {
                return Err(wrong_implementation(
                    ProviderKind::Email,
                    other,
                    "EmailProvider",
                ))
            }
        };

        self.mailer
            .send_templated(
                &message.recipient,
                &message.template,
                message.context,
                message.subject,
            )
            .await
            .with_context(|| format!("Failed to send email to {}", message.recipient))?;

        Ok(SendStatus::ok("Message sent successfully"))
    }
}
