use super::{wrong_implementation, NotificationProvider, ProviderKind};
use crate::configuration::SmsSettings;
use crate::error::NotificationError;
use crate::events::{EventSink, NotificationEvent};
use crate::messages::{Notification, SendStatus, ValidSmsMessage};
use crate::sms::{
    describe_status, GatewayReply, MessageReceipt, SmsGateway, SmsPilotClient,
    BLOCKED_BY_SERVICE,
};
use anyhow::Context;
use async_trait::async_trait;
use chrono::Utc;
use once_cell::sync::OnceCell;
use std::sync::Arc;

/// Delivers [`SmsMessage`](crate::messages::SmsMessage)s through the SMS
/// gateway.
///
/// The gateway is set up on first use, so a misconfigured or debug
/// deployment only fails when an SMS is actually sent.
pub struct SmsProvider {
    settings: Option<SmsSettings>,
    debug: bool,
    gateway: OnceCell<Arc<dyn SmsGateway>>,
    events: Arc<dyn EventSink>,
}

impl SmsProvider {
    pub fn new(settings: SmsSettings, debug: bool, events: Arc<dyn EventSink>) -> Self {
        Self {
            settings: Some(settings),
            debug,
            gateway: OnceCell::new(),
            events,
        }
    }

    /// Uses `gateway` as is, skipping the configuration checks.
    pub fn with_gateway(gateway: Arc<dyn SmsGateway>, events: Arc<dyn EventSink>) -> Self {
        let cell = OnceCell::new();
        let _ = cell.set(gateway);
        Self {
            settings: None,
            debug: false,
            gateway: cell,
            events,
        }
    }

    fn gateway(&self) -> Result<&Arc<dyn SmsGateway>, NotificationError> {
        self.gateway.get_or_try_init(|| self.init_gateway())
    }

    fn init_gateway(&self) -> Result<Arc<dyn SmsGateway>, NotificationError> {
        let settings = self.settings.as_ref().ok_or_else(|| {
            NotificationError::MissingConfiguration("SMS gateway settings are missing".into())
        })?;
        if !settings.active {
            return Err(NotificationError::MissingConfiguration(format!(
                "Config value \"{}\" resolved to FALSE",
                "sms.active"
            )));
        }
        if self.debug {
            return Err(NotificationError::UnavailableForTest(
                "Can not use SMS service with application.debug = true".into(),
            ));
        }
        if !settings.has_api_key() {
            return Err(NotificationError::MissingConfiguration(format!(
                "Empty required config value for \"{}\"",
                "sms.api_key"
            )));
        }
        let client =
            SmsPilotClient::from_settings(settings).context("Failed to build the SMSPilot client")?;
        Ok(Arc::new(client))
    }

    fn handle_reply(&self, reply: GatewayReply, message: &ValidSmsMessage) -> SendStatus {
        match reply {
            GatewayReply::Accepted(receipts) => SendStatus::ok(describe_receipts(&receipts)),
            GatewayReply::Rejected(error) => {
                if error.code == BLOCKED_BY_SERVICE {
                    self.events.dispatch(NotificationEvent::SmsBlockedByService {
                        recipient: message.recipient.to_string(),
                        error: error.to_string(),
                    });
                }
                SendStatus::failed(format!(
                    "Error {} while sending message to {}",
                    error.code, message.recipient
                ))
            }
        }
    }
}

fn describe_receipts(receipts: &[MessageReceipt]) -> String {
    let now = Utc::now().format("%Y-%m-%d %H:%M:%S");
    receipts
        .iter()
        .map(|receipt| {
            format!(
                "{} >>> Message info | id > {} | phone > {} | price > {} | status > {} | status meaning > {} |",
                now,
                receipt.id,
                receipt.phone,
                receipt.price,
                receipt.status,
                describe_status(receipt.status)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[async_trait]
impl NotificationProvider for SmsProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Sms
    }

    #[tracing::instrument(name = "Send SMS notification", skip(self, notification))]
    async fn send(&self, notification: &Notification) -> Result<SendStatus, NotificationError> {
        let message = match notification {
            Notification::Sms(message) => message.validated()?,
            other => {
                return Err(wrong_implementation(
                    ProviderKind::Sms,
                    other,
                    "SmsProvider",
                ))
            }
        };

        let gateway = self.gateway()?;
        let reply = gateway
            .send(std::slice::from_ref(&message.recipient), &message.text)
            .await
            .with_context(|| format!("Failed to send SMS to {}", message.recipient))?;

        Ok(self.handle_reply(reply, &message))
    }
}
