mod email_provider;
mod sms_provider;

use crate::error::NotificationError;
use crate::messages::{Notification, SendStatus};
use async_trait::async_trait;
pub use email_provider::EmailProvider;
pub use sms_provider::SmsProvider;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Email,
    Sms,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Email => "email",
            ProviderKind::Sms => "sms",
        }
    }

    pub fn from_short_name(name: &str) -> Result<Self, NotificationError> {
        match name.trim().to_lowercase().as_str() {
            "email" => Ok(Self::Email),
            "sms" => Ok(Self::Sms),
            other => Err(NotificationError::UnknownProvider(other.to_string())),
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[async_trait]
pub trait NotificationProvider: Send + Sync {
    fn kind(&self) -> ProviderKind;

    async fn send(&self, notification: &Notification) -> Result<SendStatus, NotificationError>;
}

impl std::fmt::Debug for dyn NotificationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationProvider")
            .field("kind", &self.kind())
            .finish()
    }
}

#[derive(Default, Clone)]
pub struct ProviderRegistry {
    providers: HashMap<ProviderKind, Arc<dyn NotificationProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, provider: Arc<dyn NotificationProvider>) -> Self {
        self.providers.insert(provider.kind(), provider);
        self
    }

    pub fn get(
        &self,
        kind: ProviderKind,
    ) -> Result<Arc<dyn NotificationProvider>, NotificationError> {
        self.providers
            .get(&kind)
            .cloned()
            .ok_or(NotificationError::NoRegisteredProvider(kind))
    }
}

fn wrong_implementation(
    expected: ProviderKind,
    notification: &Notification,
    provider: &'static str,
) -> NotificationError {
    NotificationError::WrongImplementation {
        expected,
        got: notification.kind(),
        provider,
    }
}
