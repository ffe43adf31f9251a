mod delivery_status;
mod smspilot_client;

use crate::domain::{PhoneNumber, SmsText};
use async_trait::async_trait;
use serde_aux::field_attributes::{deserialize_number_from_string, deserialize_string_from_number};
pub use delivery_status::{describe_status, BLOCKED_BY_SERVICE};
pub use smspilot_client::SmsPilotClient;

/// Third-party gateway that accepts text messages for delivery.
#[async_trait]
pub trait SmsGateway: Send + Sync {
    /// Submits `text` to every number in `recipients`.
    ///
    /// `Ok` carries whatever the gateway answered, including refusals;
    /// `Err` is reserved for transport-level failures.
    async fn send(
        &self,
        recipients: &[PhoneNumber],
        text: &SmsText,
    ) -> Result<GatewayReply, anyhow::Error>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum GatewayReply {
    Accepted(Vec<MessageReceipt>),
    Rejected(GatewayError),
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct MessageReceipt {
    #[serde(
        rename = "server_id",
        deserialize_with = "deserialize_string_from_number"
    )]
    pub id: String,
    #[serde(deserialize_with = "deserialize_string_from_number")]
    pub phone: String,
    #[serde(deserialize_with = "deserialize_string_from_number")]
    pub price: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub status: i32,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct GatewayError {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub code: u32,
    #[serde(default)]
    pub description: String,
}

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.description.is_empty() {
            write!(f, "{}", self.code)
        } else {
            write!(f, "{} - {}", self.code, self.description)
        }
    }
}
