use crate::configuration::SmsSettings;
use crate::domain::{PhoneNumber, SmsText};
use crate::sms::{GatewayError, GatewayReply, MessageReceipt, SmsGateway};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};

/// HTTP client for the SMSPilot JSON API.
pub struct SmsPilotClient {
    http_client: Client,
    base_url: String,
    api_key: Secret<String>,
    sender: Option<String>,
}

#[derive(serde::Serialize)]
struct SendRequest<'a> {
    apikey: &'a str,
    send: Vec<OutgoingMessage<'a>>,
}

#[derive(serde::Serialize)]
struct OutgoingMessage<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    from: Option<&'a str>,
    to: &'a str,
    text: &'a str,
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum SendResponse {
    Rejected { error: GatewayError },
    Accepted { send: Vec<MessageReceipt> },
}

impl SmsPilotClient {
    pub fn new(
        base_url: String,
        api_key: Secret<String>,
        sender: Option<String>,
        timeout: std::time::Duration,
    ) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url,
            api_key,
            sender,
        })
    }

    pub fn from_settings(settings: &SmsSettings) -> Result<Self, reqwest::Error> {
        Self::new(
            settings.base_url.clone(),
            Secret::new(settings.api_key.expose_secret().clone()),
            settings.sender.clone(),
            settings.timeout(),
        )
    }
}

#[async_trait]
impl SmsGateway for SmsPilotClient {
    #[tracing::instrument(name = "Submit SMS to SMSPilot", skip(self, text))]
    async fn send(
        &self,
        recipients: &[PhoneNumber],
        text: &SmsText,
    ) -> Result<GatewayReply, anyhow::Error> {
        let body = SendRequest {
            apikey: self.api_key.expose_secret(),
            send: recipients
                .iter()
                .map(|recipient| OutgoingMessage {
                    from: self.sender.as_deref(),
                    to: recipient.as_ref(),
                    text: text.as_ref(),
                })
                .collect(),
        };

        let response = self
            .http_client
            .post(&self.base_url)
            .json(&body)
            .send()
            .await
            .context("Failed to reach SMSPilot.")?
            .error_for_status()
            .context("SMSPilot answered with an error status.")?;
        let reply: SendResponse = response
            .json()
            .await
            .context("Failed to parse the SMSPilot response.")?;

        Ok(match reply {
            SendResponse::Rejected { error } => GatewayReply::Rejected(error),
            SendResponse::Accepted { send } => GatewayReply::Accepted(send),
        })
    }
}
