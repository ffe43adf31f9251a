use crate::configuration::EmailClientSettings;
use crate::domain::{RecipientEmail, TemplateName};
use crate::email::Mailer;
use crate::messages::TemplateContext;
use anyhow::Context;
use async_trait::async_trait;
use aws_sdk_sesv2 as ses;
use aws_sdk_sesv2::model::{Destination, EmailContent, Template};
use std::time::Duration;

/// Sends templated emails through Amazon SES.
///
/// Templates live in SES. The optional subject is exposed to the template as
/// the `subject` variable, next to the caller's context.
pub struct SesEmailClient {
    ses_client: ses::Client,
    sender: RecipientEmail,
    timeout: Duration,
}

impl SesEmailClient {
    pub fn new(ses_client: ses::Client, sender: RecipientEmail, timeout: Duration) -> Self {
        Self {
            ses_client,
            sender,
            timeout,
        }
    }

    pub async fn from_settings(settings: &EmailClientSettings) -> Result<Self, anyhow::Error> {
        let sender = settings
            .sender()
            .map_err(|e| anyhow::anyhow!(e))
            .context("Invalid sender email address.")?;
        let shared_config = aws_config::load_from_env().await;
        let ses_client = ses::Client::new(&shared_config);
        Ok(Self::new(ses_client, sender, settings.timeout()))
    }
}

fn template_data(
    context: &TemplateContext,
    subject: Option<&str>,
) -> Result<String, serde_json::Error> {
    let mut data = context.clone();
    if let Some(subject) = subject {
        data.insert("subject".into(), serde_json::Value::from(subject));
    }
    serde_json::to_string(&data)
}

#[async_trait]
impl Mailer for SesEmailClient {
    #[tracing::instrument(
        name = "Send templated email via SES",
        skip(self, context, subject),
        fields(recipient = %recipient, template = %template.as_ref())
    )]
    async fn send_templated(
        &self,
        recipient: &RecipientEmail,
        template: &TemplateName,
        context: &TemplateContext,
        subject: Option<&str>,
    ) -> anyhow::Result<()> {
        let template_data =
            template_data(context, subject).context("Failed to serialize template context.")?;
        let template = Template::builder()
            .template_name(template.as_ref())
            .template_data(template_data)
            .build();
        let content = EmailContent::builder().template(template).build();
        let destination = Destination::builder()
            .to_addresses(recipient.as_ref())
            .build();

        let request = self
            .ses_client
            .send_email()
            .from_email_address(self.sender.as_ref())
            .destination(destination)
            .content(content)
            .send();
        tokio::time::timeout(self.timeout, request)
            .await
            .context("SES did not answer in time.")?
            .context("SES rejected the email.")?;
        Ok(())
    }
}
