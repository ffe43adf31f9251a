mod ses_email_client;

use crate::domain::{RecipientEmail, TemplateName};
use crate::messages::TemplateContext;
use async_trait::async_trait;
pub use ses_email_client::SesEmailClient;

/// Host mail service able to render a stored template and send the result.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_templated(
        &self,
        recipient: &RecipientEmail,
        template: &TemplateName,
        context: &TemplateContext,
        subject: Option<&str>,
    ) -> Result<(), anyhow::Error>;
}
