use crate::error::NotificationError;
use crate::messages::{Notification, SendStatus};
use crate::providers::{NotificationProvider, ProviderKind, ProviderRegistry};
use crate::queue::{JobQueue, SendNotificationJob};
use std::sync::Arc;
use uuid::Uuid;

/// Entry point for sending notifications.
///
/// Picks a provider, either the one chosen explicitly or the one matching the
/// notification, validates the payload and hands it over, immediately or
/// through the job queue. Failures never escape: they are logged and
/// reported through the returned status.
#[derive(Clone)]
pub struct NotificationManager {
    registry: Arc<ProviderRegistry>,
    provider: Option<ProviderKind>,
    queue: Option<Arc<dyn JobQueue>>,
}

impl NotificationManager {
    pub fn new(registry: ProviderRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            provider: None,
            queue: None,
        }
    }

    pub fn with_queue(mut self, queue: Arc<dyn JobQueue>) -> Self {
        self.queue = Some(queue);
        self
    }

    pub fn with_provider(mut self, provider: ProviderKind) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn with_provider_by_name(self, short_name: &str) -> Result<Self, NotificationError> {
        let provider = ProviderKind::from_short_name(short_name)?;
        Ok(self.with_provider(provider))
    }

    /// The explicitly chosen provider, if any.
    pub fn provider(&self) -> Option<ProviderKind> {
        self.provider
    }

    #[tracing::instrument(
        name = "Send notification",
        skip(self, notification),
        fields(recipient = %notification.recipient())
    )]
    pub async fn send(&self, notification: &Notification) -> SendStatus {
        match self.try_send(notification).await {
            Ok(status) => status,
            Err(e) => {
                log_failure(&e);
                SendStatus::failed(e.to_string())
            }
        }
    }

    async fn try_send(
        &self,
        notification: &Notification,
    ) -> Result<SendStatus, NotificationError> {
        let (kind, provider) = self.resolve_provider(notification)?;
        notification.validate()?;
        tracing::info!(
            provider = %kind,
            recipient = %notification.recipient(),
            "Starting to send message"
        );

        let status = provider.send(notification).await?;
        if status.success {
            tracing::info!("Sending status: OK");
        } else {
            tracing::error!("Sending status: FAILED. Message: {}", status.message);
        }
        Ok(status)
    }

    /// Queues the notification for a background worker and returns the job id.
    #[tracing::instrument(
        name = "Queue notification",
        skip(self, notification),
        fields(recipient = %notification.recipient())
    )]
    pub async fn send_deferred(&self, notification: &Notification) -> Option<Uuid> {
        match self.try_send_deferred(notification).await {
            Ok(job_id) => Some(job_id),
            Err(e) => {
                log_failure(&e);
                None
            }
        }
    }

    async fn try_send_deferred(
        &self,
        notification: &Notification,
    ) -> Result<Uuid, NotificationError> {
        let (kind, _) = self.resolve_provider(notification)?;
        notification.validate()?;
        let queue = self
            .queue
            .as_ref()
            .ok_or_else(|| NotificationError::Queue("no job queue is configured".into()))?;
        tracing::info!(
            provider = %kind,
            recipient = %notification.recipient(),
            "Pushing message to queue"
        );

        let job = SendNotificationJob::new(kind, notification.clone());
        let job_id = job.id;
        queue.push(job).await?;
        Ok(job_id)
    }

    fn resolve_provider(
        &self,
        notification: &Notification,
    ) -> Result<(ProviderKind, Arc<dyn NotificationProvider>), NotificationError> {
        let kind = self.provider.unwrap_or_else(|| notification.kind());
        Ok((kind, self.registry.get(kind)?))
    }
}

fn log_failure(e: &NotificationError) {
    match e {
        NotificationError::UnavailableForTest(_) => {
            tracing::warn!(error.cause_chain = ?e, "[{}]: {}", e.kind(), e);
        }
        _ => {
            tracing::error!(error.cause_chain = ?e, "[{}]: {}", e.kind(), e);
        }
    }
}
