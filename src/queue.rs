use crate::error::NotificationError;
use crate::manager::NotificationManager;
use crate::messages::Notification;
use crate::providers::ProviderKind;
use async_trait::async_trait;
use tokio::sync::mpsc;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SendNotificationJob {
    pub id: Uuid,
    pub provider: ProviderKind,
    pub notification: Notification,
}

impl SendNotificationJob {
    pub fn new(provider: ProviderKind, notification: Notification) -> Self {
        Self {
            id: Uuid::new_v4(),
            provider,
            notification,
        }
    }
}

#[async_trait]
pub trait JobQueue: Send + Sync {
    async fn push(&self, job: SendNotificationJob) -> Result<(), NotificationError>;
}

pub struct InProcessQueue {
    sender: mpsc::UnboundedSender<SendNotificationJob>,
}

pub type JobReceiver = mpsc::UnboundedReceiver<SendNotificationJob>;

pub fn in_process_queue() -> (InProcessQueue, JobReceiver) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (InProcessQueue { sender }, receiver)
}

#[async_trait]
impl JobQueue for InProcessQueue {
    async fn push(&self, job: SendNotificationJob) -> Result<(), NotificationError> {
        self.sender
            .send(job)
            .map_err(|e| NotificationError::Queue(format!("worker is gone, job {} dropped", e.0.id)))
    }
}

/// Sends queued jobs one after another until every queue handle is dropped.
pub async fn run_worker(mut receiver: JobReceiver, manager: NotificationManager) {
    while let Some(job) = receiver.recv().await {
        process_job(&manager, job).await;
    }
    tracing::info!("Notification queue closed, worker is stopping");
}

#[tracing::instrument(name = "Process queued notification", skip(manager, job), fields(job_id = %job.id))]
async fn process_job(manager: &NotificationManager, job: SendNotificationJob) {
    manager
        .clone()
        .with_provider(job.provider)
        .send(&job.notification)
        .await;
}
