use tokio::sync::broadcast;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationEvent {
    /// The SMS gateway refused to send on our behalf.
    SmsBlockedByService { recipient: String, error: String },
}

pub trait EventSink: Send + Sync {
    fn dispatch(&self, event: NotificationEvent);
}

pub struct BroadcastEventSink {
    sender: broadcast::Sender<NotificationEvent>,
}

impl BroadcastEventSink {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<NotificationEvent> {
        self.sender.subscribe()
    }
}

impl EventSink for BroadcastEventSink {
    fn dispatch(&self, event: NotificationEvent) {
        match &event {
            NotificationEvent::SmsBlockedByService { recipient, error } => {
                tracing::warn!(%recipient, %error, "SMS gateway blocked the sender");
            }
        }
        // An error here only means there are no subscribers right now.
        let _ = self.sender.send(event);
    }
}
