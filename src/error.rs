use crate::providers::ProviderKind;

#[derive(thiserror::Error)]
pub enum NotificationError {
    #[error("Unknown provider short name \"{0}\"")]
    UnknownProvider(String),
    #[error("No provider is registered for {0} notifications")]
    NoRegisteredProvider(ProviderKind),
    #[error(
        "Wrong notification kind provided. Waiting for \"{expected}\", got \"{got}\" for provider \"{provider}\""
    )]
    WrongImplementation {
        expected: ProviderKind,
        got: ProviderKind,
        provider: &'static str,
    },
    #[error("{0}")]
    MissingConfiguration(String),
    #[error("{0}")]
    UnavailableForTest(String),
    #[error("{0}")]
    Validation(String),
    #[error("Failed to hand the notification to the delivery service: {0:#}")]
    Delivery(#[from] anyhow::Error),
    #[error("Failed to enqueue the notification: {0}")]
    Queue(String),
}

impl NotificationError {
    /// Short label used as the bracketed prefix in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            NotificationError::UnknownProvider(_) => "UnknownProvider",
            NotificationError::NoRegisteredProvider(_) => "NoRegisteredProvider",
            NotificationError::WrongImplementation { .. } => "WrongImplementation",
            NotificationError::MissingConfiguration(_) => "MissingConfiguration",
            NotificationError::UnavailableForTest(_) => "UnavailableForTest",
            NotificationError::Validation(_) => "Validation",
            NotificationError::Delivery(_) => "Delivery",
            NotificationError::Queue(_) => "Queue",
        }
    }
}

impl std::fmt::Debug for NotificationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}
