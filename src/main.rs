use notifications::configuration::get_configuration;
use notifications::email::SesEmailClient;
use notifications::startup::Application;
use notifications::telemetry::{daily_log_writer, get_subscriber, init_subscriber};
use std::sync::Arc;

#[rocket::main]
async fn main() -> anyhow::Result<()> {
    let configuration = get_configuration()?;

    // Flushes the notification log when main returns.
    let _log_guard = match &configuration.application.log_directory {
        Some(directory) => {
            let (sink, guard) = daily_log_writer(directory)?;
            init_subscriber(get_subscriber("notifications".into(), "info".into(), sink));
            Some(guard)
        }
        None => {
            init_subscriber(get_subscriber(
                "notifications".into(),
                "info".into(),
                std::io::stdout,
            ));
            None
        }
    };

    let mailer = SesEmailClient::from_settings(&configuration.email_client).await?;
    let application = Application::build(configuration, Arc::new(mailer))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to build the application: {}", e))?;
    application
        .run_until_stopped()
        .await
        .map_err(|e| anyhow::anyhow!("The server stopped with an error: {}", e))
}
