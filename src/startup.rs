use crate::catchers::*;
use crate::configuration::Settings;
use crate::email::Mailer;
use crate::events::BroadcastEventSink;
use crate::guards::ApiCredentials;
use crate::manager::NotificationManager;
use crate::port_saver::{self, ListenPort};
use crate::providers::{EmailProvider, ProviderRegistry, SmsProvider};
use crate::queue::{in_process_queue, run_worker};
use crate::routes::*;
use rocket::{Config, Ignite, Rocket};
use std::sync::Arc;

const EVENT_CHANNEL_CAPACITY: usize = 64;

pub struct Application {
    pub server: Rocket<Ignite>,
    pub port: ListenPort,
    pub events: Arc<BroadcastEventSink>,
}

impl Application {
    /// Wires providers, manager and queue worker together and ignites the
    /// HTTP server. Must be called from within a Tokio runtime.
    pub async fn build(
        configuration: Settings,
        mailer: Arc<dyn Mailer>,
    ) -> Result<Application, rocket::Error> {
        let Settings {
            application,
            api_client,
            sms,
            ..
        } = configuration;

        let events = Arc::new(BroadcastEventSink::new(EVENT_CHANNEL_CAPACITY));
        let registry = ProviderRegistry::new()
            .register(Arc::new(EmailProvider::new(mailer)))
            .register(Arc::new(SmsProvider::new(
                sms,
                application.debug,
                events.clone(),
            )));
        let manager = NotificationManager::new(registry);

        let (queue, receiver) = in_process_queue();
        tokio::spawn(run_worker(receiver, manager.clone()));
        let manager = manager.with_queue(Arc::new(queue));

        let (port_saver, port) = port_saver::create_pair();
        let server = rocket::custom(Config {
            port: application.port.unwrap_or(0),
            address: application.host,
            ..Config::debug_default()
        })
        .attach(port_saver)
        .manage(manager)
        .manage(ApiCredentials {
            username: api_client.username,
            password_hash: api_client.password_hash,
        })
        .mount("/", routes![health_check, dispatch_notification])
        .register(
            "/",
            catchers![credentials_required, unprocessable_entity_to_bad_request],
        )
        .ignite()
        .await?;

        Ok(Application {
            server,
            port,
            events,
        })
    }

    pub async fn run_until_stopped(self) -> Result<(), rocket::Error> {
        self.server.launch().await.map(|_| ())
    }
}
