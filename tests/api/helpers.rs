use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHasher};
use async_trait::async_trait;
use httpmock::MockServer;
use notifications::configuration::get_configuration;
use notifications::domain::{RecipientEmail, TemplateName};
use notifications::email::Mailer;
use notifications::events::NotificationEvent;
use notifications::messages::TemplateContext;
use notifications::startup::Application;
use notifications::telemetry::{get_subscriber, init_subscriber};
use once_cell::sync::Lazy;
use secrecy::Secret;
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;
use uuid::Uuid;

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".into();
    let subscriber_name = "test".into();
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

#[derive(Debug, Clone, PartialEq)]
pub struct SentEmail {
    pub recipient: String,
    pub template: String,
    pub context: TemplateContext,
    pub subject: Option<String>,
}

#[derive(Default)]
pub struct RecordingMailer {
    pub sent_emails: Mutex<Vec<SentEmail>>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send_templated(
        &self,
        recipient: &RecipientEmail,
        template: &TemplateName,
        context: &TemplateContext,
        subject: Option<&str>,
    ) -> anyhow::Result<()> {
        self.sent_emails.lock().unwrap().push(SentEmail {
            recipient: recipient.as_ref().to_string(),
            template: template.as_ref().to_string(),
            context: context.clone(),
            subject: subject.map(str::to_string),
        });
        Ok(())
    }
}

pub struct TestUser {
    pub username: String,
    pub password: String,
}

impl TestUser {
    fn generate() -> Self {
        Self {
            username: "dispatcher".into(),
            password: Uuid::new_v4().to_string(),
        }
    }

    fn password_hash(&self) -> String {
        let salt = SaltString::generate(&mut rand::thread_rng());
        Argon2::default()
            .hash_password(self.password.as_bytes(), &salt)
            .unwrap()
            .to_string()
    }
}

pub struct TestApp {
    pub address: String,
    pub mailer: Arc<RecordingMailer>,
    pub sms_server: MockServer,
    pub events: broadcast::Receiver<NotificationEvent>,
    pub test_user: TestUser,
}

impl TestApp {
    pub async fn post_notification(
        &self,
        body: &serde_json::Value,
        query: &[(&str, &str)],
    ) -> reqwest::Response {
        reqwest::Client::new()
            .post(&format!("{}/notifications", &self.address))
            .query(query)
            .basic_auth(&self.test_user.username, Some(&self.test_user.password))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub fn sent_emails(&self) -> Vec<SentEmail> {
        self.mailer.sent_emails.lock().unwrap().clone()
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(|_| {}).await
}

pub async fn spawn_app_with(
    customize: impl FnOnce(&mut notifications::configuration::Settings),
) -> TestApp {
    Lazy::force(&TRACING);

    let sms_server = MockServer::start_async().await;
    let test_user = TestUser::generate();

    let configuration = {
        let mut c = get_configuration().expect("Failed to read configuration.");
        c.application.port = None;
        c.application.debug = false;
        c.api_client.username = test_user.username.clone();
        c.api_client.password_hash = Secret::new(test_user.password_hash());
        c.sms.active = true;
        c.sms.api_key = Secret::new("XXXXXXXX".into());
        c.sms.base_url = sms_server.url("/api2.php");
        c.sms.timeout_milliseconds = 500;
        customize(&mut c);
        c
    };

    let mailer = Arc::new(RecordingMailer::default());
    let app = Application::build(configuration, mailer.clone())
        .await
        .expect("Failed to build application.");
    let events = app.events.subscribe();
    let port = app.port.clone();
    let _ = tokio::spawn(app.server.launch());

    TestApp {
        address: format!(
            "http://127.0.0.1:{}",
            port.get().await.expect("Server never lifted off.")
        ),
        mailer,
        sms_server,
        events,
        test_user,
    }
}
