use crate::error::{error_chain_fmt, NotificationError};
use crate::guards::AuthorizedClient;
use crate::manager::NotificationManager;
use crate::messages::{Notification, SendStatus};
use rocket::http::Status;
use rocket::response::{status, Responder};
use rocket::serde::json::Json;
use rocket::{Request, State};
use uuid::Uuid;

#[derive(serde::Serialize)]
pub struct QueuedJob {
    job_id: Uuid,
}

#[derive(Responder)]
pub enum Dispatched {
    Sent(Json<SendStatus>),
    Queued(status::Accepted<Json<QueuedJob>>),
}

#[tracing::instrument(
    name = "Dispatch a notification",
    skip(notification, manager, client),
    fields(
        request_id = %Uuid::new_v4(),
        client = %client.username,
        channel = %notification.kind(),
    )
)]
#[post("/notifications?<provider>&<deferred>", data = "<notification>")]
pub async fn dispatch_notification(
    notification: Json<Notification>,
    provider: Option<&str>,
    deferred: Option<bool>,
    manager: &State<NotificationManager>,
    client: AuthorizedClient,
) -> Result<Dispatched, DispatchError> {
    let manager = match provider {
        Some(name) => manager.inner().clone().with_provider_by_name(name)?,
        None => manager.inner().clone(),
    };

    if deferred.unwrap_or(false) {
        let job_id = manager
            .send_deferred(&notification)
            .await
            .ok_or(DispatchError::NotQueued)?;
        Ok(Dispatched::Queued(status::Accepted(Json(QueuedJob { job_id }))))
    } else {
        let status = manager.send(&notification).await;
        Ok(Dispatched::Sent(Json(status)))
    }
}

#[derive(thiserror::Error)]
pub enum DispatchError {
    #[error(transparent)]
    InvalidProvider(#[from] NotificationError),
    #[error("The notification was rejected and not queued.")]
    NotQueued,
}

impl std::fmt::Debug for DispatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl<'r> Responder<'r, 'static> for DispatchError {
    fn respond_to(self, request: &'r Request<'_>) -> rocket::response::Result<'static> {
        tracing::warn!("DispatchError: {:?}", self);
        let body = serde_json::json!({ "error": self.to_string() });
        (Status::BadRequest, Json(body)).respond_to(request)
    }
}
