use crate::guards::BasicAuth;
use anyhow::{anyhow, Context};
use argon2::{Argon2, PasswordHash, PasswordVerifier};
use rocket::http::Status;
use rocket::outcome::{try_outcome, IntoOutcome};
use rocket::request::{FromRequest, Outcome};
use rocket::{Request, State};
use secrecy::{ExposeSecret, Secret};

/// Credentials the HTTP API accepts, kept in managed state.
pub struct ApiCredentials {
    pub username: String,
    pub password_hash: Secret<String>,
}

/// A request carrying valid API credentials.
pub struct AuthorizedClient {
    pub username: String,
    // prevents construction outside of this module
    _private: (),
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AuthorizedClient {
    type Error = anyhow::Error;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let credentials = try_outcome!(request
            .guard::<&State<ApiCredentials>>()
            .await
            .map_error(|_| (
                Status::InternalServerError,
                anyhow!("API credentials are not configured.")
            )));
        let basic_auth = try_outcome!(request.guard::<BasicAuth>().await);

        validate_credentials(credentials.inner(), basic_auth)
            .await
            .or_error(Status::Unauthorized)
    }
}

#[tracing::instrument(name = "Validate API credentials", skip(expected, basic_auth))]
async fn validate_credentials(
    expected: &ApiCredentials,
    basic_auth: BasicAuth,
) -> Result<AuthorizedClient, anyhow::Error> {
    if basic_auth.username != expected.username {
        return Err(anyhow!("Unknown username."));
    }
    let expected_hash = Secret::new(expected.password_hash.expose_secret().clone());
    let password = basic_auth.password;
    tokio::task::spawn_blocking(move || verify_password_hash(expected_hash, password))
        .await
        .context("Failed to spawn blocking task.")??;

    Ok(AuthorizedClient {
        username: basic_auth.username,
        _private: (),
    })
}

fn verify_password_hash(
    expected_hash: Secret<String>,
    candidate: Secret<String>,
) -> Result<(), anyhow::Error> {
    let expected_hash = PasswordHash::new(expected_hash.expose_secret())
        .context("Failed to parse hash in PHC string format.")?;
    Argon2::default()
        .verify_password(candidate.expose_secret().as_bytes(), &expected_hash)
        .context("Invalid password.")
}
