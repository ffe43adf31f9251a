use anyhow::{anyhow, Context};
use rocket::http::Status;
use rocket::request::{FromRequest, Outcome};
use rocket::Request;
use secrecy::Secret;

/// Credentials taken from an `Authorization: Basic ...` header.
#[derive(Debug)]
pub struct BasicAuth {
    pub username: String,
    pub password: Secret<String>,
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for BasicAuth {
    type Error = anyhow::Error;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        match request.headers().get_one("Authorization").map(parse_header) {
            Some(Ok(auth)) => Outcome::Success(auth),
            Some(Err(e)) => Outcome::Error((Status::Unauthorized, e)),
            None => Outcome::Error((
                Status::Unauthorized,
                anyhow!("The 'Authorization' header was missing"),
            )),
        }
    }
}

pub fn parse_header(header_value: &str) -> Result<BasicAuth, anyhow::Error> {
    let base64encoded_segment = header_value
        .strip_prefix("Basic ")
        .context("The authorization scheme was not 'Basic'.")?;

    let decoded_bytes = base64::decode_config(base64encoded_segment, base64::STANDARD)
        .context("Failed to base64-decode 'Basic' credentials.")?;

    let decoded_credentials = String::from_utf8(decoded_bytes)
        .context("The decoded credential string is not valid UTF8.")?;

    let (username, password) = decoded_credentials
        .split_once(':')
        .ok_or_else(|| anyhow!("A password must be provided in 'Basic' auth."))?;
    if username.is_empty() {
        return Err(anyhow!("A username must be provided in 'Basic' auth."));
    }

    Ok(BasicAuth {
        username: username.to_string(),
        password: Secret::new(password.to_string()),
    })
}
