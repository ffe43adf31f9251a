use rocket::http::Header;

/// Asks the client for Basic credentials.
#[derive(Responder)]
#[response(status = 401)]
pub struct CredentialsRequired {
    inner: &'static str,
    challenge: Header<'static>,
}

#[catch(401)]
pub fn credentials_required() -> CredentialsRequired {
    CredentialsRequired {
        inner: "Valid API credentials are required.",
        challenge: Header::new("WWW-Authenticate", r#"Basic realm="notifications""#),
    }
}
