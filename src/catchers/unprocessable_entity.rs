use rocket::response::status::BadRequest;
use rocket::Request;

/// Malformed payloads are a client error like any other: report 400, not 422.
#[catch(422)]
pub fn unprocessable_entity_to_bad_request(_req: &Request) -> BadRequest<&'static str> {
    BadRequest("Malformed notification payload.")
}
