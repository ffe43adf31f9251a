mod authorized_client;
mod basic_auth;

pub use authorized_client::*;
pub use basic_auth::*;
