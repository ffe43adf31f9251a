#[macro_use]
extern crate rocket;

pub mod catchers;
pub mod configuration;
pub mod domain;
pub mod email;
pub mod error;
pub mod events;
pub mod guards;
pub mod manager;
pub mod messages;
pub mod port_saver;
pub mod providers;
pub mod queue;
pub mod routes;
pub mod sms;
pub mod startup;
pub mod telemetry;
