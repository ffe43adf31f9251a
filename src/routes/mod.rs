mod health;
mod notifications;

pub use health::*;
pub use notifications::*;
