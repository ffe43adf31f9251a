use rocket::fairing::{Fairing, Info, Kind};
use rocket::{Orbit, Rocket};
use tokio::sync::watch;

/// Creates a fairing that publishes the port the server ends up listening
/// on, together with the handle used to read it.
pub fn create_pair() -> (PortSaver, ListenPort) {
    let (sender, receiver) = watch::channel(None);
    (PortSaver { sender }, ListenPort { receiver })
}

#[derive(Clone)]
pub struct ListenPort {
    receiver: watch::Receiver<Option<u16>>,
}

impl ListenPort {
    /// Waits for lift-off. `None` if the server was dropped before that.
    pub async fn get(&self) -> Option<u16> {
        let mut receiver = self.receiver.clone();
        loop {
            let current = *receiver.borrow();
            if let Some(port) = current {
                return Some(port);
            }
            if receiver.changed().await.is_err() {
                return None;
            }
        }
    }
}

pub struct PortSaver {
    sender: watch::Sender<Option<u16>>,
}

#[rocket::async_trait]
impl Fairing for PortSaver {
    fn info(&self) -> Info {
        Info {
            name: "Port Saver",
            kind: Kind::Liftoff,
        }
    }

    async fn on_liftoff(&self, rocket: &Rocket<Orbit>) {
        // Nobody waiting for the port is not an error.
        let _ = self.sender.send(Some(rocket.config().port));
    }
}
