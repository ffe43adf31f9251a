/// Outcome of a single send attempt.
///
/// For SMS, `success` only means the gateway accepted the request without an
/// error; delivery details are reported in `message`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SendStatus {
    pub success: bool,
    pub message: String,
}

impl SendStatus {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
