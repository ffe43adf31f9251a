/// Gateway error code sent when the gateway blocks our sender.
pub const BLOCKED_BY_SERVICE: u32 = 241;

/// Human-readable meaning of an SMSPilot message status code.
pub fn describe_status(code: i32) -> &'static str {
    match code {
        -2 => "error",
        -1 => "not delivered",
        0 => "new",
        1 => "queued",
        2 => "delivered",
        3 => "deferred",
        _ => "unknown status",
    }
}
