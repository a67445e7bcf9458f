//! # Messages
//!
//! Constant strings and format functions for user-facing replies.

pub const AUTH_DENIED: &str = "Authorization denied.";

pub const EXEC_DISABLED: &str = "Arbitrary code execution disabled (for obvious reasons)";

pub const UPDATE_ACK: &str = "Synching package databases with repositories...";

pub const UPGRADE_STUB: &str = "Unattended upgrades are a work-in-progress";

pub const COMING_ONLINE: &str = "Coming online.";

pub const GOING_DOWN: &str = "Response bot going down.";

pub const KILL_CONFIRM: &str = "Killing heimdall response bot...";

pub fn pending_upgrades(count: usize) -> String {
    format!("There are {count} packages to be upgraded")
}

pub fn update_failed(err: &str) -> String {
    format!("Package database sync failed: {err}")
}

pub fn delegate_failed(name: &str, err: &str) -> String {
    format!("{name} failed: {err}")
}

pub fn transport_error(err: &str) -> String {
    format!("Transport error: {err}")
}
