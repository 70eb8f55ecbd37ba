use std::time::Duration;

pub const API_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
pub const LOG_LEVEL: &str = "info";
pub const AUTO_MODE_LOG_LEVEL: &str = "debug";
pub const CONFIG_FILE: &str = "picam.json";
pub const TWILIO_API_BASE_URL: &str = "https://api.twilio.com";

pub const FAILURE_MESSAGE: &str = r"There was a failure on {host}.\nExit Code: {code}\nCommand: {cmd}";
pub const HOST_UNDETERMINED: &str = "<Host Undetermined>";

// Exit code reported when the guarded command could not be started at all
pub const SPAWN_FAILURE_CODE: i32 = 127;
