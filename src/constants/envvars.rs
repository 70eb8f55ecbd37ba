pub const LOG_LEVEL: &str = "LOG_LEVEL";
pub const CONFIG_FILE: &str = "PICAM_CONFIG";
pub const TWILIO_API_BASE_URL: &str = "TWILIO_API_BASE_URL";
