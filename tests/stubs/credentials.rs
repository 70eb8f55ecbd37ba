#![allow(dead_code)]
// Not every test binary uses every stub

use std::path::{Path, PathBuf};

pub const ACCOUNT_SID: &str = "AC0123456789";
pub const TEST_ACCOUNT_SID: &str = "ACtest000000";
pub const FROM_PHONE: &str = "+15550000000";
pub const TEST_FROM_PHONE: &str = "+15005550006";
pub const TO_PHONE_1: &str = "+15551111111";
pub const TO_PHONE_2: &str = "+15552222222";

pub const MESSAGE_CREATED: &str = r#"{"sid": "SM0123", "status": "queued"}"#;

pub fn messages_path(account_sid: &str) -> String {
    format!("/2010-04-01/Accounts/{account_sid}/Messages.json")
}

pub fn credentials_json(to_phones: &[&str]) -> String {
    serde_json::json!({
        "twilio": {
            "account_sid": ACCOUNT_SID,
            "auth_token": "live_token",
            "from_phone": FROM_PHONE,
            "to_phones": to_phones,
            "test": {
                "account_sid": TEST_ACCOUNT_SID,
                "auth_token": "test_token",
                "test_from": TEST_FROM_PHONE
            }
        }
    })
    .to_string()
}

pub fn write_credentials(dir: &Path, to_phones: &[&str]) -> PathBuf {
    let path = dir.join("picam.json");
    std::fs::write(&path, credentials_json(to_phones)).unwrap();
    path
}
