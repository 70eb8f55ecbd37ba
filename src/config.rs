//! Messaging credentials, loaded once from the JSON credentials file.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::constants::{defaults, envvars};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read credentials file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse credentials JSON: {0}")]
    ParseJson(#[from] serde_json::Error),
    #[error("missing or empty credential '{0}'")]
    MissingField(&'static str),
    #[error("there must be a message")]
    EmptyMessage,
    #[error("{0}")]
    Usage(String),
}

/// Which set of provider credentials to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Live,
    Test,
}

#[derive(Debug, Deserialize)]
struct CredentialsFile {
    twilio: Option<TwilioSection>,
}

#[derive(Debug, Default, Deserialize)]
struct TwilioSection {
    account_sid: Option<String>,
    auth_token: Option<String>,
    from_phone: Option<String>,
    #[serde(default)]
    to_phones: Vec<String>,
    test: Option<TestSection>,
}

#[derive(Debug, Default, Deserialize)]
struct TestSection {
    account_sid: Option<String>,
    auth_token: Option<String>,
    test_from: Option<String>,
}

/// Fully populated credentials for one profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub account_sid: String,
    pub auth_token: String,
    pub from_phone: String,
    pub to_phones: Vec<String>,
}

/// Resolve the credentials file location: explicit path, then `PICAM_CONFIG`,
/// then `picam.json` in the working directory.
pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    if let Ok(path) = env::var(envvars::CONFIG_FILE) {
        return path.into();
    }
    PathBuf::from(defaults::CONFIG_FILE)
}

pub fn load(path: impl AsRef<Path>, profile: Profile) -> Result<Credentials, ConfigError> {
    let path = path.as_ref();
    log::debug!("Loading credentials from {}", path.display());
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    from_str(&raw, profile)
}

pub fn from_str(raw: &str, profile: Profile) -> Result<Credentials, ConfigError> {
    let file: CredentialsFile = serde_json::from_str(raw)?;
    let twilio = file.twilio.unwrap_or_default();

    let (account_sid, auth_token, from_phone) = match profile {
        Profile::Live => (
            required(twilio.account_sid, "twilio.account_sid")?,
            required(twilio.auth_token, "twilio.auth_token")?,
            required(twilio.from_phone, "twilio.from_phone")?,
        ),
        Profile::Test => {
            let test = twilio.test.unwrap_or_default();
            (
                required(test.account_sid, "twilio.test.account_sid")?,
                required(test.auth_token, "twilio.test.auth_token")?,
                required(test.test_from, "twilio.test.test_from")?,
            )
        }
    };

    let to_phones: Vec<String> = twilio
        .to_phones
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect();
    if to_phones.is_empty() {
        return Err(ConfigError::MissingField("twilio.to_phones"));
    }

    Ok(Credentials {
        account_sid,
        auth_token,
        from_phone,
        to_phones,
    })
}

fn required(value: Option<String>, name: &'static str) -> Result<String, ConfigError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::MissingField(name))
}
