use std::env;

use base64::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ureq::tls::{TlsConfig, TlsProvider};

use crate::config::Credentials;
use crate::constants::{defaults, envvars};

#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("provider rejected message to {to} (HTTP {status}): {message}")]
    Rejected {
        to: String,
        status: u16,
        code: Option<i64>,
        message: String,
    },
    #[error("could not send message to {to}: {source}")]
    Transport { to: String, source: ureq::Error },
}

/// Provider's record of an accepted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageReceipt {
    pub to: String,
    pub sid: String,
}

/// Sends a single text message.
pub trait MessageSender {
    fn send(&self, to: &str, from: &str, body: &str) -> Result<MessageReceipt, DeliveryError>;
}

#[derive(Debug, Deserialize, Serialize)]
struct MessageResource {
    sid: String,
    status: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
struct ApiError {
    code: Option<i64>,
    message: String,
}

pub fn get_api_base_url() -> String {
    env::var(envvars::TWILIO_API_BASE_URL)
        .unwrap_or_else(|_| defaults::TWILIO_API_BASE_URL.to_string())
}

fn get_ureq_agent() -> ureq::Agent {
    let config = ureq::Agent::config_builder()
        .tls_config(TlsConfig::builder().provider(TlsProvider::NativeTls).build())
        .timeout_global(Some(defaults::API_REQUEST_TIMEOUT))
        .http_status_as_error(false)
        .build();
    config.into()
}

pub struct TwilioClient {
    agent: ureq::Agent,
    messages_url: String,
    authorization: String,
}

impl TwilioClient {
    pub fn new(api_root: &str, account_sid: &str, auth_token: &str) -> Self {
        let api_root = api_root.trim_end_matches('/');
        TwilioClient {
            agent: get_ureq_agent(),
            messages_url: format!("{api_root}/2010-04-01/Accounts/{account_sid}/Messages.json"),
            authorization: format!(
                "Basic {}",
                BASE64_STANDARD.encode(format!("{account_sid}:{auth_token}"))
            ),
        }
    }

    pub fn from_credentials(credentials: &Credentials) -> Self {
        Self::new(
            &get_api_base_url(),
            &credentials.account_sid,
            &credentials.auth_token,
        )
    }
}

impl MessageSender for TwilioClient {
    fn send(&self, to: &str, from: &str, body: &str) -> Result<MessageReceipt, DeliveryError> {
        let transport = |source| DeliveryError::Transport {
            to: to.to_string(),
            source,
        };

        log::debug!("POST {}", self.messages_url);
        let mut resp = self
            .agent
            .post(&self.messages_url)
            .header("Authorization", self.authorization.as_str())
            .send_form([("To", to), ("From", from), ("Body", body)])
            .map_err(transport)?;

        let status = resp.status();
        if !status.is_success() {
            let (code, message) = match resp.body_mut().read_json::<ApiError>() {
                Ok(err) => (err.code, err.message),
                Err(e) => (None, format!("unreadable error response: {e}")),
            };
            return Err(DeliveryError::Rejected {
                to: to.to_string(),
                status: status.as_u16(),
                code,
                message,
            });
        }

        let created: MessageResource = resp.body_mut().read_json().map_err(transport)?;
        log::debug!(
            "Message {} to {to} accepted with status {}",
            created.sid,
            created.status.as_deref().unwrap_or("unknown")
        );
        Ok(MessageReceipt {
            to: to.to_string(),
            sid: created.sid,
        })
    }
}
