use std::io;

use anyhow::Result;

use crate::argsets::SendTextArgs;
use crate::config::{self, ConfigError};
use crate::interfaces::TwilioClient;
use crate::notifier::Notifier;

pub fn send_text(args: SendTextArgs) -> Result<()> {
    let message = args.message.join(" ");
    if message.trim().is_empty() {
        return Err(ConfigError::EmptyMessage.into());
    }

    let config_path = config::resolve_path(args.opts.config.as_deref());
    let credentials = config::load(&config_path, args.opts.profile())?;

    let notifier = Notifier::new(
        TwilioClient::from_credentials(&credentials),
        &credentials,
        args.opts.pretend,
    );
    let receipts = notifier.notify(&message, &mut io::stdout())?;
    for receipt in receipts {
        log::debug!("Sent {} to {}", receipt.sid, receipt.to);
    }
    Ok(())
}
