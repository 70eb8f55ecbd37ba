use std::io;

use anyhow::Result;

use crate::argsets::TextOnErrorArgs;
use crate::config;
use crate::constants::defaults;
use crate::helpers::{fill_tag, get_hostname};
use crate::interfaces::TwilioClient;
use crate::notifier::Notifier;
use crate::runner::{GuardedCommand, RunState};

/// Run the command and text if it fails. Returns the exit code to mirror.
pub fn text_on_error(args: TextOnErrorArgs) -> Result<i32> {
    let config_path = config::resolve_path(args.opts.config.as_deref());
    let credentials = config::load(&config_path, args.opts.profile())?;
    let notifier = Notifier::new(
        TwilioClient::from_credentials(&credentials),
        &credentials,
        args.opts.pretend,
    );

    let mut message = args
        .message
        .unwrap_or_else(|| defaults::FAILURE_MESSAGE.to_string());

    let mut error_code = 0;
    if !args.cmd.is_empty() {
        let mut command = GuardedCommand::new(args.cmd);
        if let RunState::Failed(code) = command.run() {
            error_code = code;
            message = fill_tag(&message, "cmd", &command.command_line());
            message = fill_tag(&message, "code", &code.to_string());
        }
    }

    if args.always || error_code > 0 {
        message = fill_tag(&message, "host", &get_hostname());
        // Best effort: a failed text must not hide the command's own result
        if let Err(e) = notifier.notify(&message, &mut io::stdout()) {
            log::error!("Could not send text: {e}");
        }
    } else {
        log::debug!("No text was sent.");
    }

    Ok(error_code)
}
