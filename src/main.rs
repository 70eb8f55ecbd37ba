use std::process::ExitCode;

use anyhow::{anyhow, Result};

use picam::constants::defaults;
use picam::{argsets, command, helpers};

const CMD_SEND_TEXT: &str = "send-text";
const CMD_TEXT_ON_ERROR: &str = "text-on-error";
const CMD_AUTO_MODE: &str = "auto-mode";
const CMD_LDR: &str = "ldr";

fn main() -> Result<ExitCode> {
    helpers::load_dotenv();

    let mut args = pico_args::Arguments::from_env();
    match args.subcommand()?.as_deref() {
        Some(CMD_SEND_TEXT) => {
            let args = argsets::SendTextArgs::parse(args.finish())?;
            helpers::init_logging(args.opts.loglevel);
            command::send_text(args)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(CMD_TEXT_ON_ERROR) => {
            let args = argsets::TextOnErrorArgs::parse(args.finish())?;
            helpers::init_logging(args.opts.loglevel);
            let code = command::text_on_error(args)?;
            Ok(exit_code(code))
        }
        Some(CMD_AUTO_MODE) => {
            argsets::expect_no_args(args.finish())?;
            helpers::init_logging_with_default(None, defaults::AUTO_MODE_LOG_LEVEL);
            command::auto_mode()?;
            Ok(ExitCode::SUCCESS)
        }
        Some(CMD_LDR) => {
            argsets::expect_no_args(args.finish())?;
            helpers::init_logging(None);
            command::ldr()?;
            Ok(ExitCode::SUCCESS)
        }
        _ => Err(anyhow!(
            "Subcommand must be one of 'send-text', 'text-on-error', 'auto-mode', 'ldr'"
        )),
    }
}

// Codes outside 1..=255 cannot be mirrored exactly; report a generic failure.
fn exit_code(code: i32) -> ExitCode {
    match code {
        0 => ExitCode::SUCCESS,
        c => u8::try_from(c).map(ExitCode::from).unwrap_or(ExitCode::FAILURE),
    }
}
