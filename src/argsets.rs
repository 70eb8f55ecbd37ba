use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::Result;
use log::LevelFilter;

use crate::config::{ConfigError, Profile};

pub const SEND_TEXT_USAGE: &str =
    "picam send-text [-n|--pretend] [-t|--test] [--loglevel LEVEL] [--config PATH] MESSAGE...";
pub const TEXT_ON_ERROR_USAGE: &str = "picam text-on-error [-n|--pretend] [-m|--message TEMPLATE] \
     [-a|--always] [-t|--test] [--loglevel LEVEL] [--config PATH] [--] COMMAND...";

// Options that consume the following argument as their value
const VALUE_OPTIONS: &[&str] = &["-m", "--message", "--loglevel", "--config"];

/// Options shared by the subcommands that send texts.
#[derive(Debug, Default)]
pub struct NotifyOpts {
    pub pretend: bool,
    pub test: bool,
    pub loglevel: Option<LevelFilter>,
    pub config: Option<PathBuf>,
}

impl NotifyOpts {
    fn from_args(args: &mut pico_args::Arguments) -> Result<Self> {
        Ok(NotifyOpts {
            pretend: args.contains(["-n", "--pretend"]),
            test: args.contains(["-t", "--test"]),
            loglevel: args.opt_value_from_fn("--loglevel", parse_loglevel)?,
            config: args.opt_value_from_str("--config")?,
        })
    }

    pub fn profile(&self) -> Profile {
        if self.test {
            Profile::Test
        } else {
            Profile::Live
        }
    }
}

#[derive(Debug)]
pub struct SendTextArgs {
    pub opts: NotifyOpts,
    pub message: Vec<String>,
}

impl SendTextArgs {
    pub fn parse(raw: Vec<OsString>) -> Result<Self> {
        let (options, remainder) = split_remainder(raw);
        let mut args = pico_args::Arguments::from_vec(options);
        let opts = NotifyOpts::from_args(&mut args)?;
        reject_leftovers(args, SEND_TEXT_USAGE)?;

        Ok(SendTextArgs {
            opts,
            message: into_strings(remainder),
        })
    }
}

#[derive(Debug)]
pub struct TextOnErrorArgs {
    pub opts: NotifyOpts,
    pub message: Option<String>,
    pub always: bool,
    pub cmd: Vec<String>,
}

impl TextOnErrorArgs {
    pub fn parse(raw: Vec<OsString>) -> Result<Self> {
        let (options, remainder) = split_remainder(raw);
        let mut args = pico_args::Arguments::from_vec(options);
        let opts = NotifyOpts::from_args(&mut args)?;
        let message: Option<String> = args.opt_value_from_str(["-m", "--message"])?;
        let always = args.contains(["-a", "--always"]);
        reject_leftovers(args, TEXT_ON_ERROR_USAGE)?;

        let cmd = into_strings(remainder);
        if cmd.is_empty() && !always {
            return Err(ConfigError::Usage(format!(
                "There must be a command to run (unless --always)\n\nUsage: {TEXT_ON_ERROR_USAGE}"
            ))
            .into());
        }

        Ok(TextOnErrorArgs {
            opts,
            // An empty template falls back to the default one
            message: message.filter(|m| !m.is_empty()),
            always,
            cmd,
        })
    }
}

pub fn expect_no_args(raw: Vec<OsString>) -> Result<()> {
    if !raw.is_empty() {
        return Err(ConfigError::Usage(format!("Unexpected arguments: {raw:?}")).into());
    }
    Ok(())
}

/// Split raw arguments into leading options and the verbatim remainder.
///
/// The remainder starts at the first argument that is neither an option nor an
/// option's value, or right after a `--` separator.
fn split_remainder(raw: Vec<OsString>) -> (Vec<OsString>, Vec<OsString>) {
    let mut options = Vec::new();
    let mut iter = raw.into_iter();

    while let Some(arg) = iter.next() {
        let (is_separator, is_option, takes_value) = {
            let text = arg.to_string_lossy();
            (
                text == "--",
                text.starts_with('-') && text != "-",
                VALUE_OPTIONS.contains(&&*text),
            )
        };
        if is_separator {
            break;
        }
        if !is_option {
            let mut remainder = vec![arg];
            remainder.extend(iter);
            return (options, remainder);
        }
        options.push(arg);
        if takes_value {
            if let Some(value) = iter.next() {
                options.push(value);
            }
        }
    }
    (options, iter.collect())
}

fn reject_leftovers(args: pico_args::Arguments, usage: &str) -> Result<()> {
    let leftovers = args.finish();
    if !leftovers.is_empty() {
        return Err(ConfigError::Usage(format!(
            "Unrecognized option(s): {leftovers:?}\n\nUsage: {usage}"
        ))
        .into());
    }
    Ok(())
}

fn into_strings(args: Vec<OsString>) -> Vec<String> {
    args.into_iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect()
}

fn parse_loglevel(level: &str) -> Result<LevelFilter, String> {
    match level.to_lowercase().as_str() {
        "critical" | "error" => Ok(LevelFilter::Error),
        "warning" => Ok(LevelFilter::Warn),
        "info" => Ok(LevelFilter::Info),
        "debug" => Ok(LevelFilter::Debug),
        _ => Err(format!(
            "invalid log level '{level}' (choose from critical, error, warning, info, debug)"
        )),
    }
}
