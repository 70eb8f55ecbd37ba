//! Light sensing and IR-filter mode control.
//!
//! The LDR sits in an RC circuit: after discharging the capacitor, the time it
//! takes the pin to read HIGH again grows with darkness.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

mod auto_mode;
mod gpio;
mod probe;

pub use auto_mode::{confirm_mode, AutoModeController, AutoModeSettings};
pub use gpio::{count_until_high, wait_until_high, LdrCounter, LdrSensor, RelayOutput};
pub use probe::run_probe;

#[derive(Error, Debug)]
pub enum SensorError {
    #[error("sensor did not charge within {0:?}")]
    Timeout(Duration),
    #[error(transparent)]
    Gpio(#[from] rppal::gpio::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Day,
    Night,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Day => write!(f, "DAY"),
            Mode::Night => write!(f, "NIGHT"),
        }
    }
}

/// Produces one light reading per call; larger means darker.
pub trait LightSensor {
    fn read(&mut self) -> Result<u64, SensorError>;
}

/// Drives the IR-filter relay.
pub trait ModeOutput {
    fn write_mode(&mut self, mode: Mode) -> Result<(), SensorError>;
}

pub(crate) fn mode_name(mode: Option<Mode>) -> String {
    mode.map_or_else(|| "None".to_string(), |m| m.to_string())
}
