//! Wiring and timing of the LDR / IR-filter board.
//!
//! Pin numbers are BCM GPIO numbers (the board header pins are noted alongside).

use std::time::Duration;

/// Bidirectional pin on the LDR/capacitor circuit (board pin 7).
pub const LDR_PIN: u8 = 4;
/// Output pin driving the IR-filter relay (board pin 13).
pub const MODE_PIN: u8 = 27;

pub const MAIN_LOOP_DELAY: Duration = Duration::from_secs(15);
pub const VERIFY_LOOP_DELAY: Duration = Duration::from_secs(2);
pub const VERIFY_LOOP_COUNT: u32 = 5;
/// Discharge time (µs) below which it is considered daylight.
pub const LDR_THRESHOLD: u64 = 100_000;

pub const DISCHARGE_DELAY: Duration = Duration::from_millis(100);
pub const CHARGE_POLL_INTERVAL: Duration = Duration::from_millis(10);
pub const SENSOR_TIMEOUT: Duration = Duration::from_secs(5);
