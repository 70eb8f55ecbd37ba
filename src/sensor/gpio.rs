use std::thread;
use std::time::{Duration, Instant};

use rppal::gpio::{Gpio, IoPin, Level, Mode as PinMode, OutputPin, Pin};

use super::{LightSensor, Mode, ModeOutput, SensorError};
use crate::constants::hardware::{CHARGE_POLL_INTERVAL, DISCHARGE_DELAY, SENSOR_TIMEOUT};

// Reading the clock on every spin would skew the count
const DEADLINE_CHECK_EVERY: u64 = 1024;

/// Poll `is_high` every `poll` until it returns true, giving up after `timeout`.
///
/// Returns the time it took.
pub fn wait_until_high(
    mut is_high: impl FnMut() -> bool,
    timeout: Duration,
    poll: Duration,
) -> Result<Duration, SensorError> {
    let start = Instant::now();
    loop {
        if is_high() {
            return Ok(start.elapsed());
        }
        if start.elapsed() >= timeout {
            return Err(SensorError::Timeout(timeout));
        }
        thread::sleep(poll);
    }
}

/// Spin on `is_high`, counting iterations, giving up after `timeout`.
pub fn count_until_high(
    mut is_high: impl FnMut() -> bool,
    timeout: Duration,
) -> Result<u64, SensorError> {
    let deadline = Instant::now() + timeout;
    let mut count = 0;
    while !is_high() {
        count += 1;
        if count % DEADLINE_CHECK_EVERY == 0 && Instant::now() >= deadline {
            return Err(SensorError::Timeout(timeout));
        }
    }
    Ok(count)
}

/// The bidirectional pin on the LDR/capacitor circuit.
///
/// The pin is released back to its original mode when dropped.
struct RcPin {
    pin: IoPin,
}

impl RcPin {
    fn new(gpio: &Gpio, bcm_pin: u8) -> Result<Self, SensorError> {
        let pin = gpio.get(bcm_pin)?.into_io(PinMode::Output);
        Ok(RcPin { pin })
    }

    /// Drain the capacitor, then switch the pin to input so it starts charging.
    fn discharge(&mut self) {
        self.pin.set_mode(PinMode::Output);
        self.pin.set_low();
        thread::sleep(DISCHARGE_DELAY);
        self.pin.set_mode(PinMode::Input);
    }

    fn is_high(&self) -> bool {
        self.pin.read() == Level::High
    }
}

/// Charge time in microseconds, as used by the auto-mode controller.
pub struct LdrSensor {
    rc: RcPin,
}

impl LdrSensor {
    pub fn new(gpio: &Gpio, bcm_pin: u8) -> Result<Self, SensorError> {
        Ok(LdrSensor {
            rc: RcPin::new(gpio, bcm_pin)?,
        })
    }
}

impl LightSensor for LdrSensor {
    fn read(&mut self) -> Result<u64, SensorError> {
        self.rc.discharge();
        let rc = &self.rc;
        let elapsed = wait_until_high(|| rc.is_high(), SENSOR_TIMEOUT, CHARGE_POLL_INTERVAL)?;
        let micros = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
        log::debug!("ldr_strength: {micros}");
        Ok(micros)
    }
}

/// Raw busy-loop count until the pin reads HIGH, as printed by the probe.
pub struct LdrCounter {
    rc: RcPin,
}

impl LdrCounter {
    pub fn new(gpio: &Gpio, bcm_pin: u8) -> Result<Self, SensorError> {
        Ok(LdrCounter {
            rc: RcPin::new(gpio, bcm_pin)?,
        })
    }
}

impl LightSensor for LdrCounter {
    fn read(&mut self) -> Result<u64, SensorError> {
        self.rc.discharge();
        let rc = &self.rc;
        count_until_high(|| rc.is_high(), SENSOR_TIMEOUT)
    }
}

/// Pin level that selects `mode` on the IR-filter relay.
pub fn mode_level(mode: Mode) -> Level {
    match mode {
        Mode::Day => Level::High,
        Mode::Night => Level::Low,
    }
}

/// IR-filter relay: HIGH selects day mode, LOW night mode.
///
/// The pin is left untouched until the first confirmed mode, which sets
/// it as an output already at the right level.
pub struct RelayOutput {
    idle: Option<Pin>,
    output: Option<OutputPin>,
}

impl RelayOutput {
    pub fn new(gpio: &Gpio, bcm_pin: u8) -> Result<Self, SensorError> {
        Ok(RelayOutput {
            idle: Some(gpio.get(bcm_pin)?),
            output: None,
        })
    }
}

impl ModeOutput for RelayOutput {
    fn write_mode(&mut self, mode: Mode) -> Result<(), SensorError> {
        let level = mode_level(mode);
        if let Some(pin) = self.idle.take() {
            self.output = Some(match level {
                Level::High => pin.into_output_high(),
                Level::Low => pin.into_output_low(),
            });
        } else if let Some(pin) = self.output.as_mut() {
            pin.write(level);
        }
        log::info!("Set mode {mode}");
        Ok(())
    }
}
