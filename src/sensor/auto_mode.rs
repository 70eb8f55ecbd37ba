use std::time::Duration;

use super::{mode_name, LightSensor, Mode, ModeOutput, SensorError};
use crate::constants::hardware;
use crate::helpers::Shutdown;

#[derive(Debug, Clone)]
pub struct AutoModeSettings {
    /// Charge time below which a reading counts as daylight.
    pub threshold: u64,
    /// Verification samples taken per suspected change is one less than this.
    pub verify_count: u32,
    pub main_delay: Duration,
    pub verify_delay: Duration,
}

impl Default for AutoModeSettings {
    fn default() -> Self {
        AutoModeSettings {
            threshold: hardware::LDR_THRESHOLD,
            verify_count: hardware::VERIFY_LOOP_COUNT,
            main_delay: hardware::MAIN_LOOP_DELAY,
            verify_delay: hardware::VERIFY_LOOP_DELAY,
        }
    }
}

/// Day wins only with a strict majority of `verify_count`.
pub fn confirm_mode(day_count: u32, verify_count: u32) -> Mode {
    if day_count * 2 > verify_count {
        Mode::Day
    } else {
        Mode::Night
    }
}

pub struct AutoModeController<S, O> {
    sensor: S,
    output: O,
    settings: AutoModeSettings,
    current: Option<Mode>,
}

impl<S: LightSensor, O: ModeOutput> AutoModeController<S, O> {
    pub fn new(sensor: S, output: O, settings: AutoModeSettings) -> Self {
        AutoModeController {
            sensor,
            output,
            settings,
            current: None,
        }
    }

    pub fn current_mode(&self) -> Option<Mode> {
        self.current
    }

    pub fn classify(&self, reading: u64) -> Mode {
        if reading < self.settings.threshold {
            Mode::Day
        } else {
            Mode::Night
        }
    }

    /// Take one reading. A sensor that never charges is in the dark.
    fn sample(&mut self) -> Result<Mode, SensorError> {
        match self.sensor.read() {
            Ok(reading) => Ok(self.classify(reading)),
            Err(SensorError::Timeout(t)) => {
                log::warn!("LDR did not charge within {t:?}; assuming NIGHT");
                Ok(Mode::Night)
            }
            Err(e) => Err(e),
        }
    }

    /// Debounce a suspected change. Returns `None` if interrupted.
    fn verify(&mut self, shutdown: &Shutdown) -> Result<Option<Mode>, SensorError> {
        let mut day_count = 0;
        for _ in 1..self.settings.verify_count {
            if shutdown.wait(self.settings.verify_delay) {
                return Ok(None);
            }
            if self.sample()? == Mode::Day {
                day_count += 1;
            }
        }
        Ok(Some(confirm_mode(day_count, self.settings.verify_count)))
    }

    /// One pass of the control loop, without the leading delay.
    ///
    /// Returns the new mode if the relay was switched.
    pub fn step(&mut self, shutdown: &Shutdown) -> Result<Option<Mode>, SensorError> {
        let tested = self.sample()?;
        if self.current == Some(tested) {
            return Ok(None);
        }

        log::debug!(
            "Initial test: Current {}, Tested {}",
            mode_name(self.current),
            tested
        );
        let Some(verified) = self.verify(shutdown)? else {
            return Ok(None);
        };
        log::debug!("Verified: {verified}");

        if self.current == Some(verified) {
            return Ok(None);
        }
        log::info!("Mode Change to {verified}");
        self.output.write_mode(verified)?;
        self.current = Some(verified);
        Ok(Some(verified))
    }

    /// Run until shutdown is requested.
    pub fn run(&mut self, shutdown: &Shutdown) -> Result<(), SensorError> {
        while !shutdown.wait(self.settings.main_delay) {
            self.step(shutdown)?;
        }
        Ok(())
    }
}
