use anyhow::Result;
use rppal::gpio::Gpio;

use crate::constants::hardware::{LDR_PIN, MODE_PIN};
use crate::helpers::Shutdown;
use crate::sensor::{AutoModeController, AutoModeSettings, LdrSensor, RelayOutput};

/// Compare the LDR against the threshold and switch the IR filter to match.
pub fn auto_mode() -> Result<()> {
    let shutdown = Shutdown::install()?;
    let gpio = Gpio::new()?;

    log::info!("Started");
    // Pins are released when the controller drops, however the loop ends
    let result = {
        let sensor = LdrSensor::new(&gpio, LDR_PIN)?;
        let relay = RelayOutput::new(&gpio, MODE_PIN)?;
        let mut controller = AutoModeController::new(sensor, relay, AutoModeSettings::default());
        controller.run(&shutdown)
    };
    log::info!("Exiting");

    result.map_err(Into::into)
}
