use std::io;

use anyhow::Result;
use rppal::gpio::Gpio;

use crate::constants::hardware::LDR_PIN;
use crate::helpers::Shutdown;
use crate::sensor::{run_probe, LdrCounter};

pub fn ldr() -> Result<()> {
    let shutdown = Shutdown::install()?;
    let gpio = Gpio::new()?;
    let mut counter = LdrCounter::new(&gpio, LDR_PIN)?;

    run_probe(&mut counter, &mut io::stdout().lock(), &shutdown)
}
