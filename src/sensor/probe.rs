use std::io::Write;

use anyhow::Result;

use super::{LightSensor, SensorError};
use crate::helpers::Shutdown;

/// Print one raw reading per line until shutdown. Useful when tuning the threshold.
pub fn run_probe(
    sensor: &mut impl LightSensor,
    out: &mut impl Write,
    shutdown: &Shutdown,
) -> Result<()> {
    while !shutdown.is_requested() {
        match sensor.read() {
            Ok(count) => {
                writeln!(out, "{count}")?;
                out.flush()?;
            }
            Err(SensorError::Timeout(t)) => log::warn!("LDR did not charge within {t:?}"),
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}
