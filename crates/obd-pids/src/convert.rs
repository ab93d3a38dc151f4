//! Byte-to-Value Conversion Formulas
//!
//! One function per supported sensor. Each formula takes the payload
//! bytes of a Mode 01 response (the bytes after the mode and PID codes)
//! and produces a value in engineering units. A payload shorter than the
//! formula needs is rejected rather than zero-filled.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors signalled by a PID conversion formula
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum ConvertError {
    /// Payload did not carry enough bytes for the formula
    #[error("payload too short: formula needs {expected} byte(s), got {actual}")]
    ShortPayload { expected: usize, actual: usize },
}

fn require(bytes: &[u8], expected: usize) -> Result<(), ConvertError> {
    if bytes.len() < expected {
        Err(ConvertError::ShortPayload {
            expected,
            actual: bytes.len(),
        })
    } else {
        Ok(())
    }
}

/// Engine RPM: ((A*256)+B)/4
pub fn rpm(bytes: &[u8]) -> Result<f64, ConvertError> {
    require(bytes, 2)?;
    Ok(((bytes[0] as f64 * 256.0) + bytes[1] as f64) / 4.0)
}

/// Vehicle speed: A (km/h)
pub fn vehicle_speed(bytes: &[u8]) -> Result<f64, ConvertError> {
    require(bytes, 1)?;
    Ok(bytes[0] as f64)
}

/// Coolant temperature: A - 40 (°C)
pub fn coolant_temp(bytes: &[u8]) -> Result<f64, ConvertError> {
    require(bytes, 1)?;
    Ok(bytes[0] as f64 - 40.0)
}

/// Calculated engine load: A * 100 / 255 (%)
pub fn engine_load(bytes: &[u8]) -> Result<f64, ConvertError> {
    require(bytes, 1)?;
    Ok(bytes[0] as f64 * 100.0 / 255.0)
}

/// Mass air flow rate: ((A*256)+B)/100 (g/s)
pub fn maf(bytes: &[u8]) -> Result<f64, ConvertError> {
    require(bytes, 2)?;
    Ok(((bytes[0] as f64 * 256.0) + bytes[1] as f64) / 100.0)
}

/// Short/long-term fuel trim: (A - 128) * 100 / 128 (%)
pub fn fuel_trim(bytes: &[u8]) -> Result<f64, ConvertError> {
    require(bytes, 1)?;
    Ok((bytes[0] as f64 - 128.0) * 100.0 / 128.0)
}

/// O2 sensor voltage: A / 200 (V)
pub fn o2_voltage(bytes: &[u8]) -> Result<f64, ConvertError> {
    require(bytes, 1)?;
    Ok(bytes[0] as f64 / 200.0)
}

/// Intake manifold absolute pressure: A (kPa)
pub fn intake_pressure(bytes: &[u8]) -> Result<f64, ConvertError> {
    require(bytes, 1)?;
    Ok(bytes[0] as f64)
}

/// Throttle position: A * 100 / 255 (%)
pub fn throttle_position(bytes: &[u8]) -> Result<f64, ConvertError> {
    require(bytes, 1)?;
    Ok(bytes[0] as f64 * 100.0 / 255.0)
}
