//! OBD-II PID Registry
//!
//! Defines the standard Mode 01 Parameter IDs (PIDs), their expected
//! payload sizes, and the formulas that turn raw response bytes into
//! engineering-unit sensor values.

mod convert;
mod registry;

pub use convert::ConvertError;
pub use registry::{PidDescriptor, PidRegistry};
