//! PID Descriptor Table
//!
//! Maps two-hex-digit PID codes to their descriptors. The table is built
//! once at startup; lookups are pure and side-effect-free.

use crate::convert::{self, ConvertError};
use std::collections::HashMap;

/// Conversion formula signature shared by all descriptors
pub type ConvertFn = fn(&[u8]) -> Result<f64, ConvertError>;

/// Descriptor for a single supported PID
///
/// Descriptors are shared, read-only, and live for the process lifetime;
/// the registry hands out references rather than copies.
#[derive(Debug, Clone, Copy)]
pub struct PidDescriptor {
    /// Two-hex-digit PID code, uppercase (e.g. "0C")
    pub pid: &'static str,
    /// Human-readable sensor name
    pub name: &'static str,
    /// Number of payload bytes the conversion formula expects
    pub bytes: usize,
    /// Formula turning payload bytes into an engineering-unit value
    pub convert: ConvertFn,
}

/// Registry of supported PIDs, keyed by PID code
pub struct PidRegistry {
    descriptors: HashMap<&'static str, PidDescriptor>,
}

impl PidRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            descriptors: HashMap::new(),
        }
    }

    /// Create a registry pre-populated with the standard Mode 01 table
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for descriptor in STANDARD_PIDS {
            registry.register(*descriptor);
        }
        registry
    }

    /// Register a descriptor, replacing any previous entry for the PID
    pub fn register(&mut self, descriptor: PidDescriptor) {
        self.descriptors.insert(descriptor.pid, descriptor);
    }

    /// Look up the descriptor for a PID code, if one is registered
    pub fn lookup(&self, pid: &str) -> Option<&PidDescriptor> {
        self.descriptors.get(pid)
    }

    /// Number of registered PIDs
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

impl Default for PidRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

/// Standard Mode 01 PIDs
const STANDARD_PIDS: &[PidDescriptor] = &[
    PidDescriptor {
        pid: "04",
        name: "Calculated engine load",
        bytes: 1,
        convert: convert::engine_load,
    },
    PidDescriptor {
        pid: "05",
        name: "Engine coolant temperature",
        bytes: 1,
        convert: convert::coolant_temp,
    },
    PidDescriptor {
        pid: "06",
        name: "Short-term fuel trim (bank 1)",
        bytes: 1,
        convert: convert::fuel_trim,
    },
    PidDescriptor {
        pid: "07",
        name: "Long-term fuel trim (bank 1)",
        bytes: 1,
        convert: convert::fuel_trim,
    },
    PidDescriptor {
        pid: "0B",
        name: "Intake manifold absolute pressure",
        bytes: 1,
        convert: convert::intake_pressure,
    },
    PidDescriptor {
        pid: "0C",
        name: "Engine RPM",
        bytes: 2,
        convert: convert::rpm,
    },
    PidDescriptor {
        pid: "0D",
        name: "Vehicle speed",
        bytes: 1,
        convert: convert::vehicle_speed,
    },
    PidDescriptor {
        pid: "10",
        name: "Mass air flow rate",
        bytes: 2,
        convert: convert::maf,
    },
    PidDescriptor {
        pid: "11",
        name: "Throttle position",
        bytes: 1,
        convert: convert::throttle_position,
    },
    PidDescriptor {
        pid: "14",
        name: "O2 sensor voltage (bank 1, sensor 1)",
        bytes: 2,
        convert: convert::o2_voltage,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table() {
        let registry = PidRegistry::standard();
        assert_eq!(registry.len(), 10);

        let rpm = registry.lookup("0C").unwrap();
        assert_eq!(rpm.bytes, 2);
        assert_eq!(rpm.name, "Engine RPM");
    }

    #[test]
    fn test_lookup_unknown_pid() {
        let registry = PidRegistry::standard();
        assert!(registry.lookup("FF").is_none());
        // Lookup is case-sensitive: codes are stored uppercase
        assert!(registry.lookup("0c").is_none());
    }

    #[test]
    fn test_register_custom_descriptor() {
        fn ambient_temp(bytes: &[u8]) -> Result<f64, ConvertError> {
            Ok(bytes.first().copied().unwrap_or(0) as f64 - 40.0)
        }

        let mut registry = PidRegistry::standard();
        registry.register(PidDescriptor {
            pid: "46",
            name: "Ambient air temperature",
            bytes: 1,
            convert: ambient_temp,
        });

        let descriptor = registry.lookup("46").unwrap();
        assert_eq!((descriptor.convert)(&[0x50]).unwrap(), 40.0);
    }

    #[test]
    fn test_register_replaces_existing() {
        let mut registry = PidRegistry::standard();
        let before = registry.len();
        registry.register(PidDescriptor {
            pid: "0D",
            name: "Vehicle speed (mph)",
            bytes: 1,
            convert: |bytes| Ok(bytes[0] as f64 * 0.621371),
        });
        assert_eq!(registry.len(), before);
        assert_eq!(registry.lookup("0D").unwrap().name, "Vehicle speed (mph)");
    }
}
