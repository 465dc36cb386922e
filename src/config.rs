//! Configuration parameters
//!
//! [`BridgeConfig`] holds the bridge's wiring and poll-loop settings;
//! [`HostConfig`] holds the serial settings used by the host tooling.
//! Both can be overridden from a JSON file or from CLI flags.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Bridge (device side) configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    // --- Serial ---
    /// UART baud rate
    pub baud_rate: u32,
    /// Maximum inbound serial bytes consumed per poll iteration
    pub max_bytes_per_poll: u8,

    // --- Radio ---
    /// GPIO driving the 433MHz transmitter data pin
    pub transmit_pin: u8,
    /// External interrupt line wired to the receiver data pin
    pub receive_interrupt: u8,
    /// Whether the receiver is enabled at boot
    pub receiver_enabled_at_boot: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            // Serial
            baud_rate: 9600,
            max_bytes_per_poll: 1, // one byte per loop, as the reference sketch

            // Radio
            transmit_pin: 10,
            receive_interrupt: 0, // interrupt 0 = digital pin 2
            receiver_enabled_at_boot: true,
        }
    }
}

impl BridgeConfig {
    /// Reject settings the poll loop cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.baud_rate == 0 {
            return Err(Error::Config("baud_rate must be non-zero"));
        }
        if self.max_bytes_per_poll == 0 {
            return Err(Error::Config("max_bytes_per_poll must be at least 1"));
        }
        Ok(())
    }
}

/// Host tooling configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Serial device the bridge is attached to
    pub port: String,
    /// Serial baud rate
    pub baud_rate: u32,
    /// Read timeout (seconds)
    pub timeout_secs: u64,
    /// Delay after opening the port while the board resets (milliseconds)
    pub settle_ms: u64,
    /// Bit length used when none is given for a decimal code
    pub default_bit_length: u16,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            port: String::from("/dev/ttyACM0"),
            baud_rate: 9600,
            timeout_secs: 5,
            settle_ms: 2000,
            default_bit_length: 24,
        }
    }
}

impl HostConfig {
    /// Parse a JSON config; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|_| Error::Config("malformed host config JSON"))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.port.is_empty() {
            return Err(Error::Config("port must not be empty"));
        }
        if self.baud_rate == 0 {
            return Err(Error::Config("baud_rate must be non-zero"));
        }
        if self.default_bit_length == 0 || self.default_bit_length > 32 {
            return Err(Error::Config("default_bit_length must be 1..=32"));
        }
        Ok(())
    }
}
