//! RF code notations used by remote-controlled mains switches.
//!
//! Two textual notations map onto the `(value, bit_length)` pair the
//! transmitter understands:
//!
//! | Notation  | Symbols   | Bits per symbol | Mapping                         |
//! |-----------|-----------|-----------------|---------------------------------|
//! | Binary    | `0` `1`   | 1               | as written                      |
//! | Tri-state | `0` `1` `F` | 2             | `0→00`, `1→11`, `F→01`          |
//!
//! A received 24-bit value can be rendered back as a 12-symbol tri-state
//! code.  The pair `10` has no tri-state meaning and renders as `S`.
//! In the common DIP-switch addressing scheme, symbols 0..4 select the
//! group, symbols 4..8 select the device, and a trailing `F` means "on".

use core::fmt;
use core::str::FromStr;

use crate::app::commands::RfCode;

/// Longest binary code the 32-bit value can carry.
pub const MAX_BINARY_BITS: usize = 32;

/// Longest tri-state code the 32-bit value can carry.
pub const MAX_TRI_STATE_SYMBOLS: usize = 16;

/// Symbols rendered when decoding a received value.
pub const DECODED_TRI_STATE_SYMBOLS: usize = 12;

/// Why a code string was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeError {
    Empty,
    /// Unexpected character at the given position.
    InvalidSymbol { position: usize, symbol: char },
    /// More symbols than fit in 32 bits.
    TooLong { symbols: usize, max: usize },
    /// A code pair was not of the form `ON:SEND`.
    MalformedPair,
}

impl fmt::Display for CodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty code"),
            Self::InvalidSymbol { position, symbol } => {
                write!(f, "invalid symbol {symbol:?} at position {position}")
            }
            Self::TooLong { symbols, max } => {
                write!(f, "{symbols} symbols exceeds the maximum of {max}")
            }
            Self::MalformedPair => write!(f, "expected a pair of the form ON:SEND"),
        }
    }
}

impl std::error::Error for CodeError {}

fn check_symbols(s: &str, allowed: &[char], max: usize) -> Result<(), CodeError> {
    if s.is_empty() {
        return Err(CodeError::Empty);
    }
    if let Some((position, symbol)) = s.chars().enumerate().find(|(_, c)| !allowed.contains(c)) {
        return Err(CodeError::InvalidSymbol { position, symbol });
    }
    let symbols = s.chars().count();
    if symbols > max {
        return Err(CodeError::TooLong { symbols, max });
    }
    Ok(())
}

// ───────────────────────────────────────────────────────────────
// Binary codes
// ───────────────────────────────────────────────────────────────

/// A validated binary code such as `010100010101`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BinaryCode(String);

impl BinaryCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_rf_code(&self) -> RfCode {
        let value = self
            .0
            .bytes()
            .fold(0u32, |acc, b| (acc << 1) | u32::from(b == b'1'));
        RfCode::new(value, self.0.len() as u16)
    }
}

impl FromStr for BinaryCode {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        check_symbols(s, &['0', '1'], MAX_BINARY_BITS)?;
        Ok(Self(s.to_owned()))
    }
}

impl fmt::Display for BinaryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ───────────────────────────────────────────────────────────────
// Tri-state codes
// ───────────────────────────────────────────────────────────────

/// A tri-state code such as `0FFF0FFFFFFF`.
///
/// Parsed codes contain only `0`, `1` and `F`; codes decoded from a
/// received value may also contain `S`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TriState(String);

/// Group and device selected by a tri-state address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceAddress {
    /// 1-based group number, 0 when no group switch is set.
    pub group: u8,
    /// 1-based device number, 0 when no device switch is set.
    pub device: u8,
}

impl fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "G-{} D-{}", self.group, char::from(b'@' + self.device))
    }
}

impl TriState {
    /// Render the low 24 bits of a received value as 12 symbols.
    pub fn from_value(value: u32) -> Self {
        let code = (0..DECODED_TRI_STATE_SYMBOLS)
            .rev()
            .map(|i| match (value >> (2 * i)) & 0b11 {
                0b00 => '0',
                0b11 => '1',
                0b01 => 'F',
                _ => 'S',
            })
            .collect();
        Self(code)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_rf_code(&self) -> RfCode {
        let value = self.0.bytes().fold(0u32, |acc, b| {
            let bits = match b {
                b'1' => 0b11,
                b'F' => 0b01,
                b'S' => 0b10,
                _ => 0b00,
            };
            (acc << 2) | bits
        });
        RfCode::new(value, (self.0.len() * 2) as u16)
    }

    /// Whether the code switches its device on (trailing `F`).
    pub fn is_on(&self) -> bool {
        self.0.ends_with('F')
    }

    /// Decode the group/device address from the first eight symbols.
    ///
    /// Returns `None` for codes shorter than eight symbols.
    pub fn device(&self) -> Option<DeviceAddress> {
        let bytes = self.0.as_bytes();
        if bytes.len() < 8 {
            return None;
        }
        let position = |part: &[u8]| part.iter().position(|&b| b == b'0').map_or(0, |p| p as u8 + 1);
        Some(DeviceAddress {
            group: position(&bytes[0..4]),
            device: position(&bytes[4..8]),
        })
    }
}

impl FromStr for TriState {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        check_symbols(s, &['0', '1', 'F'], MAX_TRI_STATE_SYMBOLS)?;
        Ok(Self(s.to_owned()))
    }
}

impl fmt::Display for TriState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ───────────────────────────────────────────────────────────────
// Code pairs
// ───────────────────────────────────────────────────────────────

/// A trigger/response pair written `ON:SEND`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriStatePair {
    pub trigger: TriState,
    pub response: TriState,
}

impl FromStr for TriStatePair {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (trigger, response) = s.split_once(':').ok_or(CodeError::MalformedPair)?;
        if response.contains(':') {
            return Err(CodeError::MalformedPair);
        }
        Ok(Self {
            trigger: trigger.parse()?,
            response: response.parse()?,
        })
    }
}
