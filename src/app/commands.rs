//! Host commands and their frame encoding.
//!
//! A completed [`Frame`] is interpreted as `opcode + payload`.  Frames
//! that do not form a valid command are rejected silently on the wire;
//! the [`Rejection`] only feeds logging and counters.

use crate::error::{Error, Result};
use crate::protocol::frame::Frame;
use crate::protocol::{MAX_PAYLOAD, MAX_WIRE_LEN, header_for};

/// Opcode: transmit an RF code.
pub const OP_TRANSMIT: u8 = 1;

/// Opcode: switch the receiver on or off.
pub const OP_SET_RECEIVER: u8 = 2;

/// Exact frame length of a transmit command: opcode + 4 value + 2 length.
pub const TRANSMIT_FRAME_LEN: usize = 7;

/// Frames of this length or shorter never carry a command.
pub const MAX_IGNORED_LEN: usize = 2;

/// An RF code: value plus the number of bits to send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RfCode {
    pub value: u32,
    pub bit_length: u16,
}

impl RfCode {
    pub const fn new(value: u32, bit_length: u16) -> Self {
        Self { value, bit_length }
    }
}

/// Commands the host can send to the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeCommand {
    /// Transmit a code over RF.
    Transmit(RfCode),
    /// Enable (`true`) or disable (`false`) the RF receiver.
    SetReceiver(bool),
}

/// Why a frame was not turned into a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Frame too short to hold opcode and arguments.
    TooShort { len: usize },
    /// Transmit frame of the wrong size.
    BadTransmitLength { len: usize },
    /// Opcode outside the supported set.
    UnknownOpcode(u8),
}

impl core::fmt::Display for Rejection {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::TooShort { len } => write!(f, "frame too short ({len} bytes)"),
            Self::BadTransmitLength { len } => {
                write!(f, "transmit frame is {len} bytes, expected {TRANSMIT_FRAME_LEN}")
            }
            Self::UnknownOpcode(op) => write!(f, "unknown opcode {op}"),
        }
    }
}

impl BridgeCommand {
    /// Interpret a completed frame.
    pub fn decode(frame: &[u8]) -> core::result::Result<Self, Rejection> {
        let len = frame.len();
        if len <= MAX_IGNORED_LEN {
            return Err(Rejection::TooShort { len });
        }

        match frame[0] {
            OP_TRANSMIT => {
                if len != TRANSMIT_FRAME_LEN {
                    return Err(Rejection::BadTransmitLength { len });
                }
                let value = u32::from_be_bytes([frame[1], frame[2], frame[3], frame[4]]);
                let bit_length = u16::from_be_bytes([frame[5], frame[6]]);
                Ok(Self::Transmit(RfCode { value, bit_length }))
            }
            OP_SET_RECEIVER => Ok(Self::SetReceiver(frame[1] != 0)),
            op => Err(Rejection::UnknownOpcode(op)),
        }
    }

    /// Encode as a frame body (without header).
    ///
    /// `SetReceiver` is padded to three bytes, since shorter frames are
    /// dropped by the bridge.
    pub fn encode(&self) -> Frame {
        let mut bytes = [0u8; TRANSMIT_FRAME_LEN];
        let len = match *self {
            Self::Transmit(code) => {
                bytes[0] = OP_TRANSMIT;
                bytes[1..5].copy_from_slice(&code.value.to_be_bytes());
                bytes[5..7].copy_from_slice(&code.bit_length.to_be_bytes());
                TRANSMIT_FRAME_LEN
            }
            Self::SetReceiver(on) => {
                bytes[0] = OP_SET_RECEIVER;
                bytes[1] = u8::from(on);
                MAX_IGNORED_LEN + 1
            }
        };
        Frame::from_slice(&bytes[..len]).unwrap_or_default()
    }

    /// Encode header plus body, ready to write to the serial link.
    pub fn to_wire(&self) -> heapless::Vec<u8, MAX_WIRE_LEN> {
        let mut out = heapless::Vec::new();
        // Cannot fail: both bodies are well under MAX_PAYLOAD.
        let _ = encode_message(&self.encode(), &mut out);
        out
    }
}

/// Prefix `payload` with its header byte.
///
/// Payloads longer than [`MAX_PAYLOAD`] are rejected with
/// [`Error::MessageTooLong`].
pub fn encode_message(payload: &[u8], out: &mut heapless::Vec<u8, MAX_WIRE_LEN>) -> Result<()> {
    let header = header_for(payload.len()).ok_or(Error::MessageTooLong(payload.len()))?;
    out.clear();
    let _ = out.push(header);
    // Capacity is MAX_WIRE_LEN and the payload fits the header nibble.
    let _ = out.extend_from_slice(payload);
    Ok(())
}
