//! Serial wire protocol between the host and the RF bridge.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                     Serial protocol                        │
//! │                                                            │
//! │  host ──▶ [0x40|N][opcode][payload…]  ──▶ FrameReader      │
//! │                                              │             │
//! │                                              ▼             │
//! │                                     BridgeCommand::decode  │
//! │                                                            │
//! │  host ◀── ['R'][v0 v1 v2 v3]['\n']   ◀── encode_report     │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! Inbound frames carry their payload length in the low nibble of a
//! header byte from the reserved range `0x40..0x50`.  Outbound reports
//! have a fixed size and no length byte.  Values are big-endian on the
//! way in and little-endian on the way out; both orders are part of the
//! wire format.

pub mod frame;
pub mod report;
pub mod transport;

/// First header byte value (inclusive).
pub const HEADER_BASE: u8 = 0x40;

/// End of the header range (exclusive).
pub const HEADER_END: u8 = 0x50;

/// Low-nibble mask extracting the payload length from a header byte.
pub const LENGTH_MASK: u8 = 0x0F;

/// Maximum payload bytes one frame can declare.
pub const MAX_PAYLOAD: usize = 15;

/// Largest inbound frame on the wire: header plus a full payload.
pub const MAX_WIRE_LEN: usize = MAX_PAYLOAD + 1;

/// Whether `byte` starts a new frame when the reader is idle.
pub const fn is_header(byte: u8) -> bool {
    byte >= HEADER_BASE && byte < HEADER_END
}

/// Build the header byte for a payload of `len` bytes.
///
/// Returns `None` if `len` does not fit in the low nibble.
pub const fn header_for(len: usize) -> Option<u8> {
    if len > MAX_PAYLOAD {
        None
    } else {
        Some(HEADER_BASE + len as u8)
    }
}
