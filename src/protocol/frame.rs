//! Header-length frame reader.
//!
//! Wire format:
//! ```text
//! ┌─────────────────┬───────────────────────────────┐
//! │ Header (1B)     │ Payload (N B, N = header & 15)│
//! │ 0x40..=0x4F     │ opcode, arguments…            │
//! └─────────────────┴───────────────────────────────┘
//! ```
//!
//! The reader is fed one byte at a time and yields a [`Frame`] once the
//! declared payload has arrived.  Bytes may be spread across any number
//! of poll cycles.  While idle, bytes outside the header range are
//! discarded.  While a frame is in progress every byte is payload, even
//! one that looks like a header, and there is no timeout: a truncated
//! frame stays parked until enough bytes arrive to fill it.

use core::ops::Deref;

use heapless::Vec;

use super::{LENGTH_MASK, MAX_PAYLOAD, is_header};

/// One complete inbound frame: opcode byte plus arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    bytes: Vec<u8, MAX_PAYLOAD>,
}

impl Frame {
    /// Copy `bytes` into a frame. Returns `None` if longer than [`MAX_PAYLOAD`].
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        Vec::from_slice(bytes).ok().map(|bytes| Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Opcode byte, if the frame is non-empty.
    pub fn opcode(&self) -> Option<u8> {
        self.bytes.first().copied()
    }

    /// Everything after the opcode.
    pub fn payload(&self) -> &[u8] {
        self.bytes.get(1..).unwrap_or(&[])
    }
}

impl Deref for Frame {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.bytes
    }
}

/// Observable reader state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderState {
    /// No frame in progress; the next header-range byte starts one.
    Idle,
    /// A header was accepted and `collected` of `expected` bytes are buffered.
    Accumulating { expected: u8, collected: u8 },
}

/// What happened to a single byte fed into the reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feed {
    /// Byte ignored while idle (not a header).
    Discarded,
    /// Header accepted; carries the declared payload length.
    Header(u8),
    /// Payload byte buffered, frame still incomplete.
    Buffered,
    /// Payload byte completed the frame.
    Complete(Frame),
}

/// Streaming frame reader.
///
/// Holds the target length and the assembly buffer; the buffer's length
/// is the assembly cursor, so `cursor <= len <= MAX_PAYLOAD` always holds.
#[derive(Debug, Default)]
pub struct FrameReader {
    len: u8,
    buf: Vec<u8, MAX_PAYLOAD>,
}

impl FrameReader {
    pub fn new() -> Self {
        Self {
            len: 0,
            buf: Vec::new(),
        }
    }

    /// Feed one byte into the reader.
    pub fn push(&mut self, byte: u8) -> Feed {
        if self.is_idle() {
            if !is_header(byte) {
                return Feed::Discarded;
            }
            self.len = byte & LENGTH_MASK;
            self.buf.clear();
            return Feed::Header(self.len);
        }

        // `len <= MAX_PAYLOAD` and `cursor < len` here, so the push cannot overflow.
        let _ = self.buf.push(byte);
        if self.buf.len() < usize::from(self.len) {
            return Feed::Buffered;
        }

        let frame = Frame {
            bytes: core::mem::take(&mut self.buf),
        };
        self.reset();
        Feed::Complete(frame)
    }

    /// Feed a slice and collect every frame it completes.
    pub fn push_all(&mut self, bytes: &[u8]) -> std::vec::Vec<Frame> {
        bytes
            .iter()
            .filter_map(|&b| match self.push(b) {
                Feed::Complete(frame) => Some(frame),
                _ => None,
            })
            .collect()
    }

    /// Drop any partial frame and return to idle.
    pub fn reset(&mut self) {
        self.len = 0;
        self.buf.clear();
    }

    pub fn is_idle(&self) -> bool {
        self.buf.len() >= usize::from(self.len)
    }

    pub fn state(&self) -> ReaderState {
        if self.is_idle() {
            ReaderState::Idle
        } else {
            ReaderState::Accumulating {
                expected: self.len,
                collected: self.buf.len() as u8,
            }
        }
    }
}
