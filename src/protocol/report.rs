//! Outbound RF reports (device → host).
//!
//! ```text
//! ┌──────────┬───────────────────────┬──────────────┐
//! │ Tag (1B) │ Value (4B, LE u32)    │ Term (1B)    │
//! │ 'R'      │ LSB first             │ '\n'         │
//! └──────────┴───────────────────────┴──────────────┘
//! ```
//!
//! There is no length byte: the host knows the report size.  Because
//! value bytes may themselves equal `'\n'`, the host side must not split
//! the stream on newlines; [`ReportDecoder`] scans for whole reports.

use heapless::Vec;

/// Tag byte opening every RF report.
pub const REPORT_TAG: u8 = b'R';

/// Terminator closing every RF report.
pub const REPORT_TERMINATOR: u8 = b'\n';

/// Exact size of one report on the wire.
pub const REPORT_LEN: usize = 6;

/// Encode a received RF value as a report.
pub fn encode_report(value: u32) -> [u8; REPORT_LEN] {
    let v = value.to_le_bytes();
    [REPORT_TAG, v[0], v[1], v[2], v[3], REPORT_TERMINATOR]
}

/// Streaming report decoder for the host side of the link.
#[derive(Debug, Default)]
pub struct ReportDecoder {
    buf: Vec<u8, REPORT_LEN>,
    /// Bytes skipped while searching for a report boundary.
    skipped: u32,
}

impl ReportDecoder {
    pub fn new() -> Self {
        Self {
            buf: Vec::new(),
            skipped: 0,
        }
    }

    /// Feed one byte. Returns the decoded value when a report completes.
    pub fn push(&mut self, byte: u8) -> Option<u32> {
        if self.buf.is_empty() && byte != REPORT_TAG {
            self.skipped = self.skipped.saturating_add(1);
            return None;
        }

        let _ = self.buf.push(byte);
        if self.buf.len() < REPORT_LEN {
            return None;
        }

        if self.buf[REPORT_LEN - 1] == REPORT_TERMINATOR {
            let value = u32::from_le_bytes([self.buf[1], self.buf[2], self.buf[3], self.buf[4]]);
            self.buf.clear();
            return Some(value);
        }

        // Misaligned: drop the leading tag and rescan from the next tag byte.
        self.resync();
        None
    }

    /// Feed a slice and collect every completed report value.
    pub fn push_all(&mut self, bytes: &[u8]) -> std::vec::Vec<u32> {
        bytes.iter().filter_map(|&b| self.push(b)).collect()
    }

    /// Number of stray bytes discarded so far.
    pub fn skipped(&self) -> u32 {
        self.skipped
    }

    /// Discard a partially collected report.
    pub fn reset(&mut self) {
        self.buf.clear();
    }

    fn resync(&mut self) {
        let pending: Vec<u8, REPORT_LEN> = self.buf.clone();
        self.buf.clear();
        self.skipped = self.skipped.saturating_add(1);
        for &b in &pending[1..] {
            if self.buf.is_empty() && b != REPORT_TAG {
                self.skipped = self.skipped.saturating_add(1);
                continue;
            }
            let _ = self.buf.push(b);
        }
    }
}
