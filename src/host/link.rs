//! Host end of the serial link.
//!
//! [`HostLink`] wraps any `Read + Write` port (a [`TtyPort`] in
//! production, an in-memory buffer in tests) and speaks the bridge
//! protocol: it frames outgoing commands and decodes incoming RF reports.
//!
//! Reads are expected to time out when the bridge is quiet.  A timed-out
//! read (`TimedOut`, `WouldBlock` or a zero-length read) ends a sniff;
//! any other I/O error is returned.
//!
//! [`TtyPort`]: crate::adapters::tty::TtyPort

use std::collections::VecDeque;
use std::io::{self, Read, Write};

use log::debug;

use crate::app::commands::{BridgeCommand, RfCode, encode_message};
use crate::codes::{BinaryCode, TriState};
use crate::error::Result;
use crate::protocol::report::ReportDecoder;

const READ_CHUNK: usize = 64;

/// Command/report client for one attached bridge.
pub struct HostLink<P> {
    port: P,
    decoder: ReportDecoder,
    /// Reports decoded but not yet handed out.
    pending: VecDeque<u32>,
}

impl<P: Read + Write> HostLink<P> {
    pub fn new(port: P) -> Self {
        Self {
            port,
            decoder: ReportDecoder::new(),
            pending: VecDeque::new(),
        }
    }

    pub fn get_ref(&self) -> &P {
        &self.port
    }

    pub fn get_mut(&mut self) -> &mut P {
        &mut self.port
    }

    pub fn into_inner(self) -> P {
        self.port
    }

    // ── Commands ──────────────────────────────────────────────

    /// Frame `payload` and write it to the bridge.
    ///
    /// Payloads longer than 15 bytes fail with
    /// [`Error::MessageTooLong`](crate::error::Error::MessageTooLong)
    /// and nothing is written.
    pub fn send_message(&mut self, payload: &[u8]) -> Result<()> {
        let mut wire = heapless::Vec::new();
        encode_message(payload, &mut wire)?;
        self.port.write_all(&wire)?;
        self.port.flush()?;
        debug!("Sent frame {:02X?}", wire.as_slice());
        Ok(())
    }

    pub fn send_command(&mut self, cmd: BridgeCommand) -> Result<()> {
        self.send_message(&cmd.encode())
    }

    pub fn set_receiver(&mut self, on: bool) -> Result<()> {
        self.send_command(BridgeCommand::SetReceiver(on))
    }

    pub fn enable_receiver(&mut self) -> Result<()> {
        self.set_receiver(true)
    }

    pub fn disable_receiver(&mut self) -> Result<()> {
        self.set_receiver(false)
    }

    /// Transmit `value` as a `bit_length`-bit code.
    pub fn send_decimal(&mut self, value: u32, bit_length: u16) -> Result<()> {
        self.send_command(BridgeCommand::Transmit(RfCode::new(value, bit_length)))
    }

    pub fn send_tri_state(&mut self, code: &TriState) -> Result<()> {
        self.send_command(BridgeCommand::Transmit(code.to_rf_code()))
    }

    pub fn send_binary(&mut self, code: &BinaryCode) -> Result<()> {
        self.send_command(BridgeCommand::Transmit(code.to_rf_code()))
    }

    // ── Reports ───────────────────────────────────────────────

    /// Wait for one RF report. Returns `None` if the read timed out first.
    pub fn sniff_single(&mut self) -> Result<Option<u32>> {
        loop {
            if let Some(value) = self.pending.pop_front() {
                return Ok(Some(value));
            }
            if !self.fill()? {
                return Ok(None);
            }
        }
    }

    /// Collect every report until the bridge goes quiet.
    pub fn sniff_multiple(&mut self) -> Result<Vec<u32>> {
        while self.fill()? {}
        Ok(self.pending.drain(..).collect())
    }

    /// Read one chunk into the decoder. Returns `false` on timeout.
    fn fill(&mut self) -> Result<bool> {
        let mut chunk = [0u8; READ_CHUNK];
        let n = loop {
            match self.port.read(&mut chunk) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) if matches!(e.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock) => {
                    return Ok(false);
                }
                Err(e) => return Err(e.into()),
            }
        };
        if n == 0 {
            return Ok(false);
        }
        self.pending.extend(self.decoder.push_all(&chunk[..n]));
        Ok(true)
    }
}
