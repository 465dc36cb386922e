//! Bridge service: the hexagonal core.
//!
//! [`BridgeService`] owns the frame reader and the receiver state.  It
//! runs one cooperative poll iteration at a time; all I/O flows through
//! port traits injected at call sites, making the whole bridge testable
//! with mock adapters.
//!
//! ```text
//!  RfReceiver ──▶ ┌─────────────────────────┐ ──▶ Transport (reports)
//!                 │      BridgeService      │
//! RfTransmitter ◀─│  FrameReader · Dispatch │ ◀── Transport (frames)
//!                 └─────────────────────────┘ ──▶ EventSink
//! ```

use log::{debug, info, warn};

use crate::config::BridgeConfig;
use crate::protocol::frame::{Feed, FrameReader, ReaderState};
use crate::protocol::report::encode_report;
use crate::protocol::transport::Transport;

use super::commands::BridgeCommand;
use super::events::BridgeEvent;
use super::ports::{EventSink, RfReceiver, RfTransmitter};

// ───────────────────────────────────────────────────────────────
// Counters
// ───────────────────────────────────────────────────────────────

/// Running counters, reset only on power cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BridgeStats {
    pub polls: u64,
    pub bytes_discarded: u64,
    pub frames_dispatched: u64,
    pub frames_rejected: u64,
    pub codes_reported: u64,
    pub codes_transmitted: u64,
    pub read_errors: u64,
    pub write_errors: u64,
}

// ───────────────────────────────────────────────────────────────
// BridgeService
// ───────────────────────────────────────────────────────────────

/// Orchestrates the inbound command path and the outbound report path.
pub struct BridgeService {
    config: BridgeConfig,
    reader: FrameReader,
    receiver_enabled: bool,
    stats: BridgeStats,
}

impl BridgeService {
    /// Construct the service from configuration.
    ///
    /// Does **not** touch the radio; call [`start`](Self::start) next.
    pub fn new(config: BridgeConfig) -> Self {
        Self {
            config,
            reader: FrameReader::new(),
            receiver_enabled: false,
            stats: BridgeStats::default(),
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Bring the receiver into its boot state.
    pub fn start(&mut self, rf: &mut impl RfReceiver, sink: &mut impl EventSink) {
        self.set_receiver(self.config.receiver_enabled_at_boot, rf);
        sink.emit(&BridgeEvent::Started {
            receiver_enabled: self.receiver_enabled,
        });
        info!(
            "Bridge started (receiver {})",
            if self.receiver_enabled { "on" } else { "off" }
        );
    }

    // ── Per-iteration orchestration ───────────────────────────

    /// Run one poll iteration: report a pending RF code, then consume
    /// up to `max_bytes_per_poll` serial bytes.
    ///
    /// The `rf` parameter satisfies **both** [`RfReceiver`] and
    /// [`RfTransmitter`], since the transmit path must also reset the
    /// receiver's pending flag.
    pub fn poll<R, T>(
        &mut self,
        rf: &mut R,
        serial: &mut T,
        sink: &mut impl EventSink,
    ) where
        R: RfReceiver + RfTransmitter,
        T: Transport,
    {
        self.stats.polls += 1;
        self.poll_receiver(rf, serial, sink);
        self.poll_serial(rf, serial, sink);
    }

    /// Report a newly received code, if any. Returns the reported value.
    pub fn poll_receiver<T: Transport>(
        &mut self,
        rf: &mut impl RfReceiver,
        serial: &mut T,
        sink: &mut impl EventSink,
    ) -> Option<u32> {
        if !rf.is_available() {
            return None;
        }

        let value = rf.received_value();
        if let Err(e) = serial.write(&encode_report(value)) {
            self.stats.write_errors += 1;
            warn!("Report for {} dropped: {:?}", value, e);
        }
        rf.reset_available();

        self.stats.codes_reported += 1;
        sink.emit(&BridgeEvent::CodeReported(value));
        Some(value)
    }

    /// Consume up to `max_bytes_per_poll` bytes from the serial port.
    pub fn poll_serial<R, T>(&mut self, rf: &mut R, serial: &mut T, sink: &mut impl EventSink)
    where
        R: RfReceiver + RfTransmitter,
        T: Transport,
    {
        for _ in 0..self.config.max_bytes_per_poll {
            match serial.read_byte() {
                Ok(Some(byte)) => self.feed_byte(byte, rf, sink),
                Ok(None) => break,
                Err(e) => {
                    self.stats.read_errors += 1;
                    warn!("Serial read failed: {:?}", e);
                    break;
                }
            }
        }
    }

    /// Feed one inbound byte through the frame reader, dispatching a
    /// completed frame immediately.
    pub fn feed_byte(
        &mut self,
        byte: u8,
        rf: &mut (impl RfReceiver + RfTransmitter),
        sink: &mut impl EventSink,
    ) {
        match self.reader.push(byte) {
            Feed::Discarded => self.stats.bytes_discarded += 1,
            Feed::Header(len) => debug!("Frame header, {} payload bytes", len),
            Feed::Buffered => {}
            Feed::Complete(frame) => self.dispatch(&frame, rf, sink),
        }
    }

    // ── Command handling ──────────────────────────────────────

    /// Interpret a completed frame and run its command.
    ///
    /// Frames that do not decode are dropped; nothing is sent back.
    pub fn dispatch(
        &mut self,
        frame: &[u8],
        rf: &mut (impl RfReceiver + RfTransmitter),
        sink: &mut impl EventSink,
    ) {
        match BridgeCommand::decode(frame) {
            Ok(cmd) => {
                self.stats.frames_dispatched += 1;
                self.handle_command(cmd, rf, sink);
            }
            Err(rejection) => {
                self.stats.frames_rejected += 1;
                debug!("Frame dropped: {}", rejection);
                sink.emit(&BridgeEvent::FrameRejected(rejection));
            }
        }
    }

    /// Execute a decoded command.
    pub fn handle_command(
        &mut self,
        cmd: BridgeCommand,
        rf: &mut (impl RfReceiver + RfTransmitter),
        sink: &mut impl EventSink,
    ) {
        match cmd {
            BridgeCommand::Transmit(code) => {
                rf.send(code.value, code.bit_length);
                // Our own transmission must not come back as a report.
                rf.reset_available();
                self.stats.codes_transmitted += 1;
                sink.emit(&BridgeEvent::CodeTransmitted(code));
            }
            BridgeCommand::SetReceiver(on) => {
                self.set_receiver(on, rf);
                sink.emit(&BridgeEvent::ReceiverChanged(on));
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Whether the receiver was last switched on.
    pub fn receiver_enabled(&self) -> bool {
        self.receiver_enabled
    }

    /// Current frame reader state.
    pub fn reader_state(&self) -> ReaderState {
        self.reader.state()
    }

    pub fn stats(&self) -> BridgeStats {
        self.stats
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    // ── Internal ──────────────────────────────────────────────

    fn set_receiver(&mut self, on: bool, rf: &mut impl RfReceiver) {
        if on {
            rf.enable();
        } else {
            rf.disable();
        }
        if on != self.receiver_enabled {
            info!("Receiver {}", if on { "enabled" } else { "disabled" });
        }
        self.receiver_enabled = on;
    }
}
