//! Mock radio, serial and sink adapters for integration tests.
//!
//! Records every port call so tests can assert on the full history
//! without a transceiver attached.

use std::collections::VecDeque;
use std::io::{self, Read, Write};

use rcsnitch::app::events::BridgeEvent;
use rcsnitch::app::ports::{EventSink, RfReceiver, RfTransmitter};
use rcsnitch::protocol::transport::Transport;

// ── RF call record ────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RfCall {
    Enable,
    Disable,
    Send { value: u32, bit_length: u16 },
}

// ── MockRf ────────────────────────────────────────────────────

/// Receiver/transmitter pair.
///
/// Like a real transceiver, a transmission is picked up by its own
/// receiver while that receiver is enabled.
pub struct MockRf {
    pub calls: Vec<RfCall>,
    pub enabled: bool,
    available: bool,
    value: u32,
}

#[allow(dead_code)]
impl MockRf {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            enabled: false,
            available: false,
            value: 0,
        }
    }

    /// A code arrives over the air. Ignored while the receiver is off.
    pub fn receive(&mut self, value: u32) {
        if self.enabled {
            self.value = value;
            self.available = true;
        }
    }

    pub fn sends(&self) -> Vec<(u32, u16)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                RfCall::Send { value, bit_length } => Some((*value, *bit_length)),
                _ => None,
            })
            .collect()
    }
}

impl Default for MockRf {
    fn default() -> Self {
        Self::new()
    }
}

impl RfReceiver for MockRf {
    fn enable(&mut self) {
        self.enabled = true;
        self.calls.push(RfCall::Enable);
    }

    fn disable(&mut self) {
        self.enabled = false;
        self.calls.push(RfCall::Disable);
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn received_value(&self) -> u32 {
        self.value
    }

    fn reset_available(&mut self) {
        self.available = false;
    }
}

impl RfTransmitter for MockRf {
    fn send(&mut self, value: u32, bit_length: u16) {
        self.calls.push(RfCall::Send { value, bit_length });
        // Self-echo.
        self.receive(value);
    }
}

// ── MockSerial ────────────────────────────────────────────────

/// Device end of the serial link.
pub struct MockSerial {
    pub rx: VecDeque<u8>,
    pub tx: Vec<u8>,
    pub fail_writes: bool,
}

#[allow(dead_code)]
impl MockSerial {
    pub fn new() -> Self {
        Self {
            rx: VecDeque::new(),
            tx: Vec::new(),
            fail_writes: false,
        }
    }

    pub fn inject(&mut self, bytes: &[u8]) {
        self.rx.extend(bytes.iter().copied());
    }
}

impl Default for MockSerial {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for MockSerial {
    type Error = &'static str;

    fn read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        Ok(self.rx.pop_front())
    }

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        if self.fail_writes {
            return Err("tx buffer full");
        }
        self.tx.extend_from_slice(data);
        Ok(())
    }
}

// ── HostPort ──────────────────────────────────────────────────

/// Host end of the serial link: reads what the device wrote, records
/// what the host writes.
#[derive(Default)]
pub struct HostPort {
    pub rx: VecDeque<u8>,
    pub tx: Vec<u8>,
}

impl Read for HostPort {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = buf.len().min(self.rx.len());
        for (slot, byte) in buf.iter_mut().zip(self.rx.drain(..n)) {
            *slot = byte;
        }
        Ok(n)
    }
}

impl Write for HostPort {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.tx.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<BridgeEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&BridgeEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &BridgeEvent) {
        self.events.push(event.clone());
    }
}
