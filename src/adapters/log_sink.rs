//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured bridge events to the
//! `log` facade (the board's serial console, or stderr on a host build).

use log::{debug, info};

use crate::app::events::BridgeEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`BridgeEvent`].
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &BridgeEvent) {
        match event {
            BridgeEvent::Started { receiver_enabled } => {
                info!("START | receiver={}", if *receiver_enabled { "on" } else { "off" });
            }
            BridgeEvent::CodeReported(value) => {
                info!("RX    | value={} (0x{:08X})", value, value);
            }
            BridgeEvent::CodeTransmitted(code) => {
                info!("TX    | value={} bits={}", code.value, code.bit_length);
            }
            BridgeEvent::ReceiverChanged(on) => {
                info!("RECV  | {}", if *on { "enabled" } else { "disabled" });
            }
            BridgeEvent::FrameRejected(reason) => {
                debug!("DROP  | {}", reason);
            }
        }
    }
}
