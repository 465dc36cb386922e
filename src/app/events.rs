//! Outbound bridge events.
//!
//! The [`BridgeService`](super::service::BridgeService) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  They never reach the
//! host; the serial link only carries RF reports.

use super::commands::{Rejection, RfCode};

/// Structured events emitted by the bridge core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeEvent {
    /// The service has started (carries the initial receiver state).
    Started { receiver_enabled: bool },

    /// A code from the receiver was reported to the host.
    CodeReported(u32),

    /// A code was keyed out on the transmitter at the host's request.
    CodeTransmitted(RfCode),

    /// The host switched the receiver on or off.
    ReceiverChanged(bool),

    /// A complete frame did not form a command and was dropped.
    FrameRejected(Rejection),
}
