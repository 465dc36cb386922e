//! Port traits: the hexagonal boundary between the bridge logic and the radio.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ BridgeService (domain)
//! ```
//!
//! The RF modulation layer (an rc-switch style driver on the board)
//! implements [`RfReceiver`] and [`RfTransmitter`].  The
//! [`BridgeService`](super::service::BridgeService) consumes them via
//! generics, so the protocol core never touches radio timing directly.

// ───────────────────────────────────────────────────────────────
// Receiver port (driven adapter: radio → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the decoded output of the 433MHz receiver.
///
/// The receiver latches the last decoded code and raises an "available"
/// flag until [`reset_available`](Self::reset_available) is called.
pub trait RfReceiver {
    /// Start decoding incoming RF. Enabling twice must be harmless.
    fn enable(&mut self);

    /// Stop decoding incoming RF. Disabling twice must be harmless.
    fn disable(&mut self);

    /// Whether a decoded code is waiting.
    fn is_available(&self) -> bool;

    /// The latched code value. Meaningful only while available.
    fn received_value(&self) -> u32;

    /// Clear the available flag.
    fn reset_available(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Transmitter port (driven adapter: domain → radio)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the 433MHz transmitter.
pub trait RfTransmitter {
    /// Send the low `bit_length` bits of `value`.
    ///
    /// Synchronous: returns once the code has been keyed out.
    fn send(&mut self, value: u32, bit_length: u16);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The bridge emits structured [`BridgeEvent`](super::events::BridgeEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::BridgeEvent);
}
