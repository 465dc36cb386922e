//! Transport abstraction: the device's byte-oriented serial channel.
//!
//! Concrete implementations live with the board support code (UART,
//! USB CDC).  The bridge service is generic over `Transport`, so tests
//! drive it with in-memory mocks.

/// Non-blocking duplex byte channel.
pub trait Transport {
    /// Error type for this transport.
    type Error: core::fmt::Debug;

    /// Read one byte if one is waiting. Never blocks.
    fn read_byte(&mut self) -> Result<Option<u8>, Self::Error>;

    /// Queue `data` for transmission.
    ///
    /// Whatever the transport cannot buffer is lost; callers do not retry.
    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error>;
}

/// A null transport that discards all writes and never reads.
/// Useful when the bridge runs without a host attached.
pub struct NullTransport;

impl Transport for NullTransport {
    type Error = ();

    fn read_byte(&mut self) -> Result<Option<u8>, ()> {
        Ok(None)
    }

    fn write(&mut self, _data: &[u8]) -> Result<(), ()> {
        Ok(())
    }
}
