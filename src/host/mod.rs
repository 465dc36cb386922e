//! Host-side tooling for the RF bridge.
//!
//! - [`link`]: command/report client over an open serial port.
//! - [`capture`]: sniff capture files and usage profiles.

pub mod capture;
pub mod link;
