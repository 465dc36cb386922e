//! Application core: pure bridge logic, zero I/O.
//!
//! This module contains the rules for the RF bridge: command decoding,
//! dispatch, self-echo suppression and report emission.  All interaction
//! with the radio happens through **port traits** defined in [`ports`],
//! keeping this layer fully testable without real hardware.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
