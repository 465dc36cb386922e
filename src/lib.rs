//! rcsnitch: serial bridge core and host tooling for a 433 MHz RF
//! transceiver.
//!
//! The device side ([`app`], [`protocol`]) is a pure-logic bridge between
//! a framed serial channel and an RF receiver/transmitter pair, driven
//! entirely through port traits.  The host side ([`host`], [`codes`])
//! frames commands, decodes RF reports and keeps capture logs.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod codes;
pub mod config;
pub mod error;
pub mod host;
pub mod protocol;

pub use error::{Error, Result};
