//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a specific subsystem
//! against mock adapters.  Everything runs on the host with no
//! transceiver attached.

mod bridge_service_tests;
mod host_device_tests;
mod mock_hw;
