//! Adapters: concrete implementations of the port traits.
//!
//! | Adapter    | Implements   | Connects to                 |
//! |------------|--------------|-----------------------------|
//! | `log_sink` | EventSink    | `log` facade                |
//! | `tty`      | Read + Write | unix serial device (termios)|

pub mod log_sink;
#[cfg(unix)]
pub mod tty;
