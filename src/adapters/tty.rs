//! Raw serial port adapter (unix).
//!
//! Opens a tty device, puts it in raw 8N1 mode at the requested baud rate
//! and sets a read timeout through termios `VMIN = 0` / `VTIME`.  A read
//! that sees no byte within the timeout returns `Ok(0)`, which
//! [`HostLink`](crate::host::link::HostLink) treats as "bridge quiet".

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::os::fd::AsRawFd;
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;
use std::time::Duration;

use log::debug;

/// `VTIME` is one byte of deciseconds.
const MAX_VTIME_DECISECONDS: u64 = 255;

/// An open serial device in raw mode.
#[derive(Debug)]
pub struct TtyPort {
    file: File,
    timeout: Duration,
}

impl TtyPort {
    /// Open `path` at `baud_rate` with the given read timeout.
    ///
    /// Timeouts longer than 25.5 s are capped; a zero timeout makes every
    /// read return immediately.
    pub fn open(path: impl AsRef<Path>, baud_rate: u32, timeout: Duration) -> io::Result<Self> {
        let path = path.as_ref();
        let speed = baud_constant(baud_rate).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("unsupported baud rate {baud_rate}"),
            )
        })?;

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(libc::O_NOCTTY)
            .open(path)?;
        let port = Self { file, timeout };
        port.configure(speed)?;
        debug!(
            "Opened {} at {} baud (timeout {:?})",
            path.display(),
            baud_rate,
            port.timeout
        );
        Ok(port)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn configure(&self, speed: libc::speed_t) -> io::Result<()> {
        let fd = self.file.as_raw_fd();

        // SAFETY: termios is plain old data; an all-zero value is valid and
        // is fully overwritten by tcgetattr below.
        let mut tio: libc::termios = unsafe { std::mem::zeroed() };

        // SAFETY: `fd` is an open descriptor owned by `self.file` and `tio`
        // is a valid writable termios.
        if unsafe { libc::tcgetattr(fd, &mut tio) } != 0 {
            return Err(io::Error::last_os_error());
        }

        // SAFETY: `tio` is a valid termios obtained from tcgetattr.
        unsafe { libc::cfmakeraw(&mut tio) };
        tio.c_cflag |= libc::CLOCAL | libc::CREAD;
        tio.c_cc[libc::VMIN] = 0;
        tio.c_cc[libc::VTIME] = vtime(self.timeout);

        // SAFETY: as above; speed is one of the libc B* constants.
        let rc = unsafe {
            let rc = libc::cfsetispeed(&mut tio, speed);
            if rc == 0 { libc::cfsetospeed(&mut tio, speed) } else { rc }
        };
        if rc != 0 {
            return Err(io::Error::last_os_error());
        }

        // SAFETY: `fd` is open and `tio` is a fully initialised termios.
        if unsafe { libc::tcsetattr(fd, libc::TCSANOW, &tio) } != 0 {
            return Err(io::Error::last_os_error());
        }

        // Drop whatever the device sent before we configured it.
        // SAFETY: `fd` is open.
        unsafe { libc::tcflush(fd, libc::TCIOFLUSH) };
        Ok(())
    }
}

impl Read for TtyPort {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

impl Write for TtyPort {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        // SAFETY: the descriptor is owned by `self.file` and open.
        if unsafe { libc::tcdrain(self.file.as_raw_fd()) } != 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }
}

fn vtime(timeout: Duration) -> libc::cc_t {
    let deciseconds = timeout.as_millis().div_ceil(100) as u64;
    deciseconds.min(MAX_VTIME_DECISECONDS) as libc::cc_t
}

fn baud_constant(baud_rate: u32) -> Option<libc::speed_t> {
    let speed = match baud_rate {
        1200 => libc::B1200,
        2400 => libc::B2400,
        4800 => libc::B4800,
        9600 => libc::B9600,
        19_200 => libc::B19200,
        38_400 => libc::B38400,
        57_600 => libc::B57600,
        115_200 => libc::B115200,
        230_400 => libc::B230400,
        _ => return None,
    };
    Some(speed)
}
