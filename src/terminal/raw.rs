//! Raw mode and window size via termios.
//!
//! # Safety
//! This module uses unsafe code for FFI calls to libc termios and ioctl.

#![allow(unsafe_code)]
#![allow(clippy::borrow_as_ptr)]

use std::io;
use std::os::unix::io::{AsRawFd, RawFd};

/// Terminal attributes saved on entry to raw mode, restored on drop.
#[derive(Debug)]
pub struct RawModeGuard {
    fd: RawFd,
    original: libc::termios,
}

impl RawModeGuard {
    /// Put `fd` in raw mode with a read timeout of `read_timeout_ds`
    /// deciseconds.
    pub fn new<F: AsRawFd>(fd: &F, read_timeout_ds: u8) -> io::Result<Self> {
        if !is_tty(fd) {
            return Err(io::Error::other("input is not a terminal"));
        }
        let fd = fd.as_raw_fd();
        let original = get_termios(fd)?;
        set_termios(fd, &raw_attributes(original, read_timeout_ds))?;
        tracing::debug!(fd, read_timeout_ds, "entered raw mode");
        Ok(Self { fd, original })
    }

    fn restore(&self) -> io::Result<()> {
        set_termios(self.fd, &self.original)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

/// Derive raw-mode attributes from `original`.
///
/// Reads return after at most `read_timeout_ds` deciseconds with zero or one
/// byte (`VMIN = 0`), which lets a lone Escape be told apart from the start
/// of a sequence.
#[must_use]
pub fn raw_attributes(original: libc::termios, read_timeout_ds: u8) -> libc::termios {
    let mut raw = original;

    // No break signal, CR->NL translation, parity check, 8th-bit strip, or
    // flow control (Ctrl-S / Ctrl-Q must reach the editor).
    raw.c_iflag &= !(libc::BRKINT | libc::ICRNL | libc::INPCK | libc::ISTRIP | libc::IXON);
    raw.c_oflag &= !libc::OPOST;
    raw.c_cflag |= libc::CS8;
    // No echo, line buffering, Ctrl-V, or signal keys.
    raw.c_lflag &= !(libc::ECHO | libc::ICANON | libc::IEXTEN | libc::ISIG);

    raw.c_cc[libc::VMIN] = 0;
    raw.c_cc[libc::VTIME] = read_timeout_ds.max(1);
    raw
}

/// Put stdin in raw mode.
pub fn enable_raw_mode(read_timeout_ds: u8) -> io::Result<RawModeGuard> {
    RawModeGuard::new(&io::stdin(), read_timeout_ds)
}

/// Check if the given file descriptor is a TTY.
#[must_use]
pub fn is_tty<F: AsRawFd>(fd: &F) -> bool {
    // SAFETY: isatty is safe to call with any fd
    unsafe { libc::isatty(fd.as_raw_fd()) == 1 }
}

/// Window size of stdout as `(rows, cols)` via `TIOCGWINSZ`.
///
/// Zero dimensions are reported as an error so callers fall back to the
/// cursor-position query.
pub fn terminal_size() -> io::Result<(u16, u16)> {
    // SAFETY: winsize is plain old data
    let mut size: libc::winsize = unsafe { std::mem::zeroed() };

    // SAFETY: ioctl with TIOCGWINSZ writes into a valid winsize struct
    let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut size) };

    if result == -1 {
        Err(io::Error::last_os_error())
    } else if size.ws_col == 0 || size.ws_row == 0 {
        Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "terminal reported zero dimensions",
        ))
    } else {
        Ok((size.ws_row, size.ws_col))
    }
}

fn get_termios(fd: RawFd) -> io::Result<libc::termios> {
    // SAFETY: termios is plain old data
    let mut termios: libc::termios = unsafe { std::mem::zeroed() };

    // SAFETY: tcgetattr writes into a valid termios struct
    let result = unsafe { libc::tcgetattr(fd, &mut termios) };

    if result == -1 {
        Err(io::Error::last_os_error())
    } else {
        Ok(termios)
    }
}

fn set_termios(fd: RawFd, termios: &libc::termios) -> io::Result<()> {
    // SAFETY: tcsetattr reads from a valid termios struct
    let result = unsafe { libc::tcsetattr(fd, libc::TCSAFLUSH, termios) };

    if result == -1 {
        Err(io::Error::last_os_error())
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::os::unix::io::FromRawFd;

    fn zeroed() -> libc::termios {
        unsafe { std::mem::zeroed() }
    }

    // ============================================
    // Attribute Derivation
    // ============================================

    #[test]
    fn test_raw_attributes_clear_line_discipline() {
        let mut cooked = zeroed();
        cooked.c_iflag = libc::BRKINT | libc::ICRNL | libc::INPCK | libc::ISTRIP | libc::IXON;
        cooked.c_oflag = libc::OPOST;
        cooked.c_lflag = libc::ECHO | libc::ICANON | libc::IEXTEN | libc::ISIG;

        let raw = raw_attributes(cooked, 1);
        assert_eq!(raw.c_iflag, 0);
        assert_eq!(raw.c_oflag & libc::OPOST, 0);
        assert_eq!(raw.c_lflag, 0);
        assert_eq!(raw.c_cflag & libc::CS8, libc::CS8);
    }

    #[test]
    fn test_raw_attributes_keep_unrelated_flags() {
        let mut cooked = zeroed();
        cooked.c_lflag = libc::ECHO | libc::ECHOE;
        let raw = raw_attributes(cooked, 1);
        assert_eq!(raw.c_lflag, libc::ECHOE);
    }

    #[test]
    fn test_raw_attributes_set_read_timeout() {
        let raw = raw_attributes(zeroed(), 3);
        assert_eq!(raw.c_cc[libc::VMIN], 0);
        assert_eq!(raw.c_cc[libc::VTIME], 3);
        // A zero timeout would turn reads into a busy poll.
        assert_eq!(raw_attributes(zeroed(), 0).c_cc[libc::VTIME], 1);
    }

    // ============================================
    // Non-TTY Behaviour
    // ============================================

    #[test]
    fn test_pipes_are_not_ttys() {
        let (read_fd, write_fd) = create_pipe().expect("Failed to create pipe");
        assert!(!is_tty(&read_fd));
        assert!(!is_tty(&write_fd));
    }

    #[test]
    fn test_raw_mode_on_pipe_fails() {
        let (read_fd, _write_fd) = create_pipe().expect("Failed to create pipe");
        let err = RawModeGuard::new(&read_fd, 1).unwrap_err();
        assert_eq!(err.to_string(), "input is not a terminal");
    }

    #[test]
    fn test_termios_calls_fail_on_invalid_fd() {
        assert!(get_termios(-1).is_err());
        assert!(set_termios(-1, &zeroed()).is_err());
    }

    #[test]
    fn test_terminal_size_is_positive_when_available() {
        if let Ok((rows, cols)) = terminal_size() {
            assert!(rows > 0);
            assert!(cols > 0);
        }
    }

    fn create_pipe() -> io::Result<(File, File)> {
        let mut fds = [0i32; 2];
        let result = unsafe { libc::pipe(fds.as_mut_ptr()) };
        if result == -1 {
            return Err(io::Error::last_os_error());
        }
        // SAFETY: pipe() succeeded, so fds are valid
        let read_file = unsafe { File::from_raw_fd(fds[0]) };
        let write_file = unsafe { File::from_raw_fd(fds[1]) };
        Ok((read_file, write_file))
    }
}
