//! Terminal collaborator: raw mode, window size, key input and frame output.

mod raw;

pub use raw::{RawModeGuard, enable_raw_mode, is_tty, raw_attributes, terminal_size};

use std::io::{self, Stdout, Write};

use tracing::{debug, warn};

use crate::ansi::{self, sequences};
use crate::error::{Error, Result};
use crate::input::{ByteSource, Key, KeyDecoder, TimedReader};

/// Longest cursor position report accepted by the window size fallback.
const MAX_REPORT_LEN: usize = 32;

/// Key input plus screen output.
///
/// The byte source and sink are generic so the editor loop can be driven
/// from in-memory buffers in tests; [`Terminal::stdio`] wires up the real
/// terminal.
#[derive(Debug)]
pub struct Terminal<S: ByteSource, W: Write> {
    keys: KeyDecoder<S>,
    writer: W,
    raw_mode_guard: Option<RawModeGuard>,
}

impl Terminal<TimedReader<io::Stdin>, Stdout> {
    /// Terminal over the process's stdin and stdout.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(TimedReader::stdin(), io::stdout())
    }
}

impl<S: ByteSource, W: Write> Terminal<S, W> {
    /// Create a terminal over a byte source and a writer.
    pub fn new(source: S, writer: W) -> Self {
        Self {
            keys: KeyDecoder::new(source),
            writer,
            raw_mode_guard: None,
        }
    }

    /// Check if terminal is in raw mode.
    #[must_use]
    pub fn is_raw_mode(&self) -> bool {
        self.raw_mode_guard.is_some()
    }

    /// Put stdin in raw mode with the given read timeout.
    pub fn enter_raw_mode(&mut self, read_timeout_ds: u8) -> io::Result<()> {
        if self.raw_mode_guard.is_none() {
            self.raw_mode_guard = Some(enable_raw_mode(read_timeout_ds)?);
        }
        Ok(())
    }

    /// Restore the attributes saved by [`enter_raw_mode`](Self::enter_raw_mode).
    pub fn exit_raw_mode(&mut self) {
        self.raw_mode_guard = None;
    }

    /// Read the next key, or `None` if the read timed out.
    pub fn read_key(&mut self) -> io::Result<Option<Key>> {
        self.keys.read_key()
    }

    /// Write a complete frame in one call and flush it.
    pub fn write_frame(&mut self, frame: &[u8]) -> io::Result<()> {
        self.writer.write_all(frame)?;
        self.writer.flush()
    }

    /// Clear the screen and home the cursor.
    pub fn clear(&mut self) -> io::Result<()> {
        self.writer.write_all(sequences::CLEAR_SCREEN.as_bytes())?;
        self.writer.write_all(sequences::CURSOR_HOME.as_bytes())?;
        self.writer.flush()
    }

    /// Screen size as `(rows, cols)`.
    ///
    /// Asks the kernel first and falls back to
    /// [`query_window_size`](Self::query_window_size).
    pub fn window_size(&mut self) -> Result<(usize, usize)> {
        match terminal_size() {
            Ok((rows, cols)) => Ok((usize::from(rows), usize::from(cols))),
            Err(e) => {
                warn!(error = %e, "TIOCGWINSZ failed, querying cursor position");
                self.query_window_size()
            }
        }
    }

    /// Measure the screen by parking the cursor in the far corner and
    /// reading back its position report.
    pub fn query_window_size(&mut self) -> Result<(usize, usize)> {
        self.writer.write_all(sequences::CURSOR_FAR_CORNER.as_bytes())?;
        self.writer
            .write_all(sequences::REQUEST_CURSOR_POSITION.as_bytes())?;
        self.writer.flush()?;

        let mut report = Vec::with_capacity(MAX_REPORT_LEN);
        while report.len() < MAX_REPORT_LEN {
            match self.keys.source_mut().read_byte()? {
                Some(b'R') | None => break,
                Some(byte) => report.push(byte),
            }
        }
        let (rows, cols) = ansi::parse_cursor_position_report(&report).ok_or(Error::WindowSize)?;
        if rows == 0 || cols == 0 {
            return Err(Error::WindowSize);
        }
        debug!(rows, cols, "window size from cursor report");
        Ok((usize::from(rows), usize::from(cols)))
    }

    /// Mutable access to the output sink.
    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Consume the terminal and return the output sink.
    pub fn into_writer(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terminal(input: &[u8]) -> Terminal<TimedReader<&[u8]>, Vec<u8>> {
        Terminal::new(TimedReader::new(input), Vec::new())
    }

    #[test]
    fn test_new_terminal_is_not_raw() {
        assert!(!terminal(b"").is_raw_mode());
    }

    #[test]
    fn test_keys_are_decoded_from_the_source() {
        let mut term = terminal(b"a\x1b[A");
        assert_eq!(term.read_key().unwrap(), Some(Key::Char(b'a')));
        assert_eq!(term.read_key().unwrap(), Some(Key::ArrowUp));
        assert_eq!(term.read_key().unwrap(), None);
    }

    #[test]
    fn test_frames_are_written_verbatim() {
        let mut term = terminal(b"");
        term.write_frame(b"\x1b[Hhello").unwrap();
        term.clear().unwrap();
        assert_eq!(term.into_writer(), b"\x1b[Hhello\x1b[2J\x1b[H");
    }

    #[test]
    fn test_cursor_report_fallback() {
        let mut term = terminal(b"\x1b[24;80R");
        assert_eq!(term.query_window_size().unwrap(), (24, 80));
        assert_eq!(term.writer_mut().as_slice(), b"\x1b[999C\x1b[999B\x1b[6n");
    }

    #[test]
    fn test_missing_or_garbled_report_is_an_error() {
        assert!(matches!(
            terminal(b"").query_window_size(),
            Err(Error::WindowSize)
        ));
        assert!(matches!(
            terminal(b"\x1b[x;yR").query_window_size(),
            Err(Error::WindowSize)
        ));
        assert!(matches!(
            terminal(b"\x1b[0;80R").query_window_size(),
            Err(Error::WindowSize)
        ));
    }
}
