//! Frame buffer for ANSI output with foreground color tracking.

use crate::ansi::{self, sequences};

/// Accumulates one frame of output and tracks the active foreground color
/// so that color escapes are only emitted on actual transitions.
///
/// The whole frame is handed to the terminal in a single write, which keeps
/// partially drawn frames off the screen.
#[derive(Clone, Debug, Default)]
pub struct FrameWriter {
    buffer: Vec<u8>,
    /// `None` means the terminal default foreground is active.
    current_fg: Option<u8>,
}

impl FrameWriter {
    /// Create an empty frame.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buffer: Vec::with_capacity(8192),
            current_fg: None,
        }
    }

    /// Write a raw string to the frame.
    pub fn write_str(&mut self, s: &str) {
        self.buffer.extend_from_slice(s.as_bytes());
    }

    /// Write raw bytes to the frame.
    pub fn write_bytes(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Switch the foreground color if it differs from the active one.
    ///
    /// `None` resets to the terminal default explicitly.
    pub fn set_fg(&mut self, fg: Option<u8>) {
        if self.current_fg == fg {
            return;
        }
        match fg {
            Some(code) => {
                let _ = ansi::write_fg_code(&mut self.buffer, code);
            }
            None => self.write_str(sequences::color::FG_DEFAULT),
        }
        self.current_fg = fg;
    }

    /// Unconditionally reset the foreground to the terminal default.
    pub fn reset_fg(&mut self) {
        self.write_str(sequences::color::FG_DEFAULT);
        self.current_fg = None;
    }

    /// Active foreground color code, if any.
    #[must_use]
    pub fn current_fg(&self) -> Option<u8> {
        self.current_fg
    }

    /// Emit one glyph in inverse video, then restore the color that was
    /// active before it.
    pub fn write_placeholder(&mut self, glyph: u8) {
        self.write_str(sequences::INVERSE);
        self.buffer.push(glyph);
        self.write_str(sequences::RESET);
        if let Some(code) = self.current_fg {
            let _ = ansi::write_fg_code(&mut self.buffer, code);
        }
    }

    /// Move the cursor (0-indexed).
    pub fn move_cursor(&mut self, row: u32, col: u32) {
        let _ = ansi::write_cursor_position(&mut self.buffer, row, col);
    }

    /// Clear from the cursor to the end of the line.
    pub fn clear_line_right(&mut self) {
        self.write_str(sequences::CLEAR_LINE_RIGHT);
    }

    /// Bytes written so far.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Consume the frame and return its bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    /// Number of bytes in the frame.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}
