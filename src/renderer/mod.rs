//! Frame composition: text rows, status bar and message bar.
//!
//! A frame is built completely in a [`FrameWriter`] and handed to the
//! terminal as one write. The cursor is hidden while drawing and every line
//! is cleared to its right edge after its content, so no full-screen clear
//! is needed between frames.
//!
//! # Examples
//!
//! ```
//! use kilt::renderer::{StatusLine, Viewport, compose_frame};
//! use kilt::text::Buffer;
//!
//! let buffer = Buffer::from_lines(["hello"], 8);
//! let view = Viewport::new(3, 20);
//! let status = StatusLine::new(&buffer, Some("hello.txt"));
//! let frame = compose_frame(&buffer, &view, &status, None);
//! assert!(frame.as_bytes().windows(5).any(|w| w == b"hello"));
//! ```

mod instruction;
mod viewport;

pub use instruction::{RenderInstruction, control_glyph, emit, instructions};
pub use viewport::Viewport;

use crate::ansi::{self, FrameWriter};
use crate::text::{Buffer, Row};

/// Banner shown on an empty buffer.
pub const WELCOME: &str = concat!("Kilt editor -- version ", env!("CARGO_PKG_VERSION"));

/// Longest filename prefix shown in the status bar.
const STATUS_NAME_WIDTH: usize = 20;

/// Contents of the inverted status bar.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusLine<'a> {
    pub filename: Option<&'a str>,
    pub filetype: Option<&'static str>,
    pub lines: usize,
    /// 1-based cursor line.
    pub line: usize,
    pub modified: bool,
}

impl<'a> StatusLine<'a> {
    /// Describe `buffer` opened from `filename`.
    #[must_use]
    pub fn new(buffer: &Buffer, filename: Option<&'a str>) -> Self {
        Self {
            filename,
            filetype: buffer.profile().map(|profile| profile.name),
            lines: buffer.len(),
            line: buffer.cursor.y + 1,
            modified: buffer.is_dirty(),
        }
    }

    /// Left-aligned part: name, line count, modified marker.
    #[must_use]
    pub fn left(&self) -> String {
        let name = self.filename.unwrap_or("[No Name]");
        let name: String = name.chars().take(STATUS_NAME_WIDTH).collect();
        format!(
            "{name} - {} lines{}",
            self.lines,
            if self.modified { " (modified)" } else { "" }
        )
    }

    /// Right-aligned part: file type and cursor line.
    #[must_use]
    pub fn right(&self) -> String {
        format!(
            "{} | {}/{}",
            self.filetype.unwrap_or("no ft"),
            self.line,
            self.lines
        )
    }
}

/// Draw the visible slice of one row.
pub fn draw_row(frame: &mut FrameWriter, row: &Row, view: &Viewport) {
    let render = row.render();
    let start = view.col_offset.min(render.len());
    let end = (start + view.cols).min(render.len());
    let steps = instructions(&render[start..end], &row.highlight()[start..end]);
    emit(frame, &steps);
    frame.reset_fg();
}

/// Draw the text area: buffer rows, `~` past the end, and the welcome
/// banner when the buffer is empty.
pub fn draw_rows(frame: &mut FrameWriter, buffer: &Buffer, view: &Viewport) {
    for y in 0..view.rows {
        let file_row = y + view.row_offset;
        if let Some(row) = buffer.row(file_row) {
            draw_row(frame, row, view);
        } else if buffer.is_empty() && y == view.rows / 3 {
            draw_welcome(frame, view.cols);
        } else {
            frame.write_str("~");
        }
        frame.clear_line_right();
        frame.write_str(ansi::NEWLINE);
    }
}

fn draw_welcome(frame: &mut FrameWriter, cols: usize) {
    let welcome = &WELCOME[..WELCOME.len().min(cols)];
    let mut padding = (cols - welcome.len()) / 2;
    if padding > 0 {
        frame.write_str("~");
        padding -= 1;
    }
    for _ in 0..padding {
        frame.write_str(" ");
    }
    frame.write_str(welcome);
}

/// Draw the inverted status bar, followed by a line break.
pub fn draw_status_bar(frame: &mut FrameWriter, status: &StatusLine<'_>, cols: usize) {
    frame.write_str(ansi::INVERSE);
    let left = status.left();
    let right = status.right();
    let left = clip(&left, cols);
    frame.write_str(left);
    let mut len = left.chars().count();
    let right_len = right.chars().count();
    while len < cols {
        if cols - len == right_len {
            frame.write_str(&right);
            break;
        }
        frame.write_str(" ");
        len += 1;
    }
    frame.write_str(ansi::RESET);
    frame.write_str(ansi::NEWLINE);
}

/// Draw the message bar with `message` clipped to the screen width.
pub fn draw_message_bar(frame: &mut FrameWriter, message: Option<&str>, cols: usize) {
    frame.clear_line_right();
    if let Some(message) = message {
        frame.write_str(clip(message, cols));
    }
}

/// The first `cols` characters of `text`.
fn clip(text: &str, cols: usize) -> &str {
    let end = text
        .char_indices()
        .nth(cols)
        .map_or(text.len(), |(i, _)| i);
    &text[..end]
}

/// Build a complete frame. The caller scrolls `view` to the cursor first.
#[must_use]
pub fn compose_frame(
    buffer: &Buffer,
    view: &Viewport,
    status: &StatusLine<'_>,
    message: Option<&str>,
) -> FrameWriter {
    let mut frame = FrameWriter::new();
    frame.write_str(ansi::CURSOR_HIDE);
    frame.write_str(ansi::CURSOR_HOME);

    draw_rows(&mut frame, buffer, view);
    draw_status_bar(&mut frame, status, view.cols);
    draw_message_bar(&mut frame, message, view.cols);

    let (row, col) = view.to_screen(buffer.cursor.y, buffer.cursor_rx());
    frame.move_cursor(
        u32::try_from(row).unwrap_or(u32::MAX),
        u32::try_from(col).unwrap_or(u32::MAX),
    );
    frame.write_str(ansi::CURSOR_SHOW);
    frame
}
