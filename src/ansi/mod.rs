//! ANSI escape sequence generation.

pub mod output;
pub mod sequences;

pub use output::FrameWriter;
pub use sequences::*;

use std::io::{self, Write};

/// Write a u32 as decimal digits to a writer without formatting overhead.
///
/// Stack buffer is sized for max u32 digits (10) to avoid heap allocation.
#[inline]
fn write_u32_decimal(w: &mut impl Write, n: u32) -> io::Result<()> {
    if n < 10 {
        return w.write_all(&[b'0' + n as u8]);
    }
    if n < 100 {
        return w.write_all(&[b'0' + (n / 10) as u8, b'0' + (n % 10) as u8]);
    }

    let mut buf = [0u8; 10];
    let mut i = buf.len();
    let mut val = n;
    while val > 0 {
        i -= 1;
        buf[i] = b'0' + (val % 10) as u8;
        val /= 10;
    }
    w.write_all(&buf[i..])
}

/// Write an SGR foreground color code (`ESC [ <code> m`).
pub fn write_fg_code(w: &mut impl Write, code: u8) -> io::Result<()> {
    w.write_all(b"\x1b[")?;
    write_u32_decimal(w, u32::from(code))?;
    w.write_all(b"m")
}

/// Write cursor position sequence to a writer (0-indexed input).
pub fn write_cursor_position(w: &mut impl Write, row: u32, col: u32) -> io::Result<()> {
    w.write_all(b"\x1b[")?;
    write_u32_decimal(w, row + 1)?;
    w.write_all(b";")?;
    write_u32_decimal(w, col + 1)?;
    w.write_all(b"H")
}

/// Parse a cursor position report (`ESC [ rows ; cols R`).
///
/// Returns `(rows, cols)` as reported, i.e. 1-indexed, which for a cursor
/// parked in the far corner is the window size.
#[must_use]
pub fn parse_cursor_position_report(report: &[u8]) -> Option<(u16, u16)> {
    let body = report.strip_prefix(b"\x1b[")?;
    let body = body.strip_suffix(b"R").unwrap_or(body);
    let text = std::str::from_utf8(body).ok()?;
    let (rows, cols) = text.split_once(';')?;
    Some((rows.parse().ok()?, cols.parse().ok()?))
}
