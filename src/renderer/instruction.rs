//! Conversion of a row slice into drawing instructions.

use crate::ansi::FrameWriter;
use crate::highlight::Highlight;

/// One drawing step for a visible row slice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderInstruction<'a> {
    /// Printable bytes sharing one highlight class.
    Run { class: Highlight, text: &'a [u8] },
    /// A non-printable byte, shown as an inverse-video glyph.
    Control { glyph: u8 },
}

/// Placeholder glyph for a control byte: `'@' + code` up to 26, else `'?'`.
#[must_use]
pub const fn control_glyph(code: u8) -> u8 {
    if code <= 26 { b'@' + code } else { b'?' }
}

/// Split `render` into runs of equal class, breaking out control bytes.
///
/// `render` and `highlight` are the already-clipped visible slices.
#[must_use]
pub fn instructions<'a>(render: &'a [u8], highlight: &[Highlight]) -> Vec<RenderInstruction<'a>> {
    let mut out = Vec::new();
    let mut start = 0;
    for (i, &c) in render.iter().enumerate() {
        let class = highlight.get(i).copied().unwrap_or_default();
        if c.is_ascii_control() {
            flush_run(&mut out, render, highlight, start, i);
            out.push(RenderInstruction::Control {
                glyph: control_glyph(c),
            });
            start = i + 1;
        } else if i > start && highlight.get(start).copied().unwrap_or_default() != class {
            flush_run(&mut out, render, highlight, start, i);
            start = i;
        }
    }
    flush_run(&mut out, render, highlight, start, render.len());
    out
}

fn flush_run<'a>(
    out: &mut Vec<RenderInstruction<'a>>,
    render: &'a [u8],
    highlight: &[Highlight],
    start: usize,
    end: usize,
) {
    if start < end {
        out.push(RenderInstruction::Run {
            class: highlight.get(start).copied().unwrap_or_default(),
            text: &render[start..end],
        });
    }
}

/// Emit instructions into a frame. Color changes are only written on class
/// transitions; a return to [`Highlight::Normal`] writes an explicit reset.
pub fn emit(frame: &mut FrameWriter, instructions: &[RenderInstruction<'_>]) {
    for instruction in instructions {
        match *instruction {
            RenderInstruction::Run { class, text } => {
                frame.set_fg(class.color());
                frame.write_bytes(text);
            }
            RenderInstruction::Control { glyph } => frame.write_placeholder(glyph),
        }
    }
}
