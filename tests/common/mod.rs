//! Shared helpers for integration tests.

#![allow(dead_code)]

use kilt::input::TimedReader;
use kilt::{Editor, EditorConfig, Outcome, Terminal};
use tracing::Level;

pub const ROWS: u16 = 10;
pub const COLS: u16 = 60;

pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_target(true)
        .with_test_writer()
        .try_init();
}

/// Editor on a `ROWS` x `COLS` screen holding `lines`.
pub fn editor_with(lines: &[&str]) -> Editor {
    let mut editor = Editor::new(EditorConfig::default(), usize::from(ROWS), usize::from(COLS));
    editor.buffer.load_lines(lines);
    editor
}

/// Feed `input` through the editor the way the main loop does, then draw a
/// final frame. Returns everything written to the screen.
///
/// Prompts opened by the input must be closed by it as well.
pub fn drive(editor: &mut Editor, input: &[u8]) -> Vec<u8> {
    let mut term = Terminal::new(TimedReader::new(input), Vec::new());
    editor.refresh_screen(&mut term).expect("refresh");
    while let Some(key) = term.read_key().expect("read") {
        if editor.process_key(&mut term, key).expect("key") == Outcome::Quit {
            return term.into_writer();
        }
        editor.refresh_screen(&mut term).expect("refresh");
    }
    term.into_writer()
}

/// What a `ROWS` x `COLS` terminal shows after `output`.
pub fn screen(output: &[u8]) -> vt100::Parser {
    let mut parser = vt100::Parser::new(ROWS, COLS, 0);
    parser.process(output);
    parser
}

/// Text of screen row `row`, trailing blanks trimmed.
pub fn screen_row(parser: &vt100::Parser, row: u16) -> String {
    parser
        .screen()
        .rows(0, COLS)
        .nth(usize::from(row))
        .unwrap_or_default()
        .trim_end()
        .to_string()
}
