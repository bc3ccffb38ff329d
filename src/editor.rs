//! Editor context and key dispatch.
//!
//! [`Editor`] owns all mutable editing state and is passed explicitly to
//! every operation. Terminal I/O goes through a [`Terminal`] borrowed per
//! call, so the whole command surface can be driven from in-memory input.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::config::EditorConfig;
use crate::error::Result;
use crate::input::{ByteSource, ENTER, Key, ctrl};
use crate::renderer::{StatusLine, Viewport, compose_frame};
use crate::search::Search;
use crate::terminal::Terminal;
use crate::text::Buffer;

/// Message shown when the editor starts.
pub const HELP_MESSAGE: &str = "HELP: Ctrl-S = save | Ctrl-Q = quit | Ctrl-F = find";

/// Rows reserved below the text area for the status and message bars.
const BAR_ROWS: usize = 2;

/// What the main loop should do after a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Quit,
}

/// Transient text on the message bar.
#[derive(Clone, Debug)]
pub struct StatusMessage {
    pub text: String,
    pub set_at: Instant,
}

/// The editing session.
#[derive(Debug)]
pub struct Editor {
    pub buffer: Buffer,
    pub view: Viewport,
    config: EditorConfig,
    filename: Option<String>,
    message: Option<StatusMessage>,
    quit_times: u32,
}

impl Editor {
    /// Create an editor for a screen of `rows` x `cols`.
    #[must_use]
    pub fn new(config: EditorConfig, rows: usize, cols: usize) -> Self {
        Self {
            buffer: Buffer::new(config.tab_stop),
            view: Viewport::new(rows.saturating_sub(BAR_ROWS), cols),
            quit_times: config.quit_times,
            config,
            filename: None,
            message: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// Set the file name and pick the matching syntax profile.
    pub fn set_filename(&mut self, filename: impl Into<String>) {
        let filename = filename.into();
        self.buffer.select_profile_for(&filename);
        self.filename = Some(filename);
    }

    /// Adapt to a new screen size.
    pub fn resize(&mut self, rows: usize, cols: usize) {
        self.view.resize(rows.saturating_sub(BAR_ROWS), cols);
    }

    /// Show `text` on the message bar.
    pub fn set_status_message(&mut self, text: impl Into<String>) {
        self.message = Some(StatusMessage {
            text: text.into(),
            set_at: Instant::now(),
        });
    }

    /// The message bar text, if it has not expired yet.
    #[must_use]
    pub fn status_message(&self) -> Option<&str> {
        self.message
            .as_ref()
            .filter(|message| message.set_at.elapsed() < self.config.message_timeout)
            .map(|message| message.text.as_str())
    }

    // ------------------------------------------------------------------
    // File collaborator
    // ------------------------------------------------------------------

    /// Load `path` into the buffer. A missing file starts an empty buffer
    /// that will be created on save.
    pub fn open(&mut self, path: &Path) -> Result<()> {
        self.set_filename(path.to_string_lossy());
        let content = match fs::read(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.buffer.load_lines(std::iter::empty::<&[u8]>());
                info!(path = %path.display(), "new file");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };
        self.buffer.load_lines(split_lines(&content));
        info!(path = %path.display(), rows = self.buffer.len(), "opened file");
        Ok(())
    }

    /// Write the buffer to its file, prompting for a name if it has none.
    /// Failures are reported on the message bar only.
    pub fn save<S: ByteSource, W: Write>(&mut self, term: &mut Terminal<S, W>) -> Result<()> {
        if self.filename.is_none() {
            match self.prompt(term, "Save as: {} (ESC to cancel)", |_, _, _| {})? {
                Some(name) => self.set_filename(name),
                None => {
                    self.set_status_message("Save aborted");
                    return Ok(());
                }
            }
        }
        let Some(filename) = self.filename.clone() else {
            return Ok(());
        };

        let bytes = self.buffer.rows_to_bytes();
        match write_file(Path::new(&filename), &bytes) {
            Ok(()) => {
                self.buffer.mark_clean();
                info!(path = %filename, bytes = bytes.len(), "saved");
                self.set_status_message(format!("{} bytes written to disk", bytes.len()));
            }
            Err(e) => {
                warn!(path = %filename, error = %e, "save failed");
                self.set_status_message(format!("Can't save! I/O error: {e}"));
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Screen
    // ------------------------------------------------------------------

    /// Scroll to the cursor and draw one frame.
    pub fn refresh_screen<S: ByteSource, W: Write>(
        &mut self,
        term: &mut Terminal<S, W>,
    ) -> Result<()> {
        self.view
            .scroll(self.buffer.cursor.y, self.buffer.cursor_rx());
        let status = StatusLine::new(&self.buffer, self.filename.as_deref());
        let frame = compose_frame(&self.buffer, &self.view, &status, self.status_message());
        term.write_frame(frame.as_bytes())?;
        Ok(())
    }

    /// Redraw and wait until a key arrives. Timeouts redraw again so an
    /// expired message disappears.
    fn wait_key<S: ByteSource, W: Write>(&mut self, term: &mut Terminal<S, W>) -> Result<Key> {
        loop {
            self.refresh_screen(term)?;
            if let Some(key) = term.read_key()? {
                return Ok(key);
            }
        }
    }

    /// Run until the user quits.
    pub fn run<S: ByteSource, W: Write>(&mut self, term: &mut Terminal<S, W>) -> Result<()> {
        loop {
            let key = self.wait_key(term)?;
            if self.process_key(term, key)? == Outcome::Quit {
                return Ok(());
            }
        }
    }

    // ------------------------------------------------------------------
    // Prompt and search
    // ------------------------------------------------------------------

    /// Read a line on the message bar. `template` has `{}` where the input
    /// goes. `callback` sees the input and key after every keystroke,
    /// including the final Enter or Escape.
    ///
    /// Returns `None` if the user cancelled with Escape.
    pub fn prompt<S, W, F>(
        &mut self,
        term: &mut Terminal<S, W>,
        template: &str,
        mut callback: F,
    ) -> Result<Option<String>>
    where
        S: ByteSource,
        W: Write,
        F: FnMut(&mut Self, &str, Key),
    {
        let mut input = String::new();
        loop {
            self.set_status_message(template.replace("{}", &input));
            let key = self.wait_key(term)?;

            if key.is_erase() {
                input.pop();
            } else if key == Key::Escape {
                self.set_status_message("");
                callback(self, &input, key);
                return Ok(None);
            } else if key == Key::Char(ENTER) {
                if !input.is_empty() {
                    self.set_status_message("");
                    callback(self, &input, key);
                    return Ok(Some(input));
                }
            } else if let Some(c) = key.printable() {
                input.push(char::from(c));
            }
            callback(self, &input, key);
        }
    }

    /// Incremental search. Escape puts the cursor and window back where
    /// they were; Enter leaves them at the match.
    pub fn find<S: ByteSource, W: Write>(&mut self, term: &mut Terminal<S, W>) -> Result<()> {
        let saved_cursor = self.buffer.cursor;
        let saved_view = self.view;
        let mut search = Search::new();

        let query = self.prompt(
            term,
            "Search: {} (Use ESC/Arrows/Enter)",
            |editor, query, key| {
                search.on_key(&mut editor.buffer, &mut editor.view, query, key);
            },
        )?;

        if query.is_none() {
            self.buffer.cursor = saved_cursor;
            self.view.row_offset = saved_view.row_offset;
            self.view.col_offset = saved_view.col_offset;
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Key dispatch
    // ------------------------------------------------------------------

    /// Apply one key.
    pub fn process_key<S: ByteSource, W: Write>(
        &mut self,
        term: &mut Terminal<S, W>,
        key: Key,
    ) -> Result<Outcome> {
        match key {
            Key::Char(ENTER) => self.buffer.insert_newline(),

            Key::Char(c) if c == ctrl(b'q') => {
                if self.buffer.is_dirty() && self.quit_times > 0 {
                    self.set_status_message(format!(
                        "WARNING!!! File has unsaved changes. Press Ctrl-Q {} more times to quit.",
                        self.quit_times
                    ));
                    self.quit_times -= 1;
                    return Ok(Outcome::Continue);
                }
                debug!(dirty = self.buffer.dirty(), "quit");
                term.clear()?;
                return Ok(Outcome::Quit);
            }

            Key::Char(c) if c == ctrl(b's') => self.save(term)?,
            Key::Char(c) if c == ctrl(b'f') => self.find(term)?,

            Key::Home => self.buffer.cursor.x = 0,
            Key::End => {
                if let Some(row) = self.buffer.row(self.buffer.cursor.y) {
                    self.buffer.cursor.x = row.len();
                }
            }

            Key::Delete => {
                self.buffer.move_cursor(Key::ArrowRight);
                self.buffer.delete_char();
            }
            _ if key.is_erase() => self.buffer.delete_char(),

            Key::PageUp | Key::PageDown => self.page(key),
            _ if key.is_arrow() => self.buffer.move_cursor(key),

            Key::Escape => {}
            Key::Char(c) if c == ctrl(b'l') => {}
            Key::Char(c) => self.buffer.insert_char(c),
            _ => {}
        }

        self.quit_times = self.config.quit_times;
        Ok(Outcome::Continue)
    }

    /// Jump to the top or bottom visible row, then move a full screen.
    fn page(&mut self, key: Key) {
        let rows = self.view.rows;
        let step = if key == Key::PageUp {
            self.buffer.cursor.y = self.view.row_offset;
            Key::ArrowUp
        } else {
            let bottom = (self.view.row_offset + rows).saturating_sub(1);
            self.buffer.cursor.y = bottom.min(self.buffer.len());
            Key::ArrowDown
        };
        for _ in 0..rows {
            self.buffer.move_cursor(step);
        }
    }
}

/// Split file content into lines without their `\n`. A final newline does
/// not start another line.
fn split_lines(content: &[u8]) -> impl Iterator<Item = &[u8]> {
    let empty = content.is_empty();
    let content = content.strip_suffix(b"\n").unwrap_or(content);
    content.split(|&b| b == b'\n').filter(move |_| !empty)
}

fn write_file(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    file.write_all(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::TimedReader;
    use crate::text::Cursor;

    type TestTerminal<'a> = Terminal<TimedReader<&'a [u8]>, Vec<u8>>;

    fn term(input: &[u8]) -> TestTerminal<'_> {
        Terminal::new(TimedReader::new(input), Vec::new())
    }

    fn editor(lines: &[&str]) -> Editor {
        let mut editor = Editor::new(EditorConfig::default(), 12, 40);
        editor.buffer.load_lines(lines);
        editor
    }

    fn raws(editor: &Editor) -> Vec<String> {
        editor
            .buffer
            .rows()
            .iter()
            .map(|row| String::from_utf8_lossy(row.raw()).into_owned())
            .collect()
    }

    #[test]
    fn test_split_lines_handles_trailing_newline() {
        let lines: Vec<&[u8]> = split_lines(b"a\nb\n").collect();
        assert_eq!(lines, vec![&b"a"[..], b"b"]);
        let lines: Vec<&[u8]> = split_lines(b"a\n\nb").collect();
        assert_eq!(lines, vec![&b"a"[..], b"", b"b"]);
        assert_eq!(split_lines(b"").count(), 0);
        assert_eq!(split_lines(b"\n").count(), 1);
    }

    #[test]
    fn test_typing_and_enter() {
        let mut ed = editor(&[]);
        let mut t = term(b"");
        for key in [Key::Char(b'h'), Key::Char(b'i'), Key::Char(ENTER), Key::Char(b'!')] {
            ed.process_key(&mut t, key).unwrap();
        }
        assert_eq!(raws(&ed), vec!["hi", "!"]);
        assert!(ed.buffer.is_dirty());
    }

    #[test]
    fn test_delete_key_removes_char_under_cursor() {
        let mut ed = editor(&["abc"]);
        let mut t = term(b"");
        ed.buffer.cursor.x = 1;
        ed.process_key(&mut t, Key::Delete).unwrap();
        assert_eq!(raws(&ed), vec!["ac"]);
        assert_eq!(ed.buffer.cursor.x, 1);
    }

    #[test]
    fn test_ctrl_h_erases() {
        let mut ed = editor(&["abc"]);
        let mut t = term(b"");
        ed.buffer.cursor.x = 3;
        ed.process_key(&mut t, Key::Char(ctrl(b'h'))).unwrap();
        assert_eq!(raws(&ed), vec!["ab"]);
    }

    #[test]
    fn test_home_and_end() {
        let mut ed = editor(&["hello"]);
        let mut t = term(b"");
        ed.process_key(&mut t, Key::End).unwrap();
        assert_eq!(ed.buffer.cursor.x, 5);
        ed.process_key(&mut t, Key::Home).unwrap();
        assert_eq!(ed.buffer.cursor.x, 0);
    }

    #[test]
    fn test_page_down_moves_a_screen() {
        let lines: Vec<String> = (0..50).map(|i| i.to_string()).collect();
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        let mut ed = editor(&refs);
        let mut t = term(b"");
        // Text area is 10 rows: bottom row 9, then ten more.
        ed.process_key(&mut t, Key::PageDown).unwrap();
        assert_eq!(ed.buffer.cursor.y, 19);
        ed.view.scroll(ed.buffer.cursor.y, 0);
        ed.process_key(&mut t, Key::PageUp).unwrap();
        assert_eq!(ed.buffer.cursor.y, 0);
    }

    #[test]
    fn test_escape_and_ctrl_l_do_nothing() {
        let mut ed = editor(&["x"]);
        let mut t = term(b"");
        ed.process_key(&mut t, Key::Escape).unwrap();
        ed.process_key(&mut t, Key::Char(ctrl(b'l'))).unwrap();
        assert_eq!(raws(&ed), vec!["x"]);
        assert!(!ed.buffer.is_dirty());
    }

    #[test]
    fn test_quit_requires_confirmation_when_dirty() {
        let mut ed = editor(&[]);
        let mut t = term(b"");
        ed.process_key(&mut t, Key::Char(b'x')).unwrap();
        for remaining in (1..=3).rev() {
            assert_eq!(
                ed.process_key(&mut t, Key::Char(ctrl(b'q'))).unwrap(),
                Outcome::Continue
            );
            assert_eq!(
                ed.status_message().unwrap(),
                format!(
                    "WARNING!!! File has unsaved changes. Press Ctrl-Q {remaining} more times to quit."
                )
            );
        }
        assert_eq!(
            ed.process_key(&mut t, Key::Char(ctrl(b'q'))).unwrap(),
            Outcome::Quit
        );
    }

    #[test]
    fn test_other_key_resets_quit_confirmation() {
        let mut ed = editor(&[]);
        let mut t = term(b"");
        ed.process_key(&mut t, Key::Char(b'x')).unwrap();
        ed.process_key(&mut t, Key::Char(ctrl(b'q'))).unwrap();
        ed.process_key(&mut t, Key::ArrowLeft).unwrap();
        ed.process_key(&mut t, Key::Char(ctrl(b'q'))).unwrap();
        assert!(ed.status_message().unwrap().contains("Press Ctrl-Q 3 more"));
    }

    #[test]
    fn test_clean_buffer_quits_immediately() {
        let mut ed = editor(&["x"]);
        let mut t = term(b"");
        assert_eq!(
            ed.process_key(&mut t, Key::Char(ctrl(b'q'))).unwrap(),
            Outcome::Quit
        );
        assert!(t.into_writer().ends_with(b"\x1b[2J\x1b[H"));
    }

    #[test]
    fn test_search_then_cancel_restores_position() {
        let mut ed = editor(&["abc", "def"]);
        ed.buffer.cursor = Cursor { x: 2, y: 0 };
        ed.view.col_offset = 1;
        let mut t = term(b"ef\x1b");
        ed.find(&mut t).unwrap();
        assert_eq!(ed.buffer.cursor, Cursor { x: 2, y: 0 });
        assert_eq!(ed.view.row_offset, 0);
        assert_eq!(ed.view.col_offset, 1);
        assert!(ed.buffer.rows().iter().all(|row| {
            row.highlight().iter().all(|h| *h != crate::highlight::Highlight::Match)
        }));
    }

    #[test]
    fn test_search_then_confirm_keeps_match() {
        let mut ed = editor(&["abc", "def"]);
        let mut t = term(b"ef\r");
        ed.find(&mut t).unwrap();
        assert_eq!(ed.buffer.cursor, Cursor { x: 1, y: 1 });
    }

    #[test]
    fn test_prompt_edits_and_rejects_empty_enter() {
        let mut ed = editor(&[]);
        let mut t = term(b"\rab\x7fc\r");
        let mut seen = Vec::new();
        let answer = ed
            .prompt(&mut t, "> {}", |_, input, _| seen.push(input.to_string()))
            .unwrap();
        assert_eq!(answer.as_deref(), Some("ac"));
        assert_eq!(seen, vec!["", "a", "ab", "a", "ac", "ac"]);
    }

    #[test]
    fn test_save_as_prompt_can_be_aborted() {
        let mut ed = editor(&["x"]);
        let mut t = term(b"\x1b");
        ed.save(&mut t).unwrap();
        assert_eq!(ed.status_message(), Some("Save aborted"));
        assert_eq!(ed.filename(), None);
    }

    #[test]
    fn test_save_writes_rows_and_cleans() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.c");
        let mut ed = editor(&[]);
        ed.set_filename(path.to_string_lossy());
        let mut t = term(b"");
        for c in b"int" {
            ed.process_key(&mut t, Key::Char(*c)).unwrap();
        }
        ed.save(&mut t).unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"int\n");
        assert!(!ed.buffer.is_dirty());
        assert_eq!(ed.status_message(), Some("4 bytes written to disk"));
        assert_eq!(ed.buffer.profile().map(|p| p.name), Some("c"));
    }

    #[test]
    fn test_save_failure_keeps_dirty_state() {
        let dir = tempfile::tempdir().unwrap();
        let mut ed = editor(&[]);
        ed.set_filename(dir.path().join("missing").join("f.txt").to_string_lossy());
        let mut t = term(b"");
        ed.process_key(&mut t, Key::Char(b'x')).unwrap();
        ed.save(&mut t).unwrap();
        assert!(ed.buffer.is_dirty());
        assert!(ed.status_message().unwrap().starts_with("Can't save! I/O error: "));
    }

    #[test]
    fn test_open_reads_lines_and_selects_profile() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("main.rs");
        fs::write(&path, "fn main() {\r\n}\n").unwrap();
        let mut ed = editor(&[]);
        ed.open(&path).unwrap();
        assert_eq!(raws(&ed), vec!["fn main() {", "}"]);
        assert_eq!(ed.buffer.profile().map(|p| p.name), Some("rust"));
        assert!(!ed.buffer.is_dirty());
    }

    #[test]
    fn test_open_missing_file_discards_previous_rows() {
        let dir = tempfile::tempdir().unwrap();
        let mut ed = editor(&["old", "rows"]);
        ed.buffer.cursor.y = 1;
        ed.open(&dir.path().join("fresh.txt")).unwrap();
        assert!(ed.buffer.is_empty());
        assert_eq!(ed.buffer.cursor.y, 0);
        assert!(!ed.buffer.is_dirty());
        assert_eq!(ed.filename(), Some(dir.path().join("fresh.txt").to_string_lossy().as_ref()));
    }

    #[test]
    fn test_open_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut ed = editor(&[]);
        ed.open(&dir.path().join("new.py")).unwrap();
        assert!(ed.buffer.is_empty());
        assert_eq!(ed.buffer.profile().map(|p| p.name), Some("python"));
    }

    #[test]
    fn test_expired_message_is_hidden() {
        let config = EditorConfig {
            message_timeout: std::time::Duration::ZERO,
            ..EditorConfig::default()
        };
        let mut ed = Editor::new(config, 10, 40);
        ed.set_status_message("gone");
        assert_eq!(ed.status_message(), None);
    }
}
