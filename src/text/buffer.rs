//! Ordered row store with cursor, dirty tracking and syntax profile.

use tracing::debug;

use crate::highlight::{self, Highlight, LanguageProfile};
use crate::input::Key;
use crate::text::Row;

/// Cursor position in raw-column space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cursor {
    /// Raw column.
    pub x: usize,
    /// Row index; may equal the row count (the line after the last row).
    pub y: usize,
}

/// The edited text.
///
/// Every mutation that changes a row's raw content re-derives its render
/// form and re-runs the highlighter from that row, cascading downward while
/// the block-comment state keeps changing.
#[derive(Clone, Debug)]
pub struct Buffer {
    rows: Vec<Row>,
    pub cursor: Cursor,
    dirty: usize,
    profile: Option<&'static LanguageProfile>,
    tab_stop: usize,
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new(8)
    }
}

impl Buffer {
    /// Create an empty buffer.
    #[must_use]
    pub fn new(tab_stop: usize) -> Self {
        Self {
            rows: Vec::new(),
            cursor: Cursor::default(),
            dirty: 0,
            profile: None,
            tab_stop: tab_stop.max(1),
        }
    }

    /// Create a clean buffer holding `lines`.
    #[must_use]
    pub fn from_lines<I, L>(lines: I, tab_stop: usize) -> Self
    where
        I: IntoIterator<Item = L>,
        L: AsRef<[u8]>,
    {
        let mut buffer = Self::new(tab_stop);
        buffer.load_lines(lines);
        buffer
    }

    /// Replace all content with `lines` and mark the buffer clean.
    ///
    /// A trailing `\r` is stripped from each line.
    pub fn load_lines<I, L>(&mut self, lines: I)
    where
        I: IntoIterator<Item = L>,
        L: AsRef<[u8]>,
    {
        self.rows.clear();
        for line in lines {
            let line = line.as_ref();
            let line = line.strip_suffix(b"\r").unwrap_or(line);
            self.insert_row(self.rows.len(), line);
        }
        self.cursor = Cursor::default();
        self.dirty = 0;
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn row(&self, at: usize) -> Option<&Row> {
        self.rows.get(at)
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Unsaved change counter. Any value above zero means modified.
    #[must_use]
    pub fn dirty(&self) -> usize {
        self.dirty
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty > 0
    }

    /// Reset the change counter after a successful save.
    pub fn mark_clean(&mut self) {
        self.dirty = 0;
    }

    #[must_use]
    pub fn tab_stop(&self) -> usize {
        self.tab_stop
    }

    #[must_use]
    pub fn profile(&self) -> Option<&'static LanguageProfile> {
        self.profile
    }

    /// Switch language profile and reclassify every row.
    pub fn set_profile(&mut self, profile: Option<&'static LanguageProfile>) {
        self.profile = profile;
        highlight::highlight_all(&mut self.rows, profile);
        debug!(
            profile = profile.map_or("none", |p| p.name),
            rows = self.rows.len(),
            "syntax profile selected"
        );
    }

    /// Pick the profile for `filename` from the built-in table.
    pub fn select_profile_for(&mut self, filename: &str) {
        self.set_profile(highlight::select_profile(filename));
    }

    /// Render column of the cursor, derived from its raw column.
    #[must_use]
    pub fn cursor_rx(&self) -> usize {
        self.rows
            .get(self.cursor.y)
            .map_or(0, |row| row.cx_to_rx(self.cursor.x, self.tab_stop))
    }

    /// Serialize every row followed by a newline.
    #[must_use]
    pub fn rows_to_bytes(&self) -> Vec<u8> {
        let total = self.rows.iter().map(|row| row.len() + 1).sum();
        let mut out = Vec::with_capacity(total);
        for row in &self.rows {
            out.extend_from_slice(row.raw());
            out.push(b'\n');
        }
        out
    }

    // ------------------------------------------------------------------
    // Row store operations
    // ------------------------------------------------------------------

    /// Insert a row before `at`. `at == len()` appends; larger values clamp.
    pub fn insert_row(&mut self, at: usize, content: &[u8]) {
        let at = at.min(self.rows.len());
        // Seed with the state the displaced row was classified against, so
        // the cascade compares against what the next row saw before.
        let seed = at > 0 && self.rows[at - 1].open_comment();
        self.rows.insert(at, Row::new(at, content, seed));
        for (i, row) in self.rows.iter_mut().enumerate().skip(at + 1) {
            row.set_index(i);
        }
        self.update_row(at);
        self.dirty += 1;
    }

    /// Remove the row at `at`. Out-of-range positions are ignored.
    pub fn delete_row(&mut self, at: usize) {
        if at >= self.rows.len() {
            return;
        }
        self.rows.remove(at);
        for (i, row) in self.rows.iter_mut().enumerate().skip(at) {
            row.set_index(i);
        }
        // The row sliding into `at` now follows a different predecessor.
        highlight::cascade(&mut self.rows, at, self.profile);
        self.dirty += 1;
    }

    /// Insert `c` into row `at` at raw column `col` (clamped to the row).
    pub fn row_insert_char(&mut self, at: usize, col: usize, c: u8) {
        let Some(row) = self.rows.get_mut(at) else {
            return;
        };
        row.insert(col, c);
        self.update_row(at);
        self.dirty += 1;
    }

    /// Delete the byte at raw column `col` of row `at`; no-op if out of range.
    pub fn row_delete_char(&mut self, at: usize, col: usize) {
        let Some(row) = self.rows.get_mut(at) else {
            return;
        };
        if row.remove(col) {
            self.update_row(at);
            self.dirty += 1;
        }
    }

    /// Append `content` to the end of row `at`.
    pub fn row_append(&mut self, at: usize, content: &[u8]) {
        let Some(row) = self.rows.get_mut(at) else {
            return;
        };
        row.append(content);
        self.update_row(at);
        self.dirty += 1;
    }

    /// Split row `at` at raw column `col`; the tail becomes row `at + 1`.
    pub fn split_row(&mut self, at: usize, col: usize) {
        let Some(row) = self.rows.get(at) else {
            return;
        };
        let col = col.min(row.len());
        let tail = row.raw()[col..].to_vec();
        self.insert_row(at + 1, &tail);
        if let Some(row) = self.rows.get_mut(at) {
            row.split_off(col);
        }
        self.update_row(at);
    }

    /// Rebuild the render form of row `at` and re-highlight from there.
    /// Returns the number of rows reclassified.
    fn update_row(&mut self, at: usize) -> usize {
        let Some(row) = self.rows.get_mut(at) else {
            return 0;
        };
        row.update_render(self.tab_stop);
        highlight::cascade(&mut self.rows, at, self.profile)
    }

    pub(crate) fn highlight_mut(&mut self, at: usize) -> Option<&mut [Highlight]> {
        self.rows.get_mut(at).map(Row::highlight_mut)
    }

    // ------------------------------------------------------------------
    // Cursor-relative editing
    // ------------------------------------------------------------------

    /// Insert a byte at the cursor, creating a row if the cursor sits past
    /// the last one.
    pub fn insert_char(&mut self, c: u8) {
        if self.cursor.y == self.rows.len() {
            self.insert_row(self.rows.len(), b"");
        }
        self.row_insert_char(self.cursor.y, self.cursor.x, c);
        self.cursor.x += 1;
    }

    /// Break the line at the cursor.
    pub fn insert_newline(&mut self) {
        if self.cursor.x == 0 {
            self.insert_row(self.cursor.y, b"");
        } else {
            self.split_row(self.cursor.y, self.cursor.x);
        }
        self.cursor.y += 1;
        self.cursor.x = 0;
    }

    /// Delete the byte before the cursor, joining with the previous row at
    /// column 0.
    pub fn delete_char(&mut self) {
        let Cursor { x, y } = self.cursor;
        if y >= self.rows.len() || (x == 0 && y == 0) {
            return;
        }
        if x > 0 {
            self.row_delete_char(y, x - 1);
            self.cursor.x -= 1;
        } else {
            let prev_len = self.rows[y - 1].len();
            let content = self.rows[y].raw().to_vec();
            self.row_append(y - 1, &content);
            self.delete_row(y);
            self.cursor.y -= 1;
            self.cursor.x = prev_len;
        }
    }

    /// Move the cursor one step for an arrow key, wrapping across row ends,
    /// then snap it to the length of the row it lands on.
    pub fn move_cursor(&mut self, key: Key) {
        let current_len = self.rows.get(self.cursor.y).map(Row::len);
        match key {
            Key::ArrowLeft => {
                if self.cursor.x > 0 {
                    self.cursor.x -= 1;
                } else if self.cursor.y > 0 {
                    self.cursor.y -= 1;
                    self.cursor.x = self.rows[self.cursor.y].len();
                }
            }
            Key::ArrowRight => match current_len {
                Some(len) if self.cursor.x < len => self.cursor.x += 1,
                Some(len) if self.cursor.x == len => {
                    self.cursor.y += 1;
                    self.cursor.x = 0;
                }
                _ => {}
            },
            Key::ArrowUp => {
                self.cursor.y = self.cursor.y.saturating_sub(1);
            }
            Key::ArrowDown => {
                if self.cursor.y < self.rows.len() {
                    self.cursor.y += 1;
                }
            }
            _ => {}
        }
        self.snap_cursor();
    }

    /// Clamp the cursor's raw column to its row.
    pub fn snap_cursor(&mut self) {
        let len = self.rows.get(self.cursor.y).map_or(0, Row::len);
        self.cursor.x = self.cursor.x.min(len);
    }
}
