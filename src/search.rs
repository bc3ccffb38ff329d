//! Incremental search over rendered row text.
//!
//! The controller is driven one keystroke at a time by the prompt. Each
//! step first restores the highlight of the row it last marked, so the
//! match overlay never leaks into the permanent classification.

use tracing::debug;

use crate::highlight::Highlight;
use crate::input::{ENTER, Key};
use crate::renderer::Viewport;
use crate::text::Buffer;

/// Direction in which the next match is looked for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

/// A located match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Match {
    pub row: usize,
    /// Raw column of the first matched byte.
    pub cx: usize,
    /// Render column of the first matched byte.
    pub rx: usize,
    /// Match length in render columns.
    pub len: usize,
}

#[derive(Clone, Debug)]
struct SavedHighlight {
    row: usize,
    highlight: Vec<Highlight>,
}

/// Search session state.
#[derive(Clone, Debug, Default)]
pub struct Search {
    last_match: Option<usize>,
    direction: Direction,
    saved: Option<SavedHighlight>,
}

impl Search {
    /// Start a session with no previous match, searching forward.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn last_match(&self) -> Option<usize> {
        self.last_match
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Whether a row currently carries the match overlay.
    #[must_use]
    pub fn has_overlay(&self) -> bool {
        self.saved.is_some()
    }

    /// Put back the highlight saved before the last overlay, if any.
    pub fn restore(&mut self, buffer: &mut Buffer) {
        let Some(saved) = self.saved.take() else {
            return;
        };
        if let Some(highlight) = buffer.highlight_mut(saved.row) {
            if highlight.len() == saved.highlight.len() {
                highlight.copy_from_slice(&saved.highlight);
            }
        }
    }

    /// Handle one prompt keystroke with the current `query`.
    ///
    /// Enter and Escape end the session. Arrow keys pick the direction and
    /// step from the last match; any other key means the query changed and
    /// the search restarts from the top. On a hit the cursor moves to the
    /// match and the window's row offset is pushed past the end so the next
    /// scroll brings the match to the top.
    pub fn on_key(
        &mut self,
        buffer: &mut Buffer,
        view: &mut Viewport,
        query: &str,
        key: Key,
    ) -> Option<Match> {
        self.restore(buffer);

        match key {
            Key::Char(ENTER) | Key::Escape => {
                self.last_match = None;
                self.direction = Direction::Forward;
                return None;
            }
            Key::ArrowRight | Key::ArrowDown => self.direction = Direction::Forward,
            Key::ArrowLeft | Key::ArrowUp => self.direction = Direction::Backward,
            _ => {
                self.last_match = None;
                self.direction = Direction::Forward;
            }
        }
        if self.last_match.is_none() {
            self.direction = Direction::Forward;
        }

        let found = self.find_next(buffer, query.as_bytes())?;
        buffer.cursor.y = found.row;
        buffer.cursor.x = found.cx;
        view.row_offset = buffer.len();
        self.mark(buffer, found);
        Some(found)
    }

    /// Scan at most one full pass from the last match, wrapping at both
    /// ends. Does not touch the buffer.
    #[must_use]
    pub fn find_next(&self, buffer: &Buffer, query: &[u8]) -> Option<Match> {
        let rows = buffer.len();
        if query.is_empty() || rows == 0 {
            return None;
        }
        // With no previous match, stepping forward starts at row 0.
        let mut current = self.last_match.unwrap_or(rows - 1);
        for _ in 0..rows {
            current = match self.direction {
                Direction::Forward => (current + 1) % rows,
                Direction::Backward => current.checked_sub(1).unwrap_or(rows - 1),
            };
            let Some(row) = buffer.row(current) else {
                continue;
            };
            if let Some(rx) = find_bytes(row.render(), query) {
                return Some(Match {
                    row: current,
                    cx: row.rx_to_cx(rx, buffer.tab_stop()),
                    rx,
                    len: query.len(),
                });
            }
        }
        None
    }

    fn mark(&mut self, buffer: &mut Buffer, found: Match) {
        let Some(highlight) = buffer.highlight_mut(found.row) else {
            return;
        };
        self.saved = Some(SavedHighlight {
            row: found.row,
            highlight: highlight.to_vec(),
        });
        let end = (found.rx + found.len).min(highlight.len());
        highlight[found.rx..end].fill(Highlight::Match);
        self.last_match = Some(found.row);
        debug!(row = found.row, col = found.cx, "search hit");
    }
}

/// Position of the first occurrence of `needle` in `haystack`.
fn find_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
