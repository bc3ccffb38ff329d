//! Visible row/column window over the buffer.

/// The visible window, in row-index space vertically and render-column
/// space horizontally.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    /// First visible row.
    pub row_offset: usize,
    /// First visible render column.
    pub col_offset: usize,
    /// Number of text rows on screen.
    pub rows: usize,
    /// Number of columns on screen.
    pub cols: usize,
}

impl Viewport {
    /// Create a window of `rows` x `cols` at the top-left of the buffer.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            row_offset: 0,
            col_offset: 0,
            rows,
            cols,
        }
    }

    /// Resize the window without moving it.
    pub fn resize(&mut self, rows: usize, cols: usize) {
        self.rows = rows;
        self.cols = cols;
    }

    /// Move the window the minimum distance needed to contain the cursor at
    /// row `cy`, render column `rx`. Does nothing if it is already visible.
    pub fn scroll(&mut self, cy: usize, rx: usize) {
        if cy < self.row_offset {
            self.row_offset = cy;
        }
        if self.rows > 0 && cy >= self.row_offset + self.rows {
            self.row_offset = cy + 1 - self.rows;
        }
        if rx < self.col_offset {
            self.col_offset = rx;
        }
        if self.cols > 0 && rx >= self.col_offset + self.cols {
            self.col_offset = rx + 1 - self.cols;
        }
    }

    /// Whether `(cy, rx)` lies inside the window.
    #[must_use]
    pub fn contains(&self, cy: usize, rx: usize) -> bool {
        (self.row_offset..self.row_offset + self.rows).contains(&cy)
            && (self.col_offset..self.col_offset + self.cols).contains(&rx)
    }

    /// Screen position of `(cy, rx)` relative to the window's top-left.
    #[must_use]
    pub fn to_screen(&self, cy: usize, rx: usize) -> (usize, usize) {
        (
            cy.saturating_sub(self.row_offset),
            rx.saturating_sub(self.col_offset),
        )
    }
}
