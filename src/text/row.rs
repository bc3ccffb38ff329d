//! A single line of the buffer with its rendered form.

use crate::highlight::Highlight;

/// One logical line.
///
/// `raw` holds the bytes exactly as edited. `render` is `raw` with tabs
/// expanded, and `highlight` carries one class per `render` byte. Mutators
/// only touch `raw`; the owning [`Buffer`](super::Buffer) re-derives the
/// other two right after.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Row {
    index: usize,
    raw: Vec<u8>,
    render: Vec<u8>,
    highlight: Vec<Highlight>,
    open_comment: bool,
}

impl Row {
    /// Create a row at `index`. `open_comment` seeds the comparison value
    /// for the first highlight pass.
    pub(crate) fn new(index: usize, raw: &[u8], open_comment: bool) -> Self {
        Self {
            index,
            raw: raw.to_vec(),
            render: Vec::new(),
            highlight: Vec::new(),
            open_comment,
        }
    }

    /// Position of this row in the buffer.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    pub(crate) fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    /// Content as edited.
    #[must_use]
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Content with tabs expanded.
    #[must_use]
    pub fn render(&self) -> &[u8] {
        &self.render
    }

    /// One class per rendered byte.
    #[must_use]
    pub fn highlight(&self) -> &[Highlight] {
        &self.highlight
    }

    /// Whether a block comment is still open at the end of this row.
    #[must_use]
    pub fn open_comment(&self) -> bool {
        self.open_comment
    }

    /// Length of the raw content.
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Map a raw column to a render column.
    #[must_use]
    pub fn cx_to_rx(&self, cx: usize, tab_stop: usize) -> usize {
        let tab_stop = tab_stop.max(1);
        let mut rx = 0;
        for &c in self.raw.iter().take(cx) {
            if c == b'\t' {
                rx += (tab_stop - 1) - (rx % tab_stop);
            }
            rx += 1;
        }
        rx
    }

    /// Map a render column back to the raw column whose cell contains it.
    ///
    /// Returns the first raw column whose render extent passes `rx`, or the
    /// row length if `rx` lies beyond the end.
    #[must_use]
    pub fn rx_to_cx(&self, rx: usize, tab_stop: usize) -> usize {
        let tab_stop = tab_stop.max(1);
        let mut cur_rx = 0;
        for (cx, &c) in self.raw.iter().enumerate() {
            if c == b'\t' {
                cur_rx += (tab_stop - 1) - (cur_rx % tab_stop);
            }
            cur_rx += 1;
            if cur_rx > rx {
                return cx;
            }
        }
        self.raw.len()
    }

    /// Rebuild `render` from `raw` and resize `highlight` to match.
    ///
    /// Each tab emits at least one space and pads to the next multiple of
    /// `tab_stop`.
    pub(crate) fn update_render(&mut self, tab_stop: usize) {
        let tab_stop = tab_stop.max(1);
        let tabs = self.raw.iter().filter(|&&c| c == b'\t').count();
        let mut render = Vec::with_capacity(self.raw.len() + tabs * (tab_stop - 1));
        for &c in &self.raw {
            if c == b'\t' {
                render.push(b' ');
                while render.len() % tab_stop != 0 {
                    render.push(b' ');
                }
            } else {
                render.push(c);
            }
        }
        self.render = render;
        self.highlight.resize(self.render.len(), Highlight::Normal);
    }

    /// Replace the classification. Returns true if the end-of-row comment
    /// state changed.
    pub(crate) fn set_highlight(&mut self, highlight: Vec<Highlight>, open_comment: bool) -> bool {
        debug_assert_eq!(highlight.len(), self.render.len());
        self.highlight = highlight;
        let changed = self.open_comment != open_comment;
        self.open_comment = open_comment;
        changed
    }

    /// Mutable view of the classes, for temporary overlays. The length is
    /// fixed so the render/highlight invariant cannot be broken here.
    pub(crate) fn highlight_mut(&mut self) -> &mut [Highlight] {
        &mut self.highlight
    }

    /// Insert a byte, clamping `at` to the row length.
    pub(crate) fn insert(&mut self, at: usize, c: u8) {
        let at = at.min(self.raw.len());
        self.raw.insert(at, c);
    }

    /// Delete the byte at `at`. Returns false if `at` is out of range.
    pub(crate) fn remove(&mut self, at: usize) -> bool {
        if at >= self.raw.len() {
            return false;
        }
        self.raw.remove(at);
        true
    }

    /// Append bytes to the end of the row.
    pub(crate) fn append(&mut self, bytes: &[u8]) {
        self.raw.extend_from_slice(bytes);
    }

    /// Cut the row at `at` (clamped) and return the tail.
    pub(crate) fn split_off(&mut self, at: usize) -> Vec<u8> {
        let at = at.min(self.raw.len());
        self.raw.split_off(at)
    }
}
