//! Logical key types.

/// Byte produced by Enter in raw mode (no `ICRNL` translation).
pub const ENTER: u8 = b'\r';

/// Byte for the escape key and the start of every escape sequence.
pub const ESC: u8 = 0x1b;

/// Byte sent by the Backspace key on most terminals.
pub const DEL: u8 = 0x7f;

/// Control code for a letter, e.g. `ctrl(b'q') == 0x11`.
#[must_use]
pub const fn ctrl(c: u8) -> u8 {
    c & 0x1f
}

/// One logical key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable or control character, by byte value.
    Char(u8),
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// Home.
    Home,
    /// End.
    End,
    /// Page Up.
    PageUp,
    /// Page Down.
    PageDown,
    /// Delete (forward delete).
    Delete,
    /// Backspace (byte `0x7f`).
    Backspace,
    /// Plain escape, including any unrecognized or incomplete sequence.
    Escape,
}

impl Key {
    /// Check if this is the control chord for `c` (e.g. `b'q'` for Ctrl-Q).
    #[must_use]
    pub fn is_ctrl(&self, c: u8) -> bool {
        *self == Self::Char(ctrl(c))
    }

    /// Check if this is an arrow key.
    #[must_use]
    pub fn is_arrow(&self) -> bool {
        matches!(
            self,
            Self::ArrowUp | Self::ArrowDown | Self::ArrowLeft | Self::ArrowRight
        )
    }

    /// Check if this key erases the character before the cursor in a prompt
    /// (Backspace, Ctrl-H or Delete).
    #[must_use]
    pub fn is_erase(&self) -> bool {
        matches!(self, Self::Backspace | Self::Delete) || self.is_ctrl(b'h')
    }

    /// Printable ASCII byte carried by this key, if any.
    #[must_use]
    pub fn printable(&self) -> Option<u8> {
        match *self {
            Self::Char(c) if (0x20..0x7f).contains(&c) => Some(c),
            _ => None,
        }
    }
}

impl From<u8> for Key {
    fn from(byte: u8) -> Self {
        match byte {
            DEL => Self::Backspace,
            ESC => Self::Escape,
            b => Self::Char(b),
        }
    }
}
