//! Constant ANSI escape sequences.

/// Reset all attributes to default.
pub const RESET: &str = "\x1b[m";

/// Clear entire screen.
pub const CLEAR_SCREEN: &str = "\x1b[2J";

/// Clear from cursor to end of line.
pub const CLEAR_LINE_RIGHT: &str = "\x1b[K";

/// Hide cursor.
pub const CURSOR_HIDE: &str = "\x1b[?25l";

/// Show cursor.
pub const CURSOR_SHOW: &str = "\x1b[?25h";

/// Move cursor to home position (1,1).
pub const CURSOR_HOME: &str = "\x1b[H";

/// Push the cursor to the bottom-right corner.
///
/// `C` and `B` stop at the screen edge, unlike `H` which may wrap or be
/// rejected for out-of-range coordinates.
pub const CURSOR_FAR_CORNER: &str = "\x1b[999C\x1b[999B";

/// Device status report: request the cursor position (`ESC [ rows ; cols R`).
pub const REQUEST_CURSOR_POSITION: &str = "\x1b[6n";

/// Inverse video on.
pub const INVERSE: &str = "\x1b[7m";

/// Line terminator used between screen rows in raw mode (no `OPOST`).
pub const NEWLINE: &str = "\r\n";

/// Color reset sequences.
pub mod color {
    /// Reset foreground to default.
    pub const FG_DEFAULT: &str = "\x1b[39m";
}
