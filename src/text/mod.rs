//! Text storage: rows of raw bytes with their rendered and classified forms.
//!
//! Key types:
//!
//! - [`Row`]: One line with tab-expanded render text and per-byte highlight
//! - [`Buffer`]: Ordered rows, the cursor, and the unsaved-change counter
//!
//! # Examples
//!
//! ```
//! use kilt::text::Buffer;
//!
//! let mut buffer = Buffer::from_lines(["abc", "def"], 8);
//! buffer.cursor.y = 1;
//! buffer.delete_char();
//! assert_eq!(buffer.row(0).unwrap().raw(), b"abcdef");
//! assert_eq!(buffer.cursor.x, 3);
//! ```

mod buffer;
mod row;

pub use buffer::{Buffer, Cursor};
pub use row::Row;
