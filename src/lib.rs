//! `kilt` - a small screen-oriented text editor for the terminal
//!
//! Rows of single-byte text with tab rendering, an incremental syntax
//! highlighter whose block-comment state cascades across rows, a
//! cursor-following viewport that only emits color escapes on class changes,
//! and a type-ahead search that overlays and restores highlight exactly.
//!
//! # Example
//!
//! ```
//! use kilt::highlight::{Highlight, select_profile};
//! use kilt::text::Buffer;
//!
//! let mut buffer = Buffer::from_lines(["", "int x;"], 8);
//! buffer.set_profile(select_profile("main.c"));
//! buffer.insert_char(b'/');
//! buffer.insert_char(b'*');
//! assert_eq!(buffer.row(1).unwrap().highlight()[0], Highlight::BlockComment);
//! ```

// Crate-level lint configuration
#![warn(unsafe_code)] // Unsafe code needs justification (required for termios FFI)
#![allow(clippy::module_name_repetitions)] // Allow highlight::Highlight etc
#![allow(clippy::missing_errors_doc)] // Errors are the crate Error, documented there
#![allow(clippy::missing_panics_doc)] // Indexing is guarded by length checks
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::cast_possible_truncation)] // Screen coordinates fit in u32

pub mod ansi;
pub mod config;
pub mod editor;
pub mod error;
pub mod highlight;
pub mod input;
pub mod renderer;
pub mod search;
pub mod terminal;
pub mod text;

// Re-export core types at crate root
pub use config::EditorConfig;
pub use editor::{Editor, Outcome};
pub use error::{Error, Result};
pub use highlight::{Highlight, LanguageProfile};
pub use input::{ByteSource, Key, KeyDecoder, TimedReader};
pub use renderer::Viewport;
pub use search::Search;
pub use terminal::{RawModeGuard, Terminal, enable_raw_mode, is_tty, terminal_size};
pub use text::{Buffer, Row};
