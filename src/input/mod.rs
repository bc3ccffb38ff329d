//! Keyboard input decoding.
//!
//! This module turns the raw byte stream from the terminal into logical
//! [`Key`] events. A [`ByteSource`] supplies single bytes with a bounded
//! wait; [`KeyDecoder`] groups them into keys, resolving escape sequences.

mod decoder;
mod keyboard;
mod source;

pub use decoder::{KeyDecoder, read_key};
pub use keyboard::{DEL, ENTER, ESC, Key, ctrl};
pub use source::{ByteSource, TimedReader};
