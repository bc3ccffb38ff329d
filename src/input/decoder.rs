//! Escape sequence decoder for terminal key input.
//!
//! Decodes raw bytes from a [`ByteSource`] into [`Key`] events. Supports:
//! - `ESC [ <digit> ~` for Home, Delete, End, Page Up and Page Down
//!   (both the `1`/`7` Home and `4`/`8` End conventions)
//! - `ESC [ <letter>` for arrows and Home/End
//! - `ESC O <letter>` for Home/End
//!
//! Anything else starting with `ESC`, including a sequence that stops
//! arriving, collapses to [`Key::Escape`].

// Decoder has many match arms for equivalent terminal sequences
#![allow(clippy::match_same_arms)]

use std::io;

use crate::input::keyboard::{ESC, Key};
use crate::input::source::ByteSource;

/// Reads one logical key per call from a byte source.
///
/// Nothing is buffered between calls: every call consumes exactly the bytes
/// of one event, so the decoder can be dropped or restarted at any point.
#[derive(Debug)]
pub struct KeyDecoder<S> {
    source: S,
}

impl<S: ByteSource> KeyDecoder<S> {
    /// Create a decoder over a byte source.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Access the underlying source.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Read the next key.
    ///
    /// Returns `Ok(None)` if no byte arrived within the source's timeout.
    pub fn read_key(&mut self) -> io::Result<Option<Key>> {
        read_key(&mut self.source)
    }
}

impl<S: ByteSource> Iterator for KeyDecoder<S> {
    type Item = io::Result<Key>;

    /// `None` means "nothing yet", not end of stream; polling again resumes.
    fn next(&mut self) -> Option<Self::Item> {
        self.read_key().transpose()
    }
}

/// Decode one key from `source`.
pub fn read_key<S: ByteSource + ?Sized>(source: &mut S) -> io::Result<Option<Key>> {
    let Some(first) = source.read_byte()? else {
        return Ok(None);
    };
    if first != ESC {
        return Ok(Some(Key::from(first)));
    }
    decode_escape(source).map(Some)
}

/// Decode the remainder of an escape sequence after the leading `ESC`.
fn decode_escape<S: ByteSource + ?Sized>(source: &mut S) -> io::Result<Key> {
    let Some(intro) = source.read_byte()? else {
        return Ok(Key::Escape);
    };
    let Some(code) = source.read_byte()? else {
        return Ok(Key::Escape);
    };

    let key = match intro {
        b'[' if code.is_ascii_digit() => {
            let Some(terminator) = source.read_byte()? else {
                return Ok(Key::Escape);
            };
            if terminator == b'~' {
                tilde_key(code)
            } else {
                Key::Escape
            }
        }
        b'[' => csi_letter_key(code),
        b'O' => ss3_key(code),
        _ => Key::Escape,
    };
    Ok(key)
}

/// Map `ESC [ <digit> ~`.
fn tilde_key(digit: u8) -> Key {
    match digit {
        b'1' | b'7' => Key::Home,
        b'3' => Key::Delete,
        b'4' | b'8' => Key::End,
        b'5' => Key::PageUp,
        b'6' => Key::PageDown,
        _ => Key::Escape,
    }
}

/// Map `ESC [ <letter>`.
fn csi_letter_key(letter: u8) -> Key {
    match letter {
        b'A' => Key::ArrowUp,
        b'B' => Key::ArrowDown,
        b'C' => Key::ArrowRight,
        b'D' => Key::ArrowLeft,
        b'H' => Key::Home,
        b'F' => Key::End,
        _ => Key::Escape,
    }
}

/// Map `ESC O <letter>`.
fn ss3_key(letter: u8) -> Key {
    match letter {
        b'H' => Key::Home,
        b'F' => Key::End,
        _ => Key::Escape,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::source::TimedReader;

    fn decode_all(bytes: &[u8]) -> Vec<Key> {
        let decoder = KeyDecoder::new(TimedReader::new(bytes));
        decoder.map(|key| key.unwrap()).collect()
    }

    fn decode_one(bytes: &[u8]) -> Option<Key> {
        let mut source = TimedReader::new(bytes);
        read_key(&mut source).unwrap()
    }

    #[test]
    fn test_plain_bytes() {
        assert_eq!(decode_one(b"a"), Some(Key::Char(b'a')));
        assert_eq!(decode_one(b"\r"), Some(Key::Char(b'\r')));
        assert_eq!(decode_one(&[0x11]), Some(Key::Char(0x11)));
        assert_eq!(decode_one(&[0x7f]), Some(Key::Backspace));
    }

    #[test]
    fn test_empty_source_is_timeout() {
        assert_eq!(decode_one(b""), None);
    }

    #[test]
    fn test_lone_escape_does_not_block() {
        assert_eq!(decode_one(b"\x1b"), Some(Key::Escape));
    }

    #[test]
    fn test_truncated_sequences_degrade_to_escape() {
        assert_eq!(decode_one(b"\x1b["), Some(Key::Escape));
        assert_eq!(decode_one(b"\x1b[3"), Some(Key::Escape));
        assert_eq!(decode_one(b"\x1bO"), Some(Key::Escape));
    }

    #[test]
    fn test_arrows() {
        assert_eq!(
            decode_all(b"\x1b[A\x1b[B\x1b[C\x1b[D"),
            vec![Key::ArrowUp, Key::ArrowDown, Key::ArrowRight, Key::ArrowLeft]
        );
    }

    #[test]
    fn test_tilde_keys_with_duplicate_conventions() {
        assert_eq!(decode_one(b"\x1b[1~"), Some(Key::Home));
        assert_eq!(decode_one(b"\x1b[7~"), Some(Key::Home));
        assert_eq!(decode_one(b"\x1b[4~"), Some(Key::End));
        assert_eq!(decode_one(b"\x1b[8~"), Some(Key::End));
        assert_eq!(decode_one(b"\x1b[3~"), Some(Key::Delete));
        assert_eq!(decode_one(b"\x1b[5~"), Some(Key::PageUp));
        assert_eq!(decode_one(b"\x1b[6~"), Some(Key::PageDown));
        assert_eq!(decode_one(b"\x1b[2~"), Some(Key::Escape));
    }

    #[test]
    fn test_home_end_letter_forms() {
        assert_eq!(decode_one(b"\x1b[H"), Some(Key::Home));
        assert_eq!(decode_one(b"\x1b[F"), Some(Key::End));
        assert_eq!(decode_one(b"\x1bOH"), Some(Key::Home));
        assert_eq!(decode_one(b"\x1bOF"), Some(Key::End));
    }

    #[test]
    fn test_unknown_sequences_collapse() {
        assert_eq!(decode_one(b"\x1b[Z"), Some(Key::Escape));
        assert_eq!(decode_one(b"\x1bOP"), Some(Key::Escape));
        assert_eq!(decode_one(b"\x1bxy"), Some(Key::Escape));
    }

    #[test]
    fn test_digit_without_tilde_consumes_three_bytes() {
        // ESC [ 5 x -> Escape; the following 'q' is the next event.
        assert_eq!(decode_all(b"\x1b[5xq"), vec![Key::Escape, Key::Char(b'q')]);
    }

    #[test]
    fn test_each_call_consumes_one_event() {
        assert_eq!(
            decode_all(b"a\x1b[5~b\x1bOFc"),
            vec![
                Key::Char(b'a'),
                Key::PageUp,
                Key::Char(b'b'),
                Key::End,
                Key::Char(b'c'),
            ]
        );
    }

    #[test]
    fn test_iterator_resumes_after_timeout() {
        use std::collections::VecDeque;
        use std::io::Read;

        struct Queue(VecDeque<u8>);
        impl Read for Queue {
            fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
                match self.0.pop_front() {
                    Some(b) => {
                        buf[0] = b;
                        Ok(1)
                    }
                    None => Ok(0),
                }
            }
        }

        let mut decoder = KeyDecoder::new(TimedReader::new(Queue(VecDeque::from(vec![b'x']))));
        assert_eq!(decoder.next().unwrap().unwrap(), Key::Char(b'x'));
        assert!(decoder.next().is_none());

        decoder.source_mut().get_mut().0.push_back(b'y');
        assert_eq!(decoder.next().unwrap().unwrap(), Key::Char(b'y'));
    }
}
