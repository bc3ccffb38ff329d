//! Byte sources with a bounded wait.

use std::io::{self, Read};

/// A blocking byte source with a short per-read timeout.
pub trait ByteSource {
    /// Read one byte.
    ///
    /// Returns `Ok(None)` when nothing arrived within the timeout. Callers
    /// may poll again afterwards.
    fn read_byte(&mut self) -> io::Result<Option<u8>>;
}

/// Adapts any reader into a [`ByteSource`].
///
/// With stdin in raw mode (`VMIN = 0`, `VTIME > 0`) a read returns 0 bytes
/// when the timeout expires; that and `Interrupted`/`WouldBlock` are all
/// reported as "no byte".
#[derive(Debug)]
pub struct TimedReader<R> {
    inner: R,
}

impl<R: Read> TimedReader<R> {
    /// Wrap a reader.
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Mutable access to the wrapped reader.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }
}

impl TimedReader<io::Stdin> {
    /// Byte source over the process's standard input.
    #[must_use]
    pub fn stdin() -> Self {
        Self::new(io::stdin())
    }
}

impl<R: Read> ByteSource for TimedReader<R> {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut byte = [0u8; 1];
        match self.inner.read(&mut byte) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(byte[0])),
            Err(e) if matches!(e.kind(), io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock) => {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        (**self).read_byte()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing(io::ErrorKind);

    impl Read for Failing {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(self.0, "scripted"))
        }
    }

    #[test]
    fn test_reads_bytes_then_times_out() {
        let mut source = TimedReader::new(&b"ab"[..]);
        assert_eq!(source.read_byte().unwrap(), Some(b'a'));
        assert_eq!(source.read_byte().unwrap(), Some(b'b'));
        assert_eq!(source.read_byte().unwrap(), None);
        assert_eq!(source.read_byte().unwrap(), None);
    }

    #[test]
    fn test_transient_errors_are_timeouts() {
        let mut source = TimedReader::new(Failing(io::ErrorKind::Interrupted));
        assert_eq!(source.read_byte().unwrap(), None);
        let mut source = TimedReader::new(Failing(io::ErrorKind::WouldBlock));
        assert_eq!(source.read_byte().unwrap(), None);
    }

    #[test]
    fn test_hard_errors_propagate() {
        let mut source = TimedReader::new(Failing(io::ErrorKind::BrokenPipe));
        assert!(source.read_byte().is_err());
    }
}
