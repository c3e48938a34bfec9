use std::io::{ErrorKind, Write};

use bytes::BytesMut;
use serde::Serialize;

use crate::codec::{check_single_line, encode_text, put_line};
use crate::error::{FrameError, Result};
use crate::terminator::LineTerminator;

const INITIAL_BUFFER_CAPACITY: usize = 8 * 1024;

/// Writes complete, flushed lines to any `Write` stream.
///
/// By default a `WouldBlock` from the stream is retried until the line is
/// out. [`best_effort`](Self::best_effort) writers give up instead, for
/// sinks that must never hold up the caller.
pub struct LineWriter<T> {
    inner: T,
    buf: BytesMut,
    terminator: LineTerminator,
    retry_would_block: bool,
}

impl<T: Write> LineWriter<T> {
    /// Create a new line writer using the platform terminator.
    pub fn new(inner: T) -> Self {
        Self::with_terminator(inner, LineTerminator::platform())
    }

    /// Create a new line writer with an explicit terminator.
    pub fn with_terminator(inner: T, terminator: LineTerminator) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            terminator,
            retry_would_block: true,
        }
    }

    /// Fail with the `WouldBlock` error instead of retrying it.
    pub fn best_effort(mut self) -> Self {
        self.retry_would_block = false;
        self
    }

    /// Serialize a message and write it as one line (blocking).
    pub fn write_message<M: Serialize + ?Sized>(&mut self, message: &M) -> Result<()> {
        let text = encode_text(message)?;
        self.write_line(&text)
    }

    /// Write `text` followed by the terminator, then flush.
    ///
    /// Nothing is written if `text` contains a raw line break. If the stream
    /// fails after part of the line went out, one attempt is made to write
    /// the terminator so the fragment does not merge with the next line.
    pub fn write_line(&mut self, text: &str) -> Result<()> {
        check_single_line(text)?;

        self.buf.clear();
        put_line(text, self.terminator, &mut self.buf);

        let mut offset = 0usize;
        while offset < self.buf.len() {
            let err = match self.inner.write(&self.buf[offset..]) {
                Ok(0) => FrameError::ConnectionClosed,
                Ok(n) => {
                    offset += n;
                    continue;
                }
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock && self.retry_would_block => {
                    continue
                }
                Err(err) => FrameError::Io(err),
            };
            if offset > 0 {
                self.terminate_fragment();
            }
            return Err(err);
        }

        self.flush()
    }

    /// Flush the underlying stream.
    pub fn flush(&mut self) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock && self.retry_would_block => {
                    continue
                }
                Err(err) => return Err(FrameError::Io(err)),
            }
        }
    }

    fn terminate_fragment(&mut self) {
        // The failure being reported matters more than this one.
        let _ = self.inner.write_all(self.terminator.as_bytes());
    }
}

impl<T> LineWriter<T> {
    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the writer and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Terminator appended after each line.
    pub fn terminator(&self) -> LineTerminator {
        self.terminator
    }

    /// True unless built with [`best_effort`](LineWriter::best_effort).
    pub fn retries_would_block(&self) -> bool {
        self.retry_would_block
    }
}

impl<T> std::fmt::Debug for LineWriter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineWriter")
            .field("terminator", &self.terminator)
            .field("retry_would_block", &self.retry_would_block)
            .finish_non_exhaustive()
    }
}
