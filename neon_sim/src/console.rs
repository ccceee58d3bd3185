//! Console sink that counts the lines written through it.

use std::io::{self, Write};

/// Wraps a writer and counts newline bytes that reached it.
pub struct LineCounter<'a, W: Write + ?Sized> {
    inner: &'a mut W,
    lines: usize,
}

impl<'a, W: Write + ?Sized> LineCounter<'a, W> {
    pub fn new(inner: &'a mut W) -> Self {
        Self { inner, lines: 0 }
    }

    /// Completed lines so far.
    pub fn lines(&self) -> usize {
        self.lines
    }
}

impl<W: Write + ?Sized> Write for LineCounter<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.inner.write(buf)?;
        self.lines += buf[..written].iter().filter(|&&b| b == b'\n').count();
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
