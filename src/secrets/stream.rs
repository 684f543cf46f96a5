//! Line-buffered masking writer.
//!
//! [`MaskingWriter`] wraps any [`Write`] sink. Bytes are held until a full
//! line is available, so a secret flushed by the producer across several
//! writes is still recognized once its line is complete.

use std::borrow::Cow;
use std::collections::HashMap;
use std::io::{self, Write};

use memchr::memchr;

use super::mask::OutputMasker;
use crate::error::Result;

/// A writer that masks secret values before they reach the inner sink.
///
/// Complete lines are masked and forwarded as soon as their `\n` arrives;
/// the unterminated tail of the stream is kept in an internal buffer.
/// [`flush`](Write::flush) only flushes the sink and leaves that tail
/// buffered. Call [`close`](MaskingWriter::close) at end of stream to emit
/// it; dropping the writer does the same on a best-effort basis.
///
/// Writes must be serialized by the caller. Use one writer per stream.
pub struct MaskingWriter<'a, W: Write> {
    inner: W,
    masker: Cow<'a, OutputMasker>,
    buffer: Vec<u8>,
    /// Masked output the sink has only partly accepted.
    pending: Vec<u8>,
}

impl<W: Write> MaskingWriter<'static, W> {
    /// Create a writer that owns a masker compiled from `secrets`.
    ///
    /// # Example
    ///
    /// ```
    /// use logmask::secrets::{MaskingWriter, MASK_TOKEN};
    /// use std::collections::HashMap;
    /// use std::io::Write;
    ///
    /// let mut secrets = HashMap::new();
    /// secrets.insert("cipher".to_string(), "lazy dog".to_string());
    ///
    /// let mut output = Vec::new();
    /// let mut writer = MaskingWriter::new(&mut output, &secrets).unwrap();
    /// writer.write_all(b"over the la").unwrap();
    /// writer.write_all(b"zy dog\n").unwrap();
    /// drop(writer);
    ///
    /// assert_eq!(output, format!("over the {}\n", MASK_TOKEN).into_bytes());
    /// ```
    pub fn new(inner: W, secrets: &HashMap<String, String>) -> Result<Self> {
        let masker = OutputMasker::from_secrets(secrets)?;
        Ok(Self::with_masker(inner, Cow::Owned(masker)))
    }
}

impl<'a, W: Write> MaskingWriter<'a, W> {
    pub(crate) fn with_masker(inner: W, masker: Cow<'a, OutputMasker>) -> Self {
        Self {
            inner,
            masker,
            buffer: Vec::new(),
            pending: Vec::new(),
        }
    }

    /// Send pending output, mask and emit any buffered partial line, then
    /// flush the sink.
    ///
    /// Safe to call more than once. If the sink fails, the partial line
    /// stays buffered and the sink's error is returned unchanged.
    pub fn close(&mut self) -> io::Result<()> {
        send_pending(&mut self.inner, &mut self.pending)?;
        if !self.buffer.is_empty() {
            let tail = self.masker.mask_bytes(&self.buffer);
            self.inner.write_all(&tail)?;
            tracing::debug!("Flushed {} byte unterminated tail", self.buffer.len());
            self.buffer.clear();
        }
        self.inner.flush()
    }

    /// Number of bytes waiting for a line terminator.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    pub fn masker(&self) -> &OutputMasker {
        &self.masker
    }
}

impl<W: Write> Write for MaskingWriter<'_, W> {
    /// Accept `buf`, forwarding every line it completes.
    ///
    /// If the sink fails before any byte of this call reaches it, the error
    /// is returned and `buf` is not consumed. Once some output has gone out,
    /// the call instead returns the number of bytes consumed so far and the
    /// sink's error surfaces on the next call. Callers using plain `write`
    /// rather than `write_all` must resend everything past the returned
    /// count.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        // Output accepted by an earlier call goes first.
        send_pending(&mut self.inner, &mut self.pending)?;

        // The carried tail never contains '\n', so only `buf` is searched and
        // the first complete line always ends inside it.
        let carried = self.buffer.len();
        self.buffer.extend_from_slice(buf);

        let mut start = 0;
        let mut search_from = carried;
        while let Some(offset) = memchr(b'\n', &self.buffer[search_from..]) {
            let end = search_from + offset + 1;
            let failure = {
                let (body, terminator) = split_terminator(&self.buffer[start..end]);
                let masked = match self.masker.mask_bytes(body) {
                    Cow::Borrowed(_) => Cow::Borrowed(&self.buffer[start..end]),
                    Cow::Owned(mut masked) => {
                        masked.extend_from_slice(terminator);
                        Cow::Owned(masked)
                    }
                };
                match send(&mut self.inner, &masked) {
                    Ok(()) => None,
                    Err((sent, err)) => {
                        if sent > 0 {
                            self.pending.extend_from_slice(&masked[sent..]);
                        }
                        Some((sent, err))
                    }
                }
            };

            if let Some((sent, err)) = failure {
                if sent > 0 {
                    // Part of the line is downstream; the line is consumed
                    // and its remainder goes out before anything else.
                    self.buffer.clear();
                    return Ok(end - carried);
                }
                if start == 0 {
                    // Nothing from `buf` reached the sink; forget it.
                    self.buffer.truncate(carried);
                    return Err(err);
                }
                // Earlier lines went out. Everything left came from `buf`,
                // so report a short write and let the caller resend it.
                self.buffer.clear();
                return Ok(start - carried);
            }
            start = end;
            search_from = end;
        }

        self.buffer.drain(..start);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        send_pending(&mut self.inner, &mut self.pending)?;
        self.inner.flush()
    }
}

impl<W: Write> Drop for MaskingWriter<'_, W> {
    fn drop(&mut self) {
        if self.buffer.is_empty() && self.pending.is_empty() {
            return;
        }
        if let Err(e) = self.close() {
            tracing::warn!(
                "Dropped {} buffered byte(s) after sink error: {}",
                self.buffer.len() + self.pending.len(),
                e
            );
        }
    }
}

/// Write all of `bytes`, reporting how many were accepted before a failure.
fn send<W: Write>(inner: &mut W, bytes: &[u8]) -> std::result::Result<(), (usize, io::Error)> {
    let mut sent = 0;
    while sent < bytes.len() {
        match inner.write(&bytes[sent..]) {
            Ok(0) => {
                return Err((
                    sent,
                    io::Error::new(io::ErrorKind::WriteZero, "failed to write whole line"),
                ))
            }
            Ok(n) => sent += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err((sent, e)),
        }
    }
    Ok(())
}

/// Forward the rest of a line the sink only partly accepted.
fn send_pending<W: Write>(inner: &mut W, pending: &mut Vec<u8>) -> io::Result<()> {
    if pending.is_empty() {
        return Ok(());
    }
    let result = send(inner, pending);
    let sent = match &result {
        Ok(()) => pending.len(),
        Err((sent, _)) => *sent,
    };
    pending.drain(..sent);
    result.map_err(|(_, e)| e)
}

/// Split a line into its body and its `\n` or `\r\n` terminator.
///
/// Only the body is matched; the terminator is written back verbatim.
fn split_terminator(line: &[u8]) -> (&[u8], &[u8]) {
    let cut = if line.ends_with(b"\r\n") {
        2
    } else if line.ends_with(b"\n") {
        1
    } else {
        0
    };
    line.split_at(line.len() - cut)
}
