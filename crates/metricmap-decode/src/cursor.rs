//! Positioned read cursor over a caller-owned MessagePack buffer.
//!
//! The cursor never owns or copies the buffer. Reads advance `position`;
//! the first failed read latches the cursor into an error state and every
//! later read fails with [`DecodeError::EngineError`], so a caller can never
//! resume from a half-consumed value.

use rmp::Marker;

use crate::config::DecodeLimits;
use crate::error::{DecodeError, DecodeResult};

#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
    limits: DecodeLimits,
    poisoned: bool,
}

impl<'a> Cursor<'a> {
    /// Cursor at the start of `buf` with default limits.
    pub fn new(buf: &'a [u8]) -> Self {
        Self::with_limits(buf, DecodeLimits::default())
    }

    pub fn with_limits(buf: &'a [u8], limits: DecodeLimits) -> Self {
        Self {
            buf,
            pos: 0,
            limits,
            poisoned: false,
        }
    }

    pub fn limits(&self) -> &DecodeLimits {
        &self.limits
    }

    /// Byte offset of the next unread tag.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Unread byte count.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// True once any read has failed.
    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    /// Latch the error state and hand `err` back for propagation.
    pub(crate) fn fail(&mut self, err: DecodeError) -> DecodeError {
        self.poisoned = true;
        err
    }

    /// Marker of the next value, without consuming it.
    pub(crate) fn peek_marker(&mut self) -> DecodeResult<Marker> {
        self.ensure_healthy()?;
        let mut probe: &[u8] = &self.buf[self.pos..];
        match rmp::decode::read_marker(&mut probe) {
            Ok(Marker::Reserved) => Err(self.fail(DecodeError::CorruptInputData(format!(
                "reserved marker at offset {}",
                self.pos
            )))),
            Ok(marker) => Ok(marker),
            Err(_) => Err(self.fail(exhausted(self.pos, "tag"))),
        }
    }

    /// Run an `rmp` read against the unread tail, advancing past whatever it
    /// consumed. The marker must already have been checked by the caller, so
    /// any failure here is a truncated value.
    pub(crate) fn read<T, E>(
        &mut self,
        what: &str,
        f: impl FnOnce(&mut &'a [u8]) -> Result<T, E>,
    ) -> DecodeResult<T> {
        self.ensure_healthy()?;
        let buf: &'a [u8] = self.buf;
        let mut rd = &buf[self.pos..];
        let before = rd.len();
        let result = f(&mut rd);
        self.pos += before - rd.len();
        result.map_err(|_| self.fail(exhausted(self.pos, what)))
    }

    /// Borrow the next `len` raw bytes.
    pub(crate) fn take(&mut self, len: usize) -> DecodeResult<&'a [u8]> {
        self.ensure_healthy()?;
        if len > self.remaining() {
            return Err(self.fail(exhausted(self.pos, "payload")));
        }
        let buf: &'a [u8] = self.buf;
        let bytes = &buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    /// Read a map header, returning its declared entry count.
    pub(crate) fn read_map_len(&mut self) -> DecodeResult<u32> {
        match self.peek_marker()? {
            Marker::FixMap(_) | Marker::Map16 | Marker::Map32 => {}
            other => return Err(self.unexpected_container(other, "map")),
        }
        self.read("map header", |rd| rmp::decode::read_map_len(rd))
    }

    /// Read an array header, returning its declared entry count.
    pub(crate) fn read_array_len(&mut self) -> DecodeResult<u32> {
        match self.peek_marker()? {
            Marker::FixArray(_) | Marker::Array16 | Marker::Array32 => {}
            other => return Err(self.unexpected_container(other, "array")),
        }
        self.read("array header", |rd| rmp::decode::read_array_len(rd))
    }

    pub(crate) fn unexpected_scalar(&mut self, found: Marker, expected: &str) -> DecodeError {
        let err = DecodeError::ConsumeError(format!(
            "expected {expected} at offset {}, found {found:?}",
            self.pos
        ));
        self.fail(err)
    }

    fn unexpected_container(&mut self, found: Marker, expected: &str) -> DecodeError {
        let err = DecodeError::UnexpectedDataType(format!(
            "expected {expected} at offset {}, found {found:?}",
            self.pos
        ));
        self.fail(err)
    }

    fn ensure_healthy(&self) -> DecodeResult<()> {
        if self.poisoned {
            return Err(DecodeError::EngineError);
        }
        Ok(())
    }
}

fn exhausted(offset: usize, what: &str) -> DecodeError {
    DecodeError::ConsumeError(format!("buffer exhausted reading {what} at offset {offset}"))
}
