//! Byte sources the decoder reads from and destinations encoders write to.
//!
//! Both sides are deliberately small: a [`Source`] is a cursor with a
//! current byte and `None` as the end-of-input sentinel, a [`Destination`]
//! is an append-only sink that remembers its last byte.

use bytes::{Bytes, BytesMut};
use std::fs::File;
use std::io::{Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use crate::error::BencodeError;

/// A pull-based cursor over input bytes.
pub trait Source {
    /// The byte under the cursor, or `None` once the input is exhausted.
    fn current(&self) -> Option<u8>;

    /// Advances the cursor by one byte. Does nothing at end of input.
    fn next(&mut self);

    /// Returns `true` while there are bytes left to read.
    fn more(&self) -> bool {
        self.current().is_some()
    }

    /// Moves the cursor back to the start of the input.
    fn reset(&mut self);

    /// Offset of the cursor from the start of the input.
    fn position(&self) -> usize;

    /// Consumes exactly `len` bytes.
    ///
    /// Fails with [`BencodeError::SourceExhausted`] without consuming
    /// anything if fewer than `len` bytes remain.
    fn take(&mut self, len: usize) -> Result<Bytes, BencodeError>;
}

/// An in-memory source. Strings taken from it share the underlying buffer.
#[derive(Debug, Clone)]
pub struct BufferSource {
    data: Bytes,
    pos: usize,
}

impl BufferSource {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            pos: 0,
        }
    }

    /// Reads a whole file into memory.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, BencodeError> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        debug!("read {} bytes from {}", data.len(), path.display());
        Ok(Self::new(data))
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }
}

impl Source for BufferSource {
    fn current(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    fn next(&mut self) {
        if self.pos < self.data.len() {
            self.pos += 1;
        }
    }

    fn reset(&mut self) {
        self.pos = 0;
    }

    fn position(&self) -> usize {
        self.pos
    }

    fn take(&mut self, len: usize) -> Result<Bytes, BencodeError> {
        let available = self.remaining();
        if len > available {
            return Err(BencodeError::SourceExhausted {
                expected: len,
                available,
            });
        }
        let bytes = self.data.slice(self.pos..self.pos + len);
        self.pos += len;
        Ok(bytes)
    }
}

/// A push-based sink for encoded bytes.
pub trait Destination {
    fn add(&mut self, bytes: &[u8]) -> Result<(), BencodeError>;

    fn add_byte(&mut self, byte: u8) -> Result<(), BencodeError> {
        self.add(&[byte])
    }

    /// Discards everything written so far.
    fn clear(&mut self) -> Result<(), BencodeError>;

    /// The most recently written byte, if any.
    fn last(&self) -> Option<u8>;
}

/// An in-memory destination.
#[derive(Debug, Clone, Default)]
pub struct BufferDestination {
    buf: BytesMut,
}

impl BufferDestination {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_bytes(self) -> Bytes {
        self.buf.freeze()
    }
}

impl Destination for BufferDestination {
    fn add(&mut self, bytes: &[u8]) -> Result<(), BencodeError> {
        self.buf.extend_from_slice(bytes);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), BencodeError> {
        self.buf.clear();
        Ok(())
    }

    fn last(&self) -> Option<u8> {
        self.buf.last().copied()
    }
}

impl Destination for Vec<u8> {
    fn add(&mut self, bytes: &[u8]) -> Result<(), BencodeError> {
        self.extend_from_slice(bytes);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), BencodeError> {
        Vec::clear(self);
        Ok(())
    }

    fn last(&self) -> Option<u8> {
        self.as_slice().last().copied()
    }
}

/// A destination backed by a file.
///
/// Every `add` goes straight to the file handle, so the file holds exactly
/// what has been written after each call.
#[derive(Debug)]
pub struct FileDestination {
    file: File,
    path: PathBuf,
    last: Option<u8>,
    written: u64,
}

impl FileDestination {
    /// Creates the file, truncating it if it exists.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, BencodeError> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)?;
        debug!("opened {} for writing", path.display());
        Ok(Self {
            file,
            path,
            last: None,
            written: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of bytes written since creation or the last `clear`.
    pub fn written(&self) -> u64 {
        self.written
    }
}

impl Destination for FileDestination {
    fn add(&mut self, bytes: &[u8]) -> Result<(), BencodeError> {
        if bytes.is_empty() {
            return Ok(());
        }
        self.file.write_all(bytes)?;
        self.written += bytes.len() as u64;
        self.last = bytes.last().copied();
        Ok(())
    }

    fn clear(&mut self) -> Result<(), BencodeError> {
        self.file.set_len(0)?;
        self.file.seek(SeekFrom::Start(0))?;
        trace!("truncated {}", self.path.display());
        self.written = 0;
        self.last = None;
        Ok(())
    }

    fn last(&self) -> Option<u8> {
        self.last
    }
}
