//! Output sink for the stream.
//!
//! Integers are little-endian. `size` fields are one machine word wide, as
//! fixed by the [`WordSize`] the writer was created with.

use aotir_format::{Header, WordSize};

use crate::EncodeError;

/// Append-only byte buffer with the stream's primitive encodings.
#[derive(Debug)]
pub struct StreamWriter {
    buf: Vec<u8>,
    word: WordSize,
}

impl StreamWriter {
    pub fn new(word: WordSize) -> Self {
        Self {
            buf: Vec::new(),
            word,
        }
    }

    pub fn word_size(&self) -> WordSize {
        self.word
    }

    pub fn write_header(&mut self, header: &Header) {
        self.buf.extend_from_slice(&header.to_bytes());
    }

    pub fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    pub fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    /// Write a `size` field.
    pub fn write_size(&mut self, v: u64) -> Result<(), EncodeError> {
        if v > self.word.max_value() {
            return Err(EncodeError::SizeOverflow {
                value: v,
                word: self.word.bytes(),
            });
        }
        let bytes = v.to_le_bytes();
        self.buf.extend_from_slice(&bytes[..self.word.bytes() as usize]);
        Ok(())
    }

    /// Write a `size` field holding a count or index.
    #[inline]
    pub fn write_index(&mut self, v: usize) -> Result<(), EncodeError> {
        self.write_size(v as u64)
    }

    /// Write `s` followed by a NUL byte. `s` itself must not contain one.
    pub fn write_cstr(&mut self, s: &str) -> Result<(), EncodeError> {
        if s.contains('\0') {
            return Err(EncodeError::InteriorNul(s.to_owned()));
        }
        self.buf.extend_from_slice(s.as_bytes());
        self.buf.push(0);
        Ok(())
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}
