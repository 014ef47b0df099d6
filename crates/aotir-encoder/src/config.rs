//! Encoder configuration.

use aotir_format::WordSize;

/// Knobs for one encoding run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EncoderConfig {
    /// Width of every `size` field, and the only pointer width the stream can
    /// describe.
    pub word_size: WordSize,
}

impl EncoderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_word_size(mut self, word_size: WordSize) -> Self {
        self.word_size = word_size;
        self
    }
}
