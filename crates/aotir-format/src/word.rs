//! Width of `size` fields.

/// Byte width of every `size` field in a stream.
///
/// One stream uses one width throughout. It must equal the pointer width of the
/// runtime that reads the stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WordSize {
    Four,
    #[default]
    Eight,
}

impl WordSize {
    /// Width in bytes.
    #[inline]
    pub fn bytes(self) -> u32 {
        match self {
            Self::Four => 4,
            Self::Eight => 8,
        }
    }

    /// Largest value a `size` field can hold.
    pub fn max_value(self) -> u64 {
        match self {
            Self::Four => u64::from(u32::MAX),
            Self::Eight => u64::MAX,
        }
    }

    pub fn from_bytes(n: u32) -> Option<Self> {
        match n {
            4 => Some(Self::Four),
            8 => Some(Self::Eight),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_roundtrip() {
        assert_eq!(WordSize::from_bytes(4), Some(WordSize::Four));
        assert_eq!(WordSize::from_bytes(8), Some(WordSize::Eight));
        assert_eq!(WordSize::from_bytes(2), None);
        assert_eq!(WordSize::Four.bytes(), 4);
        assert_eq!(WordSize::Eight.bytes(), 8);
    }

    #[test]
    fn max_value() {
        assert_eq!(WordSize::Four.max_value(), 0xffff_ffff);
        assert_eq!(WordSize::Eight.max_value(), u64::MAX);
    }

    #[test]
    fn default_is_eight() {
        assert_eq!(WordSize::default(), WordSize::Eight);
    }
}
