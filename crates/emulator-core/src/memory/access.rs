//! Sized big-endian access into a segment backing store.

/// Width of a memory access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum AccessSize {
    /// One byte.
    Byte,
    /// Two bytes.
    HalfWord,
    /// Four bytes.
    Word,
}

impl AccessSize {
    /// Returns the width in bytes.
    #[must_use]
    pub const fn bytes(self) -> usize {
        match self {
            Self::Byte => 1,
            Self::HalfWord => 2,
            Self::Word => 4,
        }
    }
}

/// Reads `size` bytes at `offset`, most significant byte first, zero-extended.
///
/// Returns `None` when the access would run past the end of `segment`.
#[must_use]
pub fn read_be(segment: &[u8], offset: usize, size: AccessSize) -> Option<u32> {
    let bytes = segment.get(offset..offset.checked_add(size.bytes())?)?;
    Some(
        bytes
            .iter()
            .fold(0u32, |acc, byte| (acc << 8) | u32::from(*byte)),
    )
}

/// Writes the low `size` bytes of `value` at `offset`, most significant first.
///
/// Returns `None` without touching `segment` when the access would run past
/// its end.
#[must_use]
pub fn write_be(segment: &mut [u8], offset: usize, size: AccessSize, value: u32) -> Option<()> {
    let width = size.bytes();
    let bytes = segment.get_mut(offset..offset.checked_add(width)?)?;
    bytes.copy_from_slice(&value.to_be_bytes()[4 - width..]);
    Some(())
}

#[cfg(test)]
mod tests {
    use super::{read_be, write_be, AccessSize};

    #[test]
    fn word_write_is_big_endian() {
        let mut segment = [0u8; 8];
        write_be(&mut segment, 0, AccessSize::Word, 0x1234_5678).expect("in range");
        assert_eq!(segment[..4], [0x12, 0x34, 0x56, 0x78]);
    }

    #[test]
    fn narrow_writes_keep_neighbouring_bytes() {
        let mut segment = [0xAAu8; 4];
        write_be(&mut segment, 1, AccessSize::HalfWord, 0xDEAD_BEEF).expect("in range");
        assert_eq!(segment, [0xAA, 0xBE, 0xEF, 0xAA]);

        write_be(&mut segment, 3, AccessSize::Byte, 0x0000_0155).expect("in range");
        assert_eq!(segment, [0xAA, 0xBE, 0xEF, 0x55]);
    }

    #[test]
    fn narrow_reads_are_zero_extended() {
        let segment = [0xFFu8, 0x80, 0x01, 0x02];
        assert_eq!(read_be(&segment, 0, AccessSize::Byte), Some(0xFF));
        assert_eq!(read_be(&segment, 0, AccessSize::HalfWord), Some(0xFF80));
        assert_eq!(read_be(&segment, 0, AccessSize::Word), Some(0xFF80_0102));
    }

    #[test]
    fn accesses_past_the_end_are_rejected() {
        let mut segment = [0u8; 4];
        assert_eq!(read_be(&segment, 2, AccessSize::Word), None);
        assert_eq!(read_be(&segment, 4, AccessSize::Byte), None);
        assert_eq!(write_be(&mut segment, 3, AccessSize::HalfWord, 0xFFFF), None);
        assert_eq!(segment, [0, 0, 0, 0]);
    }
}
