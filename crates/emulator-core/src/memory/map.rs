//! Fixed segment map and address translation.

use crate::Fault;

/// Size in bytes of each segment (1 MiB).
pub const SEGMENT_BYTES: usize = 0x10_0000;
/// Mask selecting the 20-bit in-segment offset.
pub const OFFSET_MASK: u32 = 0x000F_FFFF;
/// Shift isolating the 12-bit segment selector.
pub const SELECTOR_SHIFT: u32 = 20;

/// Base address of the program segment.
pub const PROGRAM_BASE: u32 = 0x0040_0000;
/// Base address of the data segment.
pub const DATA_BASE: u32 = 0x1000_0000;
/// Base address of the stack segment.
pub const STACK_BASE: u32 = 0x7FF0_0000;

/// One of the three independently backed segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum SegmentKind {
    /// Program text (`0x0040_0000..=0x004F_FFFF`).
    Program,
    /// Static data (`0x1000_0000..=0x100F_FFFF`).
    Data,
    /// Stack (`0x7FF0_0000..=0x7FFF_FFFF`).
    Stack,
}

impl SegmentKind {
    /// Segments in ascending address order.
    pub const ALL: [Self; 3] = [Self::Program, Self::Data, Self::Stack];

    /// Returns the segment's base address.
    #[must_use]
    pub const fn base(self) -> u32 {
        match self {
            Self::Program => PROGRAM_BASE,
            Self::Data => DATA_BASE,
            Self::Stack => STACK_BASE,
        }
    }

    /// Returns the 12-bit selector addressing this segment.
    #[must_use]
    pub const fn selector(self) -> u32 {
        self.base() >> SELECTOR_SHIFT
    }

    /// Resolves a selector to its segment.
    #[must_use]
    pub const fn from_selector(selector: u32) -> Option<Self> {
        match selector {
            0x004 => Some(Self::Program),
            0x100 => Some(Self::Data),
            0x7FF => Some(Self::Stack),
            _ => None,
        }
    }
}

/// Splits an address into its segment and 20-bit offset.
///
/// # Errors
///
/// Returns [`Fault::UnmappedAddress`] when the selector names no segment.
pub const fn translate(address: u32) -> Result<(SegmentKind, usize), Fault> {
    match SegmentKind::from_selector(address >> SELECTOR_SHIFT) {
        Some(segment) => Ok((segment, (address & OFFSET_MASK) as usize)),
        None => Err(Fault::UnmappedAddress { address }),
    }
}

#[cfg(test)]
mod tests {
    use super::{translate, SegmentKind, DATA_BASE, PROGRAM_BASE, SEGMENT_BYTES, STACK_BASE};
    use crate::Fault;

    #[test]
    fn selectors_match_base_addresses() {
        assert_eq!(SegmentKind::Program.selector(), 0x004);
        assert_eq!(SegmentKind::Data.selector(), 0x100);
        assert_eq!(SegmentKind::Stack.selector(), 0x7FF);
        for segment in SegmentKind::ALL {
            assert_eq!(SegmentKind::from_selector(segment.selector()), Some(segment));
        }
    }

    #[test]
    fn translate_splits_selector_and_offset() {
        assert_eq!(translate(PROGRAM_BASE), Ok((SegmentKind::Program, 0)));
        assert_eq!(
            translate(DATA_BASE + 0x1234),
            Ok((SegmentKind::Data, 0x1234))
        );
        assert_eq!(
            translate(STACK_BASE + 0xF_FFFC),
            Ok((SegmentKind::Stack, SEGMENT_BYTES - 4))
        );
    }

    #[test]
    fn unmapped_selectors_fault() {
        for address in [0x0000_0000, 0x0050_0000, 0x8000_0000, 0xFFFF_FFFC] {
            assert_eq!(translate(address), Err(Fault::UnmappedAddress { address }));
        }
    }
}
