//! Segmented byte-addressable memory.
//!
//! Three zero-filled 1 MiB segments back the program, data, and stack
//! regions. Every sized access is routed through [`translate`] and stores
//! multi-byte values big-endian.

/// Sized big-endian access helpers.
pub mod access;
/// Fixed segment map and address translation.
pub mod map;

pub use access::{read_be, write_be, AccessSize};
pub use map::{
    translate, SegmentKind, DATA_BASE, OFFSET_MASK, PROGRAM_BASE, SEGMENT_BYTES, SELECTOR_SHIFT,
    STACK_BASE,
};

use crate::Fault;

/// Allocates a zeroed segment backing store.
#[must_use]
pub fn new_segment() -> Box<[u8]> {
    vec![0; SEGMENT_BYTES].into_boxed_slice()
}

/// The three segment backing stores.
#[derive(Clone, PartialEq, Eq)]
pub struct Memory {
    program: Box<[u8]>,
    data: Box<[u8]>,
    stack: Box<[u8]>,
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Memory")
            .field("program_bytes", &self.program.len())
            .field("data_bytes", &self.data.len())
            .field("stack_bytes", &self.stack.len())
            .finish()
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Memory {
    /// Allocates all three segments zero-filled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            program: new_segment(),
            data: new_segment(),
            stack: new_segment(),
        }
    }

    /// Replaces every segment with a fresh zero-filled one.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Returns the backing bytes of one segment.
    #[must_use]
    pub fn segment(&self, kind: SegmentKind) -> &[u8] {
        match kind {
            SegmentKind::Program => &self.program,
            SegmentKind::Data => &self.data,
            SegmentKind::Stack => &self.stack,
        }
    }

    fn segment_mut(&mut self, kind: SegmentKind) -> &mut [u8] {
        match kind {
            SegmentKind::Program => &mut self.program,
            SegmentKind::Data => &mut self.data,
            SegmentKind::Stack => &mut self.stack,
        }
    }

    /// Reads `size` bytes at `address`, zero-extended.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::UnmappedAddress`] for an invalid selector and
    /// [`Fault::SegmentOverrun`] when the access runs past the segment end.
    pub fn read(&self, address: u32, size: AccessSize) -> Result<u32, Fault> {
        let (kind, offset) = translate(address)?;
        read_be(self.segment(kind), offset, size).ok_or_else(|| overrun(address, size))
    }

    /// Writes the low `size` bytes of `value` at `address`.
    ///
    /// A faulting write leaves memory untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::UnmappedAddress`] for an invalid selector and
    /// [`Fault::SegmentOverrun`] when the access runs past the segment end.
    pub fn write(&mut self, address: u32, size: AccessSize, value: u32) -> Result<(), Fault> {
        let (kind, offset) = translate(address)?;
        write_be(self.segment_mut(kind), offset, size, value).ok_or_else(|| overrun(address, size))
    }

    /// Reads one byte.
    ///
    /// # Errors
    ///
    /// See [`Memory::read`].
    pub fn get_byte(&self, address: u32) -> Result<u32, Fault> {
        self.read(address, AccessSize::Byte)
    }

    /// Reads a big-endian half-word.
    ///
    /// # Errors
    ///
    /// See [`Memory::read`].
    pub fn get_half_word(&self, address: u32) -> Result<u32, Fault> {
        self.read(address, AccessSize::HalfWord)
    }

    /// Reads a big-endian word.
    ///
    /// # Errors
    ///
    /// See [`Memory::read`].
    pub fn get_word(&self, address: u32) -> Result<u32, Fault> {
        self.read(address, AccessSize::Word)
    }

    /// Writes the low byte of `value`.
    ///
    /// # Errors
    ///
    /// See [`Memory::write`].
    pub fn set_byte(&mut self, address: u32, value: u32) -> Result<(), Fault> {
        self.write(address, AccessSize::Byte, value)
    }

    /// Writes the low half-word of `value`, big-endian.
    ///
    /// # Errors
    ///
    /// See [`Memory::write`].
    pub fn set_half_word(&mut self, address: u32, value: u32) -> Result<(), Fault> {
        self.write(address, AccessSize::HalfWord, value)
    }

    /// Writes `value` big-endian.
    ///
    /// # Errors
    ///
    /// See [`Memory::write`].
    pub fn set_word(&mut self, address: u32, value: u32) -> Result<(), Fault> {
        self.write(address, AccessSize::Word, value)
    }

    /// Iterates `(address, word)` pairs over `start..=end` in steps of 4.
    ///
    /// The iterator borrows memory lazily and is `Clone`, so a caller can
    /// restart it from a saved copy.
    #[must_use]
    pub const fn view(&self, start: u32, end: u32) -> MemoryView<'_> {
        MemoryView {
            memory: self,
            next: start as u64,
            end: end as u64,
        }
    }
}

const fn overrun(address: u32, size: AccessSize) -> Fault {
    #[allow(clippy::cast_possible_truncation)]
    let size = size.bytes() as u8;
    Fault::SegmentOverrun { address, size }
}

/// Lazy word-stepping view over a memory range.
#[derive(Debug, Clone)]
pub struct MemoryView<'a> {
    memory: &'a Memory,
    next: u64,
    end: u64,
}

impl Iterator for MemoryView<'_> {
    type Item = (u32, Result<u32, Fault>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next > self.end {
            return None;
        }
        let address = u32::try_from(self.next).ok()?;
        self.next += 4;
        Some((address, self.memory.get_word(address)))
    }
}
