use crate::encoding::{REGISTER_COUNT, REGISTER_NAMES, REG_SP};
use crate::Fault;

/// Initial `$sp` value written by [`RegisterFile::reset`].
pub const STACK_POINTER_RESET: u32 = 0x8000_0000;

/// Number of named values captured in a snapshot (32 registers, PC, HI, LO).
pub const SNAPSHOT_ENTRY_COUNT: usize = REGISTER_COUNT + 3;

/// Display names in snapshot/inspection order.
const SPECIAL_NAMES: [&str; 3] = ["PC", "HI", "LO"];

/// 32 general-purpose registers plus `PC`, `HI`, and `LO`.
///
/// `r` is public so the execution engine can write any index directly;
/// writes to `$zero` are not suppressed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct RegisterFile {
    /// General-purpose registers `R[0..32]`.
    pub r: [u32; REGISTER_COUNT],
    /// Program counter.
    pub pc: u32,
    /// Upper half of the last multiply, or the last remainder.
    pub hi: u32,
    /// Lower half of the last multiply, or the last quotient.
    pub lo: u32,
    saved: Option<RegisterSnapshot>,
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self {
            r: [0; REGISTER_COUNT],
            pc: 0,
            hi: 0,
            lo: 0,
            saved: None,
        }
    }
}

impl RegisterFile {
    /// Zeroes every register and `HI`/`LO`, points `$sp` at the stack top,
    /// and discards the saved snapshot. `PC` is left untouched.
    pub fn reset(&mut self) {
        self.r = [0; REGISTER_COUNT];
        self.hi = 0;
        self.lo = 0;
        self.r[REG_SP] = STACK_POINTER_RESET;
        self.saved = None;
    }

    /// Reads a general-purpose register.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::InvalidRegister`] when `index >= 32`.
    pub fn get(&self, index: usize) -> Result<u32, Fault> {
        self.r
            .get(index)
            .copied()
            .ok_or(Fault::InvalidRegister { index })
    }

    /// Writes a general-purpose register.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::InvalidRegister`] without mutating anything when
    /// `index >= 32`.
    pub fn set(&mut self, index: usize, value: u32) -> Result<(), Fault> {
        let slot = self
            .r
            .get_mut(index)
            .ok_or(Fault::InvalidRegister { index })?;
        *slot = value;
        Ok(())
    }

    /// Reads `$sp`.
    #[must_use]
    pub const fn sp(&self) -> u32 {
        self.r[REG_SP]
    }

    /// Sets `PC` unconditionally.
    pub const fn jump(&mut self, address: u32) {
        self.pc = address;
    }

    /// Named, hex-formatted values in display order: `PC`, `HI`, `LO`, then
    /// `$zero` through `$ra`.
    #[must_use]
    pub fn entries(&self) -> Vec<RegisterEntry> {
        self.snapshot()
            .values()
            .map(|(name, value)| RegisterEntry {
                name,
                value: format!("{value:x}"),
            })
            .collect()
    }

    /// Captures all 35 named values.
    #[must_use]
    pub const fn snapshot(&self) -> RegisterSnapshot {
        RegisterSnapshot {
            pc: self.pc,
            hi: self.hi,
            lo: self.lo,
            r: self.r,
        }
    }

    /// Stores the current values for a later [`RegisterFile::compare_state`].
    pub fn save_state(&mut self) {
        self.saved = Some(self.snapshot());
    }

    /// Returns the snapshot stored by the last save, if any.
    #[must_use]
    pub const fn saved_state(&self) -> Option<&RegisterSnapshot> {
        self.saved.as_ref()
    }

    /// Diffs the current values against the saved snapshot.
    ///
    /// Without a saved snapshot every entry reports as changed.
    #[must_use]
    pub fn compare_state(&self) -> RegisterDiff {
        let current = self.snapshot();
        let entries = match &self.saved {
            Some(saved) => current
                .values()
                .zip(saved.values())
                .map(|((name, now), (_, then))| RegisterChange {
                    name,
                    changed: now != then,
                })
                .collect(),
            None => current
                .values()
                .map(|(name, _)| RegisterChange {
                    name,
                    changed: true,
                })
                .collect(),
        };
        RegisterDiff { entries }
    }
}

/// One row of the register inspection view.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RegisterEntry {
    /// `PC`, `HI`, `LO`, or a canonical register name.
    pub name: &'static str,
    /// Lowercase hex, no prefix or padding.
    pub value: String,
}

/// All 35 named register values at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct RegisterSnapshot {
    /// Program counter.
    pub pc: u32,
    /// `HI`.
    pub hi: u32,
    /// `LO`.
    pub lo: u32,
    /// General-purpose registers.
    pub r: [u32; REGISTER_COUNT],
}

impl RegisterSnapshot {
    /// Iterates `(name, value)` pairs in display order.
    pub fn values(&self) -> impl Iterator<Item = (&'static str, u32)> + '_ {
        let specials: &'static [&'static str] = &SPECIAL_NAMES;
        let registers: &'static [&'static str] = &REGISTER_NAMES;
        specials
            .iter()
            .chain(registers)
            .copied()
            .zip([self.pc, self.hi, self.lo].into_iter().chain(self.r))
    }

    /// Looks up a value by display name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<u32> {
        self.values()
            .find_map(|(candidate, value)| (candidate == name).then_some(value))
    }
}

/// Change flag for one named register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RegisterChange {
    /// Display name.
    pub name: &'static str,
    /// `true` when the value differs from the saved snapshot.
    pub changed: bool,
}

/// Result of [`RegisterFile::compare_state`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RegisterDiff {
    /// One entry per named value, in display order.
    pub entries: Vec<RegisterChange>,
}

impl RegisterDiff {
    /// Returns whether the named value changed.
    #[must_use]
    pub fn changed(&self, name: &str) -> Option<bool> {
        self.entries
            .iter()
            .find_map(|entry| (entry.name == name).then_some(entry.changed))
    }

    /// Names of every changed value, in display order.
    pub fn changed_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries
            .iter()
            .filter(|entry| entry.changed)
            .map(|entry| entry.name)
    }
}

#[cfg(test)]
mod tests {
    use super::{RegisterFile, SNAPSHOT_ENTRY_COUNT, STACK_POINTER_RESET};
    use crate::encoding::{REG_SP, REG_ZERO};
    use crate::Fault;

    #[test]
    fn reset_zeroes_registers_and_seeds_stack_pointer() {
        let mut registers = RegisterFile::default();
        registers.r[8] = 0x1234;
        registers.hi = 1;
        registers.lo = 2;
        registers.pc = 0x0040_0010;

        registers.reset();

        assert_eq!(registers.sp(), STACK_POINTER_RESET);
        assert_eq!(registers.r[8], 0);
        assert_eq!(registers.hi, 0);
        assert_eq!(registers.lo, 0);
        assert_eq!(registers.pc, 0x0040_0010);
    }

    #[test]
    fn set_rejects_out_of_range_index_without_mutation() {
        let mut registers = RegisterFile::default();
        let before = registers.clone();
        assert_eq!(
            registers.set(32, 5),
            Err(Fault::InvalidRegister { index: 32 })
        );
        assert_eq!(registers, before);
        assert_eq!(registers.get(40), Err(Fault::InvalidRegister { index: 40 }));
    }

    #[test]
    fn zero_register_write_persists() {
        let mut registers = RegisterFile::default();
        registers.set(REG_ZERO, 7).expect("index in range");
        assert_eq!(registers.get(REG_ZERO), Ok(7));
    }

    #[test]
    fn jump_sets_pc_unconditionally() {
        let mut registers = RegisterFile::default();
        registers.jump(0xFFFF_FFFF);
        assert_eq!(registers.pc, 0xFFFF_FFFF);
    }

    #[test]
    fn entries_list_specials_first_in_hex() {
        let mut registers = RegisterFile::default();
        registers.reset();
        registers.pc = 0x0040_0000;
        registers.r[2] = 10;

        let entries = registers.entries();

        assert_eq!(entries.len(), SNAPSHOT_ENTRY_COUNT);
        assert_eq!(entries[0].name, "PC");
        assert_eq!(entries[0].value, "400000");
        assert_eq!(entries[1].name, "HI");
        assert_eq!(entries[2].name, "LO");
        assert_eq!(entries[3].name, "$zero");
        assert_eq!(entries[5].name, "$v0");
        assert_eq!(entries[5].value, "a");
        assert_eq!(entries[3 + REG_SP].value, "80000000");
    }

    #[test]
    fn compare_state_flags_only_changed_values() {
        let mut registers = RegisterFile::default();
        registers.save_state();
        registers.r[9] = 3;
        registers.lo = 4;

        let diff = registers.compare_state();

        assert_eq!(diff.changed("$t1"), Some(true));
        assert_eq!(diff.changed("LO"), Some(true));
        assert_eq!(diff.changed("$t0"), Some(false));
        assert_eq!(diff.changed("PC"), Some(false));
        assert_eq!(diff.changed_names().collect::<Vec<_>>(), vec!["LO", "$t1"]);
    }

    #[test]
    fn compare_without_saved_state_reports_everything_changed() {
        let registers = RegisterFile::default();
        let diff = registers.compare_state();
        assert_eq!(diff.entries.len(), SNAPSHOT_ENTRY_COUNT);
        assert!(diff.entries.iter().all(|entry| entry.changed));
    }

    #[test]
    fn reset_discards_saved_state() {
        let mut registers = RegisterFile::default();
        registers.save_state();
        assert!(registers.saved_state().is_some());
        registers.reset();
        assert!(registers.saved_state().is_none());
    }

    #[test]
    fn snapshot_lookup_by_name() {
        let mut registers = RegisterFile::default();
        registers.r[31] = 0x0040_0014;
        registers.hi = 9;
        let snapshot = registers.snapshot();
        assert_eq!(snapshot.get("$ra"), Some(0x0040_0014));
        assert_eq!(snapshot.get("HI"), Some(9));
        assert_eq!(snapshot.get("$nope"), None);
    }
}
