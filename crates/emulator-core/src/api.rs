//! Host-facing machine aggregate, configuration, and step/run outcomes.

use crate::console::Console;
use crate::memory::{Memory, PROGRAM_BASE};
use crate::state::RegisterFile;
use crate::Fault;

/// Configuration applied at machine creation and on every reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct MachineConfig {
    /// `PC` value installed by [`Machine::reset`].
    pub entry_point: u32,
    /// Records `[DEBUG] executed: ...` on the debug channel for every step.
    pub debug_trace: bool,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            entry_point: PROGRAM_BASE,
            debug_trace: true,
        }
    }
}

/// Register file, memory, and console owned together.
///
/// Every execution entry point takes the machine by mutable reference, so
/// independent machines never share state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Machine {
    /// Architectural registers.
    pub registers: RegisterFile,
    /// Segmented memory.
    pub memory: Memory,
    /// Output sink.
    pub console: Console,
    /// Active configuration.
    pub config: MachineConfig,
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

impl Machine {
    /// Creates a reset machine with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&MachineConfig::default())
    }

    /// Creates a reset machine with `config`.
    #[must_use]
    pub fn with_config(config: &MachineConfig) -> Self {
        let mut machine = Self {
            registers: RegisterFile::default(),
            memory: Memory::new(),
            console: Console::new(),
            config: *config,
        };
        machine.reset();
        machine
    }

    /// Zeroes registers and memory, clears the console, and points `PC` at
    /// the configured entry point.
    pub fn reset(&mut self) {
        self.registers.reset();
        self.memory.reset();
        self.console.clear();
        self.registers.jump(self.config.entry_point);
    }

    /// Writes `words` consecutively from the program segment base.
    ///
    /// # Errors
    ///
    /// Returns the memory fault hit by the first word that does not fit in the
    /// program segment. Words before it are already written.
    pub fn load_program(&mut self, words: &[u32]) -> Result<(), Fault> {
        self.load_words(PROGRAM_BASE, words)
    }

    /// Writes `words` consecutively from `address`.
    ///
    /// # Errors
    ///
    /// Returns the first memory fault hit while writing.
    pub fn load_words(&mut self, address: u32, words: &[u32]) -> Result<(), Fault> {
        let mut cursor = address;
        for word in words {
            self.memory.set_word(cursor, *word)?;
            cursor = cursor.wrapping_add(4);
        }
        Ok(())
    }
}

/// Why execution stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum HaltReason {
    /// Fetched the all-zero terminator word.
    ZeroWord,
    /// `syscall` with service 10.
    Exit,
}

/// Result of one fetch-decode-execute step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepOutcome {
    /// The instruction completed; keep stepping.
    Continue,
    /// The step raised a fault. It was recorded on the error channel and the
    /// machine can keep stepping.
    Faulted(Fault),
    /// The program finished.
    Halted(HaltReason),
}

impl StepOutcome {
    /// Returns `true` for [`StepOutcome::Halted`].
    #[must_use]
    pub const fn is_halted(self) -> bool {
        matches!(self, Self::Halted(_))
    }
}

/// Stop condition for [`crate::run_bounded`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunBoundary {
    /// Stop only on halt or when the step budget runs out.
    Halted,
    /// Also stop at the first faulted step.
    Fault,
}

/// Aggregated outcome from running multiple steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunOutcome {
    /// Number of steps taken during this call.
    pub steps: u64,
    /// Outcome of the last step taken, or `Continue` when none ran.
    pub final_step: StepOutcome,
}
