//! Append-only output sink with normal, error, and debug channels.
//!
//! Records are kept in arrival order so an embedder can render them exactly
//! as produced. Each record is also forwarded to `tracing`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Severity channel of a console record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Channel {
    /// Program output (`syscall` prints, exit notice).
    Normal,
    /// Faults raised while executing.
    Error,
    /// Per-step execution trace and ignored requests.
    Debug,
}

impl Channel {
    /// Styling tag the front end attaches to records on this channel.
    #[must_use]
    pub const fn style(self) -> &'static str {
        match self {
            Self::Normal => "",
            Self::Error => "red",
            Self::Debug => "green",
        }
    }
}

/// One console record.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConsoleLine {
    /// Channel the record was written to.
    pub channel: Channel,
    /// Record text.
    pub text: String,
}

impl ConsoleLine {
    /// Styling tag of the record's channel.
    #[must_use]
    pub const fn style(&self) -> &'static str {
        self.channel.style()
    }
}

/// In-memory output log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Console {
    lines: Vec<ConsoleLine>,
}

impl Console {
    /// Creates an empty console.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Appends a record to the normal channel.
    pub fn print(&mut self, text: impl Into<String>) {
        self.push(Channel::Normal, text.into());
    }

    /// Appends a record to the error channel.
    pub fn print_error(&mut self, text: impl Into<String>) {
        self.push(Channel::Error, text.into());
    }

    /// Appends a record to the debug channel.
    pub fn print_debug(&mut self, text: impl Into<String>) {
        self.push(Channel::Debug, text.into());
    }

    fn push(&mut self, channel: Channel, text: String) {
        match channel {
            Channel::Normal => tracing::info!(channel = "normal", "{text}"),
            Channel::Error => tracing::error!(channel = "error", "{text}"),
            Channel::Debug => tracing::debug!(channel = "debug", "{text}"),
        }
        self.lines.push(ConsoleLine { channel, text });
    }

    /// Every record in arrival order.
    #[must_use]
    pub fn lines(&self) -> &[ConsoleLine] {
        &self.lines
    }

    /// Text of every record on one channel, in arrival order.
    pub fn channel(&self, channel: Channel) -> impl Iterator<Item = &str> + '_ {
        self.lines
            .iter()
            .filter(move |line| line.channel == channel)
            .map(|line| line.text.as_str())
    }

    /// Returns `true` when nothing has been recorded since the last clear.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Drops every record.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
