//! Read configuration for token separation.
//!
//! This module provides [`ReadConfig`] for controlling how a line is split
//! into tokens.
//!
//! # Separator Bytes
//!
//! The separator is a single ASCII byte. An ASCII byte never occurs inside
//! a multi-byte UTF-8 sequence, so scanning by byte offset always lands on
//! character boundaries and token spans stay valid `str` slices. Multi-byte
//! separators are not supported.
//!
//! # Example
//!
//! ```ignore
//! use linekit_core::config::ReadConfig;
//!
//! // Use the default separator (space)
//! let config = ReadConfig::default();
//!
//! // Comma-separated input
//! let config = ReadConfig::new().with_separator(b',');
//! ```

/// Configuration for splitting a line into tokens.
///
/// # Default Values
///
/// | Setting | Default | Rationale |
/// |---------|---------|-----------|
/// | `separator` | `b' '` | space-delimited input is the common case |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadConfig {
    /// The byte that delimits tokens.
    ///
    /// Must be ASCII; see the module docs for why.
    pub separator: u8,
}

impl Default for ReadConfig {
    /// Returns the default configuration (separator: space).
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl ReadConfig {
    /// Default configuration, usable in const contexts.
    ///
    /// Equivalent to `ReadConfig::default()` but available at compile time.
    pub const DEFAULT: Self = Self { separator: b' ' };

    /// Creates a new configuration with default values.
    #[inline]
    pub const fn new() -> Self {
        Self::DEFAULT
    }

    /// Sets the separator byte.
    ///
    /// # Panics
    ///
    /// Panics if `separator` is not ASCII. A non-ASCII byte could land
    /// inside a UTF-8 sequence and split a character.
    #[inline]
    pub const fn with_separator(mut self, separator: u8) -> Self {
        assert!(separator.is_ascii(), "separator must be an ASCII byte");
        self.separator = separator;
        self
    }
}
