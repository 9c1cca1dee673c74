//! Core error types for linekit.
//!
//! "No more tokens" during probing access (iteration, [`Tokens::next_span`],
//! [`Tokens::opt_value`]) is a normal termination signal, not an error, and
//! is deliberately absent here; only fallible extraction reports absence.
//!
//! [`Tokens::next_span`]: crate::Tokens::next_span
//! [`Tokens::opt_value`]: crate::Tokens::opt_value

use std::io;

use thiserror::Error;

/// Errors produced while reading lines and extracting typed tokens.
///
/// All errors surface synchronously to the caller of the operation that
/// detected them; nothing is retried, logged, or swallowed.
#[derive(Error, Debug)]
pub enum Error {
    /// A line was requested but the source is exhausted.
    ///
    /// Raised at cursor construction time by [`LineReader::line`] and its
    /// variants. Requesting a line that is not there is a precondition
    /// violation at the call site, not a recoverable per-token condition.
    ///
    /// [`LineReader::line`]: crate::LineReader::line
    #[error("end of input: no line available")]
    EndOfInput,

    /// The line source failed before a full line was available.
    #[error("failed to read line")]
    Io(#[from] io::Error),

    /// A fallible extraction found no token at the cursor.
    ///
    /// The span between the cursor and the next separator (or end of line)
    /// was empty: the line is exhausted, or two separators are adjacent.
    #[error("no token at byte {at}: separator not found")]
    MissingToken {
        /// Byte offset of the cursor when the read was attempted.
        at: usize,
    },

    /// A token was present but could not be converted to the target type.
    #[error("cannot parse token {token:?}")]
    Parse {
        /// The offending token text.
        token: String,
        /// The underlying conversion error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
