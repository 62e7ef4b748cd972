//! Error taxonomy (component H, `spec.md` §7): a `thiserror`-derived,
//! `no_std` enum carrying the byte offset where parsing stopped, the
//! idiomatic Rust rendition of `spec.md`'s three negative return codes.

use thiserror::Error;

/// Why a parse attempt failed. Carries the byte offset into the input at
/// which the failure was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum JsonError {
    /// A byte produced no valid transition, or finalization left the state
    /// machine outside `OK`.
    #[error("invalid JSON syntax at byte {at}")]
    BadFormat {
        /// Byte offset at which the invalid transition was detected.
        at: usize,
    },
    /// The token store was exhausted during a begin-action.
    #[error("token store exhausted at byte {at}")]
    NoTokens {
        /// Byte offset at which the store ran out of capacity.
        at: usize,
    },
    /// Input ended while still inside one or more containers.
    #[error("unexpected end of input at byte {at} (unclosed container)")]
    Incomplete {
        /// Byte offset of the synthetic end-of-input step.
        at: usize,
    },
}
