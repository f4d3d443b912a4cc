//! Error types for the few fallible constructors in this crate.
//!
//! Almost every operation reports edge cases through `Option` (an exhausted
//! cursor, an empty sequence, a missing index) rather than through errors.

/// Errors building a collection.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A materialized range was given a step of zero, so it would never reach
    /// its bound.
    #[error("range step must not be zero")]
    ZeroStep,
}
