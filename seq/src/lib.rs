//! This crate provides the lazy sequences and small collections behind
//! Mahler's bars, notes and keyboard state.
//!
//! Everything is built on [`Cursor`], a pull-based iterator that separates
//! "is there more?" from "advance". [`Iterable`] chains LINQ-style operations
//! (`filter`, `map`, `take_while`, `skip`, `group_by`, `aggregate`, ...) over
//! cursors without doing any work until something pulls.
//!
//! The concrete collections all implement [`Sequence`], so each of them can
//! hand out as many independent [`Iterable`]s as needed:
//! - [`Enumerable`] is an ordered, indexable collection over a `Vec` that
//!   callers may edit directly.
//! - [`Queue`] is a FIFO queue with amortized constant-time dequeue.
//! - [`HashSet`] is a set whose notion of equality comes from a caller-chosen
//!   [`KeySelector`].
//!
//! ```rust
//! # use mahler_seq::{Enumerable, Sequence};
//! let bar = Enumerable::from(vec![60, 62, 64, 65, 67]);
//! let above_e: Vec<_> = bar.iter().skip_while(|&n| n <= 64).to_vec();
//! assert_eq!(above_e, vec![65, 67]);
//! assert_eq!(bar.count(), 5);
//! ```

pub mod cursor;
pub mod enumerable;
pub mod error;
pub mod hash_set;
pub mod iterable;
pub mod queue;
pub mod range;
pub mod sequence;

pub use cursor::{BoxCursor, Cursor};
pub use enumerable::Enumerable;
pub use error::Error;
pub use hash_set::{HashSet, Identity, KeySelector};
pub use iterable::Iterable;
pub use queue::Queue;
pub use range::Numeric;
pub use sequence::{Indexed, Sequence};
