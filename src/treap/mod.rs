//! Probabilistic binary tree where the key of each node is implicitly its position in the
//! sequence and each node also maintains the heap invariant on its priority.

mod implicit_tree;
mod implicit_treap;
mod node;

pub use self::implicit_treap::{ImplicitTreap, ImplicitTreapIntoIter, ImplicitTreapIter};
use std::ops::Add;
use std::result;
use thiserror::Error;

/// Numeric payload that can be stored in an `ImplicitTreap<T>`.
///
/// `T::default()` must be the additive identity. Every primitive integer and float type
/// qualifies.
pub trait Summable: Copy + Default + Add<Output = Self> {}

impl<T> Summable for T where T: Copy + Default + Add<Output = T> {}

/// Errors returned by `ImplicitTreap<T>` when an operation is given invalid arguments. The tree is
/// never modified when an error is returned.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum Error {
    /// A position does not refer to a valid element (or insertion point) of the tree.
    #[error("position {position} is out of bounds for a tree of length {len}")]
    InvalidPosition { position: usize, len: usize },
    /// An inclusive span of positions is inverted or extends past the end of the tree.
    #[error("range {from}..={to} is invalid for a tree of length {len}")]
    InvalidRange { from: usize, to: usize, len: usize },
    #[error("count must be at least one")]
    InvalidCount,
}

pub type Result<T> = result::Result<T, Error>;
