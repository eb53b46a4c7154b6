//! A positional sequence of numbers backed by an implicit treap.
//!
//! See [`treap::ImplicitTreap`] for the sequence itself.

pub mod treap;
