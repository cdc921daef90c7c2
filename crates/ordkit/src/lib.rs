//! # ordkit
//!
//! Ordered collections with O(1) handle-based mutation.
//!
//! ## Contents
//! - **LinkedList**: arena-backed doubly-linked list. Nodes are addressed by
//!   generation-checked [`Handle`]s, so removal and relocation never search.
//! - **Traits**: [`Collection`], [`Sequence`], [`Queue`], [`Stack`] and
//!   [`Deque`] views over the list.
//! - **Trie**: string set with prefix completion.

#![warn(missing_docs)]

mod error;
mod list;
mod traits;
mod trie;

pub use error::{Error, Result};
pub use list::{Handle, IntoIter, Iter, LinkedList};
pub use traits::{Collection, Deque, Queue, Sequence, Stack};
pub use trie::Trie;
