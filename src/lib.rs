//! A height-balanced [AVL tree] of unique, totally-ordered values.
//!
//! Values are inserted with [`AvlTree::insert()`], which rebalances every
//! ancestor of the new node on the way back up the tree using single and
//! double rotations. The height of a tree holding `n` values never exceeds
//! ~1.44 log2(n), and iteration yields values in ascending order.
//!
//! ```
//! use avltree::AvlTree;
//!
//! let mut t = AvlTree::new();
//! for v in [1, 2, 3, 3] {
//!     t.insert(v);
//! }
//!
//! // Duplicates are ignored.
//! assert_eq!(t.len(), 3);
//! assert_eq!(t.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
//!
//! // The ascending inserts were rotated into a balanced tree.
//! assert_eq!(t.root(), Some(&2));
//! assert_eq!(t.height(), 2);
//! ```
//!
//! # Observing Rebalancing
//!
//! Every structural [`Step`] of an insert (the insert itself, each repair of
//! an imbalanced node, and each rotation) can be observed by providing an
//! [`Observer`] to [`AvlTree::with_observer()`]. The default
//! [`NoopObserver`] does nothing. A [`StepLog`] records a label and a
//! [`Snapshot`] of the tree shape for every step, and is serialisable with
//! the `serde` feature enabled.
//!
//! ```
//! use avltree::{AvlTree, StepLog};
//!
//! let mut t = AvlTree::with_observer(StepLog::new());
//! t.extend([3, 2, 1]);
//!
//! assert!(t.observer().labels().any(|v| v == "before rotate 3 right"));
//! ```
//!
//! [AVL tree]: https://en.wikipedia.org/wiki/AVL_tree

#![deny(rust_2018_idioms, unsafe_code)]
#![warn(missing_debug_implementations)]
#![allow(clippy::len_without_is_empty)]

mod direction;
mod dot;
mod iter;
mod node;
mod observer;
mod snapshot;
mod tree;

#[cfg(test)]
mod test_utils;

pub use direction::*;
pub use iter::Iter;
pub use observer::{LogEntry, NoopObserver, Observer, Phase, Step, StepLog, TreeView};
pub use snapshot::Snapshot;
pub use tree::*;

