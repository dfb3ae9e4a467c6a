//! This crate exposes a plain, unbalanced Binary Search Tree (BST) that maps keys to values.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a key, the
//! value associated with it, and up to two child `Node`s. The invariants
//! kept by [`Tree`] are:
//!
//! 1. For every `Node`, all the `Node`s in its left subtree have a key
//!    strictly less than its own key.
//! 2. For every `Node`, all the `Node`s in its right subtree have a key
//!    greater than or equal to its own key. Duplicate keys are allowed and
//!    each one is its own `Node`.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching takes `O(height)` where `height` is the longest path from the
//! root `Node` to a leaf `Node`. This tree never rebalances itself, so the
//! height depends entirely on insertion order: random keys give roughly
//! `O(lg N)`, sorted keys give a chain of height `N`. Every operation
//! (including teardown) walks the tree iteratively, so even a degenerate
//! chain is safe to use and drop.
//!
//! Structural changes are traced through [`tracing`] at the `trace` level
//! and bulk teardown at the `debug` level. The crate never installs a
//! subscriber.
//!
//! # Examples
//!
//! ```
//! use bst::{Error, Tree};
//!
//! let mut tree = Tree::new();
//! tree.insert(5, "a");
//! tree.insert(3, "b");
//! tree.insert(8, "c");
//! tree.insert(3, "d");
//!
//! assert_eq!(tree.len(), 4);
//! assert_eq!(tree.find(&3), Ok(&"b"));
//!
//! tree.remove(&3);
//! assert_eq!(tree.find(&3), Ok(&"d"));
//! assert_eq!(tree.find(&4), Err(Error::NotFound));
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod error;
pub mod tree;

pub use error::{Error, Result};
pub use tree::{Iter, Tree};
