//! Errors reported by [`Tree`][crate::Tree] lookups.
//!
//! Every failure is a deterministic function of the tree's contents, so nothing here is
//! retryable. An empty tree is not a distinct condition: looking up any key in it reports
//! [`Error::NotFound`].
//!
//! # Examples
//!
//! ```
//! use bst::{Error, Tree};
//!
//! let tree: Tree<i32, &str> = Tree::new();
//! assert_eq!(tree.find(&1), Err(Error::NotFound));
//! ```

use thiserror::Error;

/// Error type for tree lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum Error {
    /// No node on the search path had the requested key.
    #[error("no node with the requested key")]
    NotFound,
}

impl Error {
    /// Returns `true` for [`Error::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

/// `Result` specialized to this crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
