//! A mutable, unbalanced BST. Every node owns its children through a `Box`, nothing points back
//! up at a parent, and no rebalancing is ever performed: inserting keys in increasing order
//! produces a chain leaning to the right.
//!
//! Keys that compare equal are *not* merged. A duplicate key is routed into the right subtree of
//! the existing node and becomes a second, independent entry.
//!
//! # Examples
//!
//! ```
//! use bst::{Error, Tree};
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.find(&1), Err(Error::NotFound));
//!
//! tree.insert(1, "one");
//! assert_eq!(tree.find(&1), Ok(&"one"));
//!
//! // Inserting the same key again adds a second node rather than overwriting.
//! tree.insert(1, "uno");
//! assert_eq!(tree.len(), 2);
//! assert_eq!(tree.find(&1), Ok(&"one"));
//!
//! // Removing takes out the first match and the duplicate takes its place.
//! assert_eq!(tree.remove(&1), Some("one"));
//! assert_eq!(tree.find(&1), Ok(&"uno"));
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;
use std::mem;

use tracing::{debug, trace};

use crate::error::{Error, Result};

/// An owning pointer to a subtree. `None` is an empty subtree.
type Link<K, V> = Option<Box<Node<K, V>>>;

/// An unbalanced Binary Search Tree. This can be used for inserting, finding, and removing keys
/// and values. For every node, keys in its left subtree are strictly smaller than its own key and
/// keys in its right subtree are greater than or equal to it.
pub struct Tree<K, V> {
    root: Link<K, V>,
    len: usize,
}

struct Node<K, V> {
    key: K,
    value: V,
    left: Link<K, V>,
    right: Link<K, V>,
}

impl<K, V> Default for Tree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Drop for Tree<K, V> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<K, V> Clone for Tree<K, V>
where
    K: Clone,
    V: Clone,
{
    /// Copies the tree node for node, so the clone has exactly the same shape as the original.
    fn clone(&self) -> Self {
        let mut root: Link<K, V> = None;
        let mut pending = vec![(self.root.as_deref(), &mut root)];

        while let Some((source, slot)) = pending.pop() {
            let Some(source) = source else {
                continue;
            };
            let node = slot.insert(Node::new_boxed(source.key.clone(), source.value.clone()));
            let Node { left, right, .. } = &mut **node;
            pending.push((source.right.as_deref(), right));
            pending.push((source.left.as_deref(), left));
        }

        Self {
            root,
            len: self.len,
        }
    }
}

impl<K, V> fmt::Debug for Tree<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Tree<K, V> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Returns the number of nodes in the tree. Duplicate keys count once per node.
    #[doc(alias = "size")]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the key and value stored at the root of the tree, if there is one.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// assert_eq!(tree.root(), None);
    ///
    /// tree.insert(2, 'b');
    /// tree.insert(1, 'a');
    /// assert_eq!(tree.root(), Some((&2, &'b')));
    /// ```
    pub fn root(&self) -> Option<(&K, &V)> {
        self.root.as_deref().map(|node| (&node.key, &node.value))
    }

    /// The number of levels on the longest path from the root down to a leaf. An empty tree has
    /// a height of 0 and a tree built from strictly increasing keys has a height equal to its
    /// length.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack = Vec::new();
        if let Some(root) = self.root.as_deref() {
            stack.push((root, 1));
        }

        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(node.left.as_deref().map(|left| (left, depth + 1)));
            stack.extend(node.right.as_deref().map(|right| (right, depth + 1)));
        }

        height
    }

    /// Returns an iterator over the entries of the tree in key order. Entries sharing a key are
    /// yielded in insertion order.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst::Tree;
    ///
    /// let tree: Tree<_, _> = [(5, 'a'), (3, 'b'), (8, 'c'), (3, 'd')].into_iter().collect();
    ///
    /// let keys: Vec<_> = tree.iter().map(|(k, _)| *k).collect();
    /// assert_eq!(keys, [3, 3, 5, 8]);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.root.as_deref(), self.len)
    }

    /// Removes every node from the tree. Subtrees are torn down left first, then right, then
    /// their root, so the leaves go before the nodes above them. Clearing an empty tree does
    /// nothing.
    ///
    /// This never recurses, so arbitrarily deep trees can be cleared (and dropped) safely.
    pub fn clear(&mut self) {
        let Some(root) = self.root.take() else {
            return;
        };

        let mut freed = 0usize;
        let mut stack = vec![root];
        while let Some(mut node) = stack.pop() {
            if let Some(left) = node.left.take() {
                stack.push(node);
                stack.push(left);
            } else if let Some(right) = node.right.take() {
                stack.push(node);
                stack.push(right);
            } else {
                drop(node);
                freed += 1;
            }
        }

        debug_assert_eq!(freed, self.len);
        self.len = 0;
        debug!(freed, "cleared tree");
    }

    /// Inserts a new node holding `key` and `value`. This always adds a node: when the key is
    /// already present the new entry is placed in the right subtree of the existing one.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// tree.insert(1, 2);
    /// assert_eq!(tree.find(&1), Ok(&2));
    ///
    /// tree.insert(1, 3);
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn insert(&mut self, key: K, value: V)
    where
        K: Ord,
    {
        let mut depth = 0usize;
        let mut link = &mut self.root;
        while let Some(node) = link {
            depth += 1;
            let go_left = key < node.key;
            let has_child = if go_left {
                node.left.is_some()
            } else {
                node.right.is_some()
            };
            if has_child {
                link = if go_left {
                    &mut node.left
                } else {
                    &mut node.right
                };
                continue;
            }

            let child = if go_left {
                &mut node.left
            } else {
                &mut node.right
            };
            *child = Some(Node::new_boxed(key, value));
            self.len += 1;
            node.check_children();
            trace!(depth, len = self.len, "inserted node");
            return;
        }

        *link = Some(Node::new_boxed(key, value));
        self.len += 1;
        trace!(depth, len = self.len, "inserted root");
    }

    /// Finds the value of the first node with the given key on the search path from the root.
    /// When duplicates exist, this is the first of them in iteration order.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if no node has the key, which includes the empty tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst::{Error, Tree};
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1, 2);
    ///
    /// assert_eq!(tree.find(&1), Ok(&2));
    /// assert_eq!(tree.find(&42), Err(Error::NotFound));
    /// ```
    #[doc(alias = "find_by_key")]
    pub fn find(&self, key: &K) -> Result<&V>
    where
        K: Ord,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Equal => return Ok(&node.value),
                Ordering::Greater => node.right.as_deref(),
            };
        }

        Err(Error::NotFound)
    }

    /// Like [`find`][Self::find] but hands out a mutable reference to the value. The reference
    /// borrows the tree, so it cannot outlive a later `insert`, `remove` or `clear`.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if no node has the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert("hits", 0);
    ///
    /// *tree.find_mut(&"hits")? += 1;
    /// assert_eq!(tree.find(&"hits"), Ok(&1));
    /// # Ok::<(), bst::Error>(())
    /// ```
    pub fn find_mut(&mut self, key: &K) -> Result<&mut V>
    where
        K: Ord,
    {
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left.as_deref_mut(),
                Ordering::Equal => return Ok(&mut node.value),
                Ordering::Greater => node.right.as_deref_mut(),
            };
        }

        Err(Error::NotFound)
    }

    /// Returns `true` if at least one node has the given key.
    pub fn contains_key(&self, key: &K) -> bool
    where
        K: Ord,
    {
        self.find(key).is_ok()
    }

    /// Removes the first node with the given key on the search path and returns its value. If
    /// the tree does not contain the key, nothing happens and `None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1, 2);
    ///
    /// assert_eq!(tree.remove(&1), Some(2));
    /// assert_eq!(tree.remove(&1), None);
    /// assert!(tree.is_empty());
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<V>
    where
        K: Ord,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Like [`remove`][Self::remove] but returns the stored key along with the value.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)>
    where
        K: Ord,
    {
        let entry = Node::unlink(self.search_link(key))?;
        self.len -= 1;
        trace!(len = self.len, "removed node");
        Some(entry)
    }

    /// Returns the link holding the first node with `key` on the search path or, if there is no
    /// such node, the empty link where the search ended.
    fn search_link(&mut self, key: &K) -> &mut Link<K, V>
    where
        K: Ord,
    {
        let mut link = &mut self.root;
        while link.as_deref().is_some_and(|node| *key != node.key) {
            let Some(node) = link else {
                break;
            };
            link = if *key < node.key {
                &mut node.left
            } else {
                &mut node.right
            };
        }
        link
    }
}

impl<K, V> Node<K, V> {
    fn new_boxed(key: K, value: V) -> Box<Self> {
        Box::new(Self {
            key,
            value,
            left: None,
            right: None,
        })
    }

    fn into_entry(self) -> (K, V) {
        (self.key, self.value)
    }

    /// Removes the node held by `link` and returns its entry.
    ///
    /// - A leaf is simply detached.
    /// - A node with one child takes over that child's key, value and subtrees in place and the
    ///   child's allocation is released.
    /// - A node with two children takes over the entry of its inorder successor (the leftmost
    ///   node of its right subtree), which is then unlinked itself. The successor has no left
    ///   child, so that second step never reaches this case again.
    fn unlink(link: &mut Link<K, V>) -> Option<(K, V)>
    where
        K: Ord,
    {
        let node = link.as_deref_mut()?;
        match (node.left.is_some(), node.right.is_some()) {
            (false, false) => {
                trace!("unlinked leaf");
                link.take().map(|node| node.into_entry())
            }
            (true, false) | (false, true) => {
                let child = node.left.take().or_else(|| node.right.take())?;
                let removed = mem::replace(node, *child);
                node.check_children();
                trace!("spliced child into removed node");
                Some(removed.into_entry())
            }
            (true, true) => {
                let (key, value) = Self::unlink(Self::leftmost_link(&mut node.right))?;
                let removed = (
                    mem::replace(&mut node.key, key),
                    mem::replace(&mut node.value, value),
                );
                node.check_children();
                trace!("spliced inorder successor into removed node");
                Some(removed)
            }
        }
    }

    /// Walks left from `link` and returns the link holding the leftmost node.
    fn leftmost_link(mut link: &mut Link<K, V>) -> &mut Link<K, V> {
        while link.as_deref().is_some_and(|node| node.left.is_some()) {
            let Some(node) = link else {
                break;
            };
            link = &mut node.left;
        }
        link
    }

    /// In debug builds, asserts the ordering invariant between this node and its children.
    fn check_children(&self)
    where
        K: Ord,
    {
        if cfg!(debug_assertions) {
            if let Some(left) = self.left.as_deref() {
                assert!(left.key < self.key);
            }
            if let Some(right) = self.right.as_deref() {
                assert!(right.key >= self.key);
            }
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Tree<K, V>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K, V> Extend<(K, V)> for Tree<K, V>
where
    K: Ord,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a, K, V> IntoIterator for &'a Tree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An inorder iterator over the entries of a [`Tree`]. Created by [`Tree::iter`].
pub struct Iter<'a, K, V> {
    /// Nodes whose left subtree has been visited but which haven't been yielded yet. The top of
    /// the stack is the next node to yield.
    stack: Vec<&'a Node<K, V>>,
    remaining: usize,
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V> Iter<'a, K, V> {
    fn new(root: Option<&'a Node<K, V>>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node<K, V>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}
