//! Structurally shared restriction chains.
//!
//! A node stores only the delta that separates it from its parent plus a
//! shared reference to the parent's chain. Siblings share every ancestor
//! link, so creating a child is O(1) regardless of depth.

use std::fmt::{self, Debug};
use std::sync::Arc;

struct Link<B> {
    delta: B,
    parent: Option<Arc<Link<B>>>,
}

/// Immutable chain of restriction deltas from a node up to the root.
///
/// # Example
///
/// ```
/// use branchbound_core::Restrictions;
///
/// let root: Restrictions<&str> = Restrictions::new();
/// let left = root.extend("x0 <= 0");
/// let deeper = left.extend("x3 >= 1");
///
/// assert_eq!(deeper.len(), 2);
/// assert_eq!(deeper.latest(), Some(&"x3 >= 1"));
/// assert_eq!(deeper.iter().collect::<Vec<_>>(), vec![&"x3 >= 1", &"x0 <= 0"]);
/// assert!(root.is_empty());
/// ```
pub struct Restrictions<B> {
    head: Option<Arc<Link<B>>>,
    len: usize,
}

impl<B> Restrictions<B> {
    /// Creates the empty chain of the root node.
    pub fn new() -> Self {
        Self { head: None, len: 0 }
    }

    /// Returns a new chain with `delta` on top of this one.
    pub fn extend(&self, delta: B) -> Self {
        Self {
            head: Some(Arc::new(Link {
                delta,
                parent: self.head.clone(),
            })),
            len: self.len + 1,
        }
    }

    /// The delta added by the node owning this chain.
    pub fn latest(&self) -> Option<&B> {
        self.head.as_ref().map(|link| &link.delta)
    }

    /// Walks the deltas from the newest to the root.
    pub fn iter(&self) -> Iter<'_, B> {
        Iter {
            next: self.head.as_deref(),
        }
    }

    /// Collects the deltas root first.
    pub fn to_vec_root_first(&self) -> Vec<&B> {
        let mut deltas: Vec<&B> = self.iter().collect();
        deltas.reverse();
        deltas
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if both chains share the same head allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.head, &other.head) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<B> Default for Restrictions<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B> Clone for Restrictions<B> {
    fn clone(&self) -> Self {
        Self {
            head: self.head.clone(),
            len: self.len,
        }
    }
}

impl<B: PartialEq> PartialEq for Restrictions<B> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && (self.ptr_eq(other) || self.iter().eq(other.iter()))
    }
}

impl<B: Eq> Eq for Restrictions<B> {}

impl<B: Debug> Debug for Restrictions<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.to_vec_root_first()).finish()
    }
}

// Drop iteratively so deep chains cannot overflow the stack.
impl<B> Drop for Restrictions<B> {
    fn drop(&mut self) {
        let mut next = self.head.take();
        while let Some(link) = next {
            match Arc::try_unwrap(link) {
                Ok(mut owned) => next = owned.parent.take(),
                Err(_) => break,
            }
        }
    }
}

/// Iterator over deltas, newest first.
pub struct Iter<'a, B> {
    next: Option<&'a Link<B>>,
}

impl<'a, B> Iterator for Iter<'a, B> {
    type Item = &'a B;

    fn next(&mut self) -> Option<Self::Item> {
        let link = self.next?;
        self.next = link.parent.as_deref();
        Some(&link.delta)
    }
}

impl<'a, B> IntoIterator for &'a Restrictions<B> {
    type Item = &'a B;
    type IntoIter = Iter<'a, B>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_siblings_share_parent_chain() {
        let parent = Restrictions::new().extend(1).extend(2);
        let a = parent.extend(3);
        let b = parent.extend(4);

        assert_eq!(a.iter().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
        assert_eq!(b.iter().copied().collect::<Vec<_>>(), vec![4, 2, 1]);
        assert_eq!(parent.len(), 2);
    }

    #[test]
    fn test_equality_is_structural() {
        let a = Restrictions::new().extend("a").extend("b");
        let b = Restrictions::new().extend("a").extend("b");
        let c = Restrictions::new().extend("b").extend("a");

        assert_eq!(a, b);
        assert!(!a.ptr_eq(&b));
        assert_ne!(a, c);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_root_first_order() {
        let chain = Restrictions::new().extend('x').extend('y').extend('z');
        assert_eq!(chain.to_vec_root_first(), vec![&'x', &'y', &'z']);
        assert_eq!(chain.latest(), Some(&'z'));
    }

    #[test]
    fn test_deep_chain_drops_without_overflow() {
        let mut chain = Restrictions::new();
        for i in 0..200_000u32 {
            chain = chain.extend(i);
        }
        assert_eq!(chain.len(), 200_000);
        drop(chain);
    }
}
