use std::iter::FusedIterator;

use crate::{
    direction::Direction,
    node::{Arena, Branch, NodeId, NodeKind},
};

/// An [`Iterator`] performing a depth-first, in-order walk of an
/// [`AvlTree`], yielding values in ascending order.
///
/// [`AvlTree`]: crate::AvlTree
#[derive(Debug)]
pub struct Iter<'a, T> {
    arena: &'a Arena<T>,
    stack: Vec<&'a Branch<T>>,
    remaining: usize,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            arena: self.arena,
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(arena: &'a Arena<T>) -> Self {
        let mut this = Self {
            arena,
            stack: vec![],
            remaining: arena.len(),
        };

        // Descend down the left side of the tree.
        this.push_subtree(arena.root());

        this
    }

    fn push_subtree(&mut self, subtree_root: NodeId) {
        let arena = self.arena;
        let mut ptr = subtree_root;

        while let NodeKind::Branch(v) = arena.node(ptr).kind() {
            self.stack.push(v);
            ptr = v.child(Direction::Left);
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let v = self.stack.pop()?;

        // Descend down the left side of the right hand child of this node, if
        // any.
        self.push_subtree(v.child(Direction::Right));

        self.remaining -= 1;
        Some(v.value())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}
