use crate::{
    direction::Direction,
    node::{Arena, NodeId},
};

/// An owned copy of the shape of a subtree, including the cached heights of
/// every node.
///
/// An empty leaf child is represented by [`None`] in `children`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Snapshot<T> {
    /// The left and right child subtrees, in that order.
    pub children: [Option<Box<Snapshot<T>>>; 2],
    pub left_height: u8,
    pub right_height: u8,
    pub value: T,
}

impl<T> Snapshot<T> {
    pub fn left(&self) -> Option<&Snapshot<T>> {
        self.children[0].as_deref()
    }

    pub fn right(&self) -> Option<&Snapshot<T>> {
        self.children[1].as_deref()
    }

    /// Left height minus right height.
    pub fn balance_factor(&self) -> i16 {
        self.left_height as i16 - self.right_height as i16
    }

    /// The number of values in this subtree.
    pub fn len(&self) -> usize {
        1 + self.children.iter().flatten().map(|v| v.len()).sum::<usize>()
    }
}

/// Copy the subtree rooted at `id`, returning [`None`] if it is an empty leaf.
pub(crate) fn snapshot<T>(arena: &Arena<T>, id: NodeId) -> Option<Snapshot<T>>
where
    T: Clone,
{
    let b = arena.node(id).as_branch()?;

    Some(Snapshot {
        children: [
            snapshot(arena, b.child(Direction::Left)).map(Box::new),
            snapshot(arena, b.child(Direction::Right)).map(Box::new),
        ],
        left_height: b.height(Direction::Left),
        right_height: b.height(Direction::Right),
        value: b.value().clone(),
    })
}
