use std::fmt::{Debug, Display};

use crate::{
    direction::Direction,
    dot::print_dot,
    iter::Iter,
    node::{Arena, NodeId, NodeKind},
    observer::{NoopObserver, Observer, Phase, Step, TreeView},
    snapshot::{snapshot, Snapshot},
};

/// A height-balanced AVL tree of unique, totally-ordered values.
///
/// Every populated node owns exactly two child slots, each of which is either
/// an empty leaf or another populated node. The tree is rebalanced with
/// single and double rotations on insert, bounding its height to O(log n).
///
/// Each structural [`Step`] of an insert is reported to the [`Observer`] `O`,
/// which does nothing by default.
#[derive(Debug, Clone)]
pub struct AvlTree<T, O = NoopObserver> {
    arena: Arena<T>,
    observer: O,
}

impl<T, O> Default for AvlTree<T, O>
where
    O: Default,
{
    fn default() -> Self {
        Self::with_observer(O::default())
    }
}

impl<T> AvlTree<T> {
    /// Construct an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a tree holding the single `value`.
    pub fn with_value(value: T) -> Self
    where
        T: Ord,
    {
        let mut this = Self::new();
        this.insert(value);
        this
    }
}

impl<T> From<Option<T>> for AvlTree<T>
where
    T: Ord,
{
    fn from(value: Option<T>) -> Self {
        value.map(Self::with_value).unwrap_or_default()
    }
}

impl<T, O> AvlTree<T, O> {
    /// Construct an empty tree reporting every insert [`Step`] to `observer`.
    pub fn with_observer(observer: O) -> Self {
        Self {
            arena: Arena::default(),
            observer,
        }
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Consume the tree, returning the [`Observer`].
    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Insert `value` into the tree, returning `true` if it was not already
    /// present.
    ///
    /// Inserting a value equal to an existing value is a no-op.
    pub fn insert(&mut self, value: T) -> bool
    where
        T: Ord,
        O: Observer<T>,
    {
        let Self { arena, observer } = self;

        observer.on_step(
            Step::Insert {
                value: &value,
                phase: Phase::Before,
            },
            TreeView::new(arena),
        );

        // The root handle may change during the insert.
        let outcome = arena.insert(arena.root(), value, observer);

        observer.on_step(
            Step::Insert {
                value: arena.branch(outcome.node()).value(),
                phase: Phase::After,
            },
            TreeView::new(arena),
        );

        outcome.is_inserted()
    }

    /// Iterate over all values in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.arena)
    }

    /// The number of values in the tree.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The value held by the root node, if any.
    pub fn root(&self) -> Option<&T> {
        self.arena
            .node(self.arena.root())
            .as_branch()
            .map(|v| v.value())
    }

    /// The number of populated nodes on the longest path from the root to an
    /// empty leaf.
    pub fn height(&self) -> u8 {
        self.arena.node(self.arena.root()).subtree_height()
    }

    /// Copy the structure of the tree, or [`None`] if the tree is empty.
    pub fn snapshot(&self) -> Option<Snapshot<T>>
    where
        T: Clone,
    {
        snapshot(&self.arena, self.arena.root())
    }

    /// Render the tree as a Graphviz DOT digraph.
    pub fn to_dot(&self) -> String
    where
        T: Display,
    {
        print_dot(&self.arena)
    }

    #[cfg(test)]
    pub(crate) fn arena(&self) -> &Arena<T> {
        &self.arena
    }
}

impl<T, O> Extend<T> for AvlTree<T, O>
where
    T: Ord,
    O: Observer<T>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for v in iter {
            self.insert(v);
        }
    }
}

impl<T, O> FromIterator<T> for AvlTree<T, O>
where
    T: Ord,
    O: Observer<T> + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut this = Self::default();
        this.extend(iter);
        this
    }
}

impl<'a, T, O> IntoIterator for &'a AvlTree<T, O> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An indented dump of the tree, one node per line, children indented below
/// their parent (left first). Empty leaves are rendered as `-`.
impl<T, O> Display for AvlTree<T, O>
where
    T: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fmt_subtree(&self.arena, self.arena.root(), 0, f)
    }
}

fn fmt_subtree<T>(
    arena: &Arena<T>,
    id: NodeId,
    depth: usize,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result
where
    T: Debug,
{
    let indent = depth * 2;
    match arena.node(id).kind() {
        NodeKind::Empty => writeln!(f, "{:indent$}-", ""),
        NodeKind::Branch(n) => {
            writeln!(
                f,
                "{:indent$}Node(value = {:?}, balance_factor = {}, left_height = {}, right_height = {})",
                "",
                n.value(),
                n.balance_factor(),
                n.height(Direction::Left),
                n.height(Direction::Right),
            )?;
            fmt_subtree(arena, n.child(Direction::Left), depth + 1, f)?;
            fmt_subtree(arena, n.child(Direction::Right), depth + 1, f)
        }
    }
}
