use std::fmt::{Debug, Display};

use crate::{
    direction::Direction,
    iter::Iter,
    node::Arena,
    snapshot::{snapshot, Snapshot},
};

/// Whether a [`Step`] is reported before or after the tree is mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Before,
    After,
}

impl Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Before => write!(f, "before"),
            Self::After => write!(f, "after"),
        }
    }
}

/// A structural step taken by an [`AvlTree`] while inserting a value.
///
/// [`AvlTree`]: crate::AvlTree
#[derive(Debug)]
pub enum Step<'a, T> {
    /// A call to [`AvlTree::insert()`] for `value`.
    ///
    /// [`AvlTree::insert()`]: crate::AvlTree::insert
    Insert { value: &'a T, phase: Phase },

    /// The repair of an imbalanced node holding `value`.
    ///
    /// Only reported for nodes that require at least one rotation.
    Balance { value: &'a T, phase: Phase },

    /// A single rotation toward `direction` around the node holding `value`.
    Rotate {
        value: &'a T,
        direction: Direction,
        phase: Phase,
    },
}

impl<'a, T> Step<'a, T> {
    /// The value of the node this step acts on.
    pub fn value(&self) -> &'a T {
        match *self {
            Self::Insert { value, .. }
            | Self::Balance { value, .. }
            | Self::Rotate { value, .. } => value,
        }
    }

    pub fn phase(&self) -> Phase {
        match *self {
            Self::Insert { phase, .. }
            | Self::Balance { phase, .. }
            | Self::Rotate { phase, .. } => phase,
        }
    }
}

impl<T> Display for Step<'_, T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Insert { value, phase } => write!(f, "{phase} insert {value:?}"),
            Self::Balance { value, phase } => write!(f, "{phase} balance {value:?}"),
            Self::Rotate {
                value,
                direction,
                phase,
            } => write!(f, "{phase} rotate {value:?} {direction}"),
        }
    }
}

/// A read-only view of the tree handed to an [`Observer`].
///
/// During a rebalance the cached heights of nodes above the one being
/// repaired are not yet updated.
#[derive(Debug)]
pub struct TreeView<'a, T> {
    arena: &'a Arena<T>,
}

impl<T> Clone for TreeView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TreeView<'_, T> {}

impl<'a, T> TreeView<'a, T> {
    pub(crate) fn new(arena: &'a Arena<T>) -> Self {
        Self { arena }
    }

    /// The value held by the current root, if any.
    pub fn root(&self) -> Option<&'a T> {
        self.arena
            .node(self.arena.root())
            .as_branch()
            .map(|v| v.value())
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over all values in ascending order.
    pub fn iter(&self) -> Iter<'a, T> {
        Iter::new(self.arena)
    }

    pub fn snapshot(&self) -> Option<Snapshot<T>>
    where
        T: Clone,
    {
        snapshot(self.arena, self.arena.root())
    }
}

/// A hook called by an [`AvlTree`] at each [`Step`] of an insert.
///
/// The default implementation does nothing.
///
/// Any `FnMut(Step<'_, T>, TreeView<'_, T>)` closure is an [`Observer`].
///
/// [`AvlTree`]: crate::AvlTree
pub trait Observer<T> {
    #[allow(unused_variables)]
    fn on_step(&mut self, step: Step<'_, T>, tree: TreeView<'_, T>) {}
}

impl<T, F> Observer<T> for F
where
    F: FnMut(Step<'_, T>, TreeView<'_, T>),
{
    fn on_step(&mut self, step: Step<'_, T>, tree: TreeView<'_, T>) {
        self(step, tree)
    }
}

/// An [`Observer`] that ignores all steps.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NoopObserver;

impl<T> Observer<T> for NoopObserver {}

/// A single entry in a [`StepLog`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LogEntry<T> {
    /// A human-readable description of the step, such as "after rotate 1
    /// left".
    pub label: String,

    /// The shape of the tree at the time of the step.
    pub snapshot: Option<Snapshot<T>>,
}

/// An [`Observer`] recording a [`LogEntry`] for every [`Step`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct StepLog<T> {
    entries: Vec<LogEntry<T>>,
}

impl<T> Default for StepLog<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> StepLog<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[LogEntry<T>] {
        &self.entries
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|v| v.label.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear()
    }

    pub fn into_entries(self) -> Vec<LogEntry<T>> {
        self.entries
    }
}

impl<T> Observer<T> for StepLog<T>
where
    T: Clone + Debug,
{
    fn on_step(&mut self, step: Step<'_, T>, tree: TreeView<'_, T>) {
        self.entries.push(LogEntry {
            label: step.to_string(),
            snapshot: tree.snapshot(),
        });
    }
}
