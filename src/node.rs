use std::cmp::Ordering;

use log::{debug, trace};

use crate::{
    direction::Direction,
    observer::{Observer, Phase, Step, TreeView},
};

/// A stable handle to a [`Node`] slot in an [`Arena`].
///
/// Handles are never invalidated: nodes are only ever appended to the arena,
/// and rotations rewire handles rather than moving nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

impl NodeId {
    pub(crate) fn index(&self) -> usize {
        self.0
    }
}

/// The result of inserting a value into a subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InsertOutcome {
    /// The value was stored in the (previously empty) node slot.
    Inserted(NodeId),

    /// An equal value already exists in the node, and the tree is unchanged.
    Duplicate(NodeId),
}

impl InsertOutcome {
    pub(crate) fn node(&self) -> NodeId {
        match self {
            Self::Inserted(v) | Self::Duplicate(v) => *v,
        }
    }

    pub(crate) fn is_inserted(&self) -> bool {
        matches!(self, Self::Inserted(_))
    }
}

#[derive(Debug, Clone)]
pub(crate) enum NodeKind<T> {
    /// An unpopulated leaf slot with no value and no children.
    Empty,
    Branch(Branch<T>),
}

/// A populated node, always owning exactly two child slots.
#[derive(Debug, Clone)]
pub(crate) struct Branch<T> {
    value: T,

    /// Child slots, each either empty or another branch.
    left: NodeId,
    right: NodeId,

    /// The cached heights of the left and right subtrees.
    ///
    /// An empty leaf has a height of 0, and a branch has a height of 1 + the
    /// maximum of its child heights.
    ///
    /// A u8 holds a maximum value of 255, meaning it can represent the height
    /// of a balanced tree of up to 5.78*10⁷⁶ entries.
    left_height: u8,
    right_height: u8,
}

impl<T> Branch<T> {
    pub(crate) fn value(&self) -> &T {
        &self.value
    }

    pub(crate) fn child(&self, d: Direction) -> NodeId {
        match d {
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    fn child_mut(&mut self, d: Direction) -> &mut NodeId {
        match d {
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
        }
    }

    pub(crate) fn height(&self, d: Direction) -> u8 {
        match d {
            Direction::Left => self.left_height,
            Direction::Right => self.right_height,
        }
    }

    /// Compute the "balance factor" of the subtree rooted at this node.
    ///
    /// Returns the subtree height skew / magnitude, which is a positive number
    /// when left heavy, and a negative number when right heavy.
    pub(crate) fn balance_factor(&self) -> i16 {
        self.left_height as i16 - self.right_height as i16
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Node<T> {
    /// Non-owning back-reference to the parent slot, [`None`] for the root.
    parent: Option<NodeId>,
    kind: NodeKind<T>,
}

impl<T> Node<T> {
    fn empty(parent: Option<NodeId>) -> Self {
        Self {
            parent,
            kind: NodeKind::Empty,
        }
    }

    pub(crate) fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub(crate) fn kind(&self) -> &NodeKind<T> {
        &self.kind
    }

    pub(crate) fn as_branch(&self) -> Option<&Branch<T>> {
        match &self.kind {
            NodeKind::Empty => None,
            NodeKind::Branch(v) => Some(v),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        matches!(self.kind, NodeKind::Empty)
    }

    /// The height of the subtree rooted at this node, as seen by its parent.
    pub(crate) fn subtree_height(&self) -> u8 {
        match &self.kind {
            NodeKind::Empty => 0,
            NodeKind::Branch(v) => v.left_height.max(v.right_height) + 1,
        }
    }
}

/// Backing storage for all the node slots of a single tree.
///
/// The arena also holds the handle of the current root, which a rotation at
/// the top of the tree replaces.
#[derive(Debug, Clone)]
pub(crate) struct Arena<T> {
    nodes: Vec<Node<T>>,
    root: NodeId,

    /// The number of populated nodes.
    len: usize,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self {
            nodes: vec![Node::empty(None)],
            root: NodeId(0),
            len: 0,
        }
    }
}

impl<T> Arena<T> {
    pub(crate) fn root(&self) -> NodeId {
        self.root
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<T> {
        &mut self.nodes[id.0]
    }

    /// Return the [`Branch`] stored at `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` refers to an empty leaf.
    pub(crate) fn branch(&self, id: NodeId) -> &Branch<T> {
        match &self.node(id).kind {
            NodeKind::Branch(v) => v,
            NodeKind::Empty => unreachable!("expected {id:?} to be a populated node"),
        }
    }

    fn branch_mut(&mut self, id: NodeId) -> &mut Branch<T> {
        match &mut self.node_mut(id).kind {
            NodeKind::Branch(v) => v,
            NodeKind::Empty => unreachable!("expected {id:?} to be a populated node"),
        }
    }

    fn alloc_empty(&mut self, parent: NodeId) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::empty(Some(parent)));
        id
    }

    /// Store `value` in the empty leaf at `id`, attaching two fresh empty
    /// leaves as its children.
    pub(crate) fn become_branch(&mut self, id: NodeId, value: T) {
        debug_assert!(self.node(id).is_empty());

        let left = self.alloc_empty(id);
        let right = self.alloc_empty(id);

        self.node_mut(id).kind = NodeKind::Branch(Branch {
            value,
            left,
            right,
            left_height: 0,
            right_height: 0,
        });
        self.len += 1;
    }

    /// Link `child` as the `d` child of `parent`, pointing the child's parent
    /// handle back at `parent`.
    ///
    /// Cached heights are not updated.
    fn set_child(&mut self, parent: NodeId, d: Direction, child: NodeId) {
        *self.branch_mut(parent).child_mut(d) = child;
        self.node_mut(child).parent = Some(parent);
    }

    /// Return the side of `parent` that `child` is linked to.
    ///
    /// # Panics
    ///
    /// Panics if `child` is not a child of `parent`.
    fn side_of(&self, parent: NodeId, child: NodeId) -> Direction {
        let p = self.branch(parent);
        if p.left == child {
            Direction::Left
        } else if p.right == child {
            Direction::Right
        } else {
            unreachable!("{child:?} is not a child of its recorded parent {parent:?}")
        }
    }

    /// Recompute the cached child heights of the branch at `id` from the
    /// cached heights of its direct children.
    ///
    /// The children must already hold correct heights.
    pub(crate) fn fix_height_metadata(&mut self, id: NodeId) {
        let b = self.branch(id);
        let left_height = self.node(b.left).subtree_height();
        let right_height = self.node(b.right).subtree_height();

        let b = self.branch_mut(id);
        b.left_height = left_height;
        b.right_height = right_height;
    }

    fn notify<O>(&self, observer: &mut O, step: Step<'_, T>)
    where
        O: Observer<T>,
    {
        observer.on_step(step, TreeView::new(self));
    }
}

impl<T> Arena<T>
where
    T: Ord,
{
    /// Insert `value` into the subtree rooted at `id`, rebalancing every
    /// ancestor on the path back up.
    pub(crate) fn insert<O>(&mut self, id: NodeId, value: T, observer: &mut O) -> InsertOutcome
    where
        O: Observer<T>,
    {
        let next = match &self.node(id).kind {
            NodeKind::Empty => {
                // A brand-new branch has two empty children and is therefore
                // perfectly balanced.
                self.become_branch(id, value);
                return InsertOutcome::Inserted(id);
            }
            NodeKind::Branch(b) => match value.cmp(&b.value) {
                Ordering::Less => b.left,
                Ordering::Greater => b.right,
                Ordering::Equal => {
                    debug!("ignoring insert of duplicate value");
                    return InsertOutcome::Duplicate(id);
                }
            },
        };

        let outcome = self.insert(next, value, observer);
        if !outcome.is_inserted() {
            // The tree structure has not been modified, so it does not require
            // rebalancing.
            return outcome;
        }

        self.fix_height_metadata(id);
        self.balance(id, observer);

        outcome
    }

    /// Restore the balance factor of the branch at `id` to within [-1, 1],
    /// assuming both child subtrees are balanced.
    pub(crate) fn balance<O>(&mut self, id: NodeId, observer: &mut O)
    where
        O: Observer<T>,
    {
        let bf = self.branch(id).balance_factor();
        let (side, other) = match bf {
            2 => (Direction::Left, Direction::Right),
            -2 => (Direction::Right, Direction::Left),
            -1..=1 => return,
            _ => unreachable!("balance factor {bf} cannot be repaired by rotation"),
        };

        trace!("rebalancing {side}-heavy node (balance factor {bf})");
        self.notify(
            observer,
            Step::Balance {
                value: self.branch(id).value(),
                phase: Phase::Before,
            },
        );

        // Resolve a zig-zag shape into a straight line before the final
        // rotation.
        let child = self.branch(id).child(side);
        if self.needs_child_rotation(child, side, other) {
            self.rotate(child, side, observer);
        }
        self.rotate(id, other, observer);

        // Invariant: the demoted node and the subtree root that replaced it
        // are both balanced.
        debug_assert!(
            self.branch(id).balance_factor().abs() <= 1,
            "tree is too imbalanced after rebalancing"
        );
        debug_assert!(
            self.node(id)
                .parent()
                .map(|p| self.branch(p).balance_factor().abs() <= 1)
                .unwrap_or(true),
            "tree is too imbalanced after rebalancing"
        );

        self.notify(
            observer,
            Step::Balance {
                value: self.branch(id).value(),
                phase: Phase::After,
            },
        );
    }

    /// Decide if the heavy `child` must first be rotated toward `side`.
    ///
    /// The rotation fires when the inner grandchild (on `other`) is populated
    /// and either the outer grandchild (on `side`) is empty, or both are
    /// populated and the child is taller on the inner side.
    fn needs_child_rotation(&self, child: NodeId, side: Direction, other: Direction) -> bool {
        let c = self.branch(child);
        let outer = self.node(c.child(side));
        let inner = self.node(c.child(other));

        match (outer.is_empty(), inner.is_empty()) {
            (true, false) => true,
            (false, false) => c.height(side) < c.height(other),
            _ => false,
        }
    }

    /// Rotate the subtree rooted at `x` toward `direction` around the pivot
    /// `P`, the child of `x` on the opposite side.
    ///
    /// ```text
    ///
    ///      x
    ///     / \                               P
    ///    1   P         Rotate Left        /   \
    ///       / \      --------------->    x     y
    ///      2   y                        / \   / \
    ///         / \                      1   2 3   4
    ///        3   4
    /// ```
    ///
    /// `P` takes the position of `x` within the parent of `x`, or becomes the
    /// root of the tree if `x` was the root.
    ///
    /// # Panics
    ///
    /// Panics if `x` has no populated child opposite `direction` (cannot be
    /// rotated), or if the parent of `x` does not link to `x`.
    pub(crate) fn rotate<O>(&mut self, x: NodeId, direction: Direction, observer: &mut O)
    where
        O: Observer<T>,
    {
        let opposite = direction.opposite();
        let pivot = self.branch(x).child(opposite);
        if self.node(pivot).is_empty() {
            unreachable!("cannot rotate {direction} without a populated {opposite} child");
        }

        trace!("rotating {direction} around {x:?} with pivot {pivot:?}");
        self.notify(
            observer,
            Step::Rotate {
                value: self.branch(x).value(),
                direction,
                phase: Phase::Before,
            },
        );

        let old_parent = self.node(x).parent;

        let moved = self.branch(pivot).child(direction);
        self.set_child(x, opposite, moved);
        self.set_child(pivot, direction, x);

        match old_parent {
            Some(p) => {
                let side = self.side_of(p, x);
                self.set_child(p, side, pivot);
            }
            None => {
                debug_assert_eq!(self.root, x);
                self.root = pivot;
                self.node_mut(pivot).parent = None;
            }
        }

        // Bottom-up: x is now a child of the pivot.
        self.fix_height_metadata(x);
        self.fix_height_metadata(pivot);

        self.notify(
            observer,
            Step::Rotate {
                value: self.branch(x).value(),
                direction,
                phase: Phase::After,
            },
        );
    }
}
