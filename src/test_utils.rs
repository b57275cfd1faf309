use std::fmt::Debug;

use crate::{
    direction::Direction,
    node::{Arena, NodeId},
    observer::{Observer, Phase, Step, TreeView},
    AvlTree,
};

/// An [`Observer`] recording the value and direction of every rotation.
#[derive(Debug, Default, Clone)]
pub(crate) struct Rotations(Vec<(i32, Direction)>);

impl Rotations {
    pub(crate) fn rotations(&self) -> &[(i32, Direction)] {
        &self.0
    }
}

impl Observer<i32> for Rotations {
    fn on_step(&mut self, step: Step<'_, i32>, _tree: TreeView<'_, i32>) {
        if let Step::Rotate {
            value,
            direction,
            phase: Phase::Before,
        } = step
        {
            self.0.push((*value, direction));
        }
    }
}

/// Assert the BST and AVL properties of tree nodes, ensuring the tree is
/// well-formed.
///
/// Returns the number of populated nodes reachable from the root.
pub(crate) fn validate_tree_structure<T, O>(t: &AvlTree<T, O>) -> usize
where
    T: Ord + Debug,
{
    let arena = t.arena();
    let root = arena.root();

    // Invariant 1: the root has no parent.
    assert_eq!(arena.node(root).parent(), None);

    let (n, _height) = validate_subtree(arena, root, None, None);

    // Invariant 2: the cached count matches the populated nodes.
    assert_eq!(n, t.len());

    n
}

/// Validate the subtree rooted at `id`, whose values must all fall within the
/// exclusive `(lower, upper)` bounds.
///
/// Returns the number of populated nodes and the height of the subtree.
fn validate_subtree<T>(
    arena: &Arena<T>,
    id: NodeId,
    lower: Option<&T>,
    upper: Option<&T>,
) -> (usize, u8)
where
    T: Ord + Debug,
{
    let n = match arena.node(id).as_branch() {
        Some(v) => v,
        None => return (0, 0),
    };

    // Invariant 3: the value lies strictly between all ancestors it descends
    // from on the left and right (BST order, no duplicates).
    if let Some(lower) = lower {
        assert!(n.value() > lower, "{:?} <= lower bound {lower:?}", n.value());
    }
    if let Some(upper) = upper {
        assert!(n.value() < upper, "{:?} >= upper bound {upper:?}", n.value());
    }

    let mut count = 1;
    let mut heights = [0; 2];
    for (i, d) in [Direction::Left, Direction::Right].into_iter().enumerate() {
        let child = n.child(d);

        // Invariant 4: every child points back at this node.
        assert_eq!(
            arena.node(child).parent(),
            Some(id),
            "child of {:?} has a broken parent link",
            n.value()
        );

        let (lower, upper) = match d {
            Direction::Left => (lower, Some(n.value())),
            Direction::Right => (Some(n.value()), upper),
        };
        let (c, h) = validate_subtree(arena, child, lower, upper);
        count += c;
        heights[i] = h;

        // Invariant 5: the cached height matches the actual subtree height.
        assert_eq!(
            n.height(d),
            h,
            "expect node with value {:?} to have {d} height {h}, has {}",
            n.value(),
            n.height(d),
        );
    }

    // Invariant 6: the absolute height difference between the left subtree
    // and right subtree (the "balance factor") cannot exceed 1.
    let balance = n.balance_factor();
    assert!(
        balance.abs() <= 1,
        "balance={balance}, value={:?}",
        n.value()
    );

    (count, heights[0].max(heights[1]) + 1)
}
