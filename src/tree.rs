
/// Identity of a tree value. Two handles with the same `NodeId` refer to the
/// same allocation; structurally equal values built separately never share one.
pub type NodeId = usize;

/// The capability a tree needs for a `Zipper` to walk it: an ordered list of
/// children, identity comparison, and a way to rebuild a parent around a new
/// list of children.
///
/// Implementors are expected to be cheap handles (eg an `Arc` around the real
/// node) so that `clone()` shares the subtree rather than copying it.
pub trait Tree: Clone {
    /// The ordered children of this value, empty for leaves.
    fn children(&self) -> Vec<Self>;

    /// Build a new value that keeps every field of `self` except its children,
    /// which are replaced by `children`. Only called when rebuilding an
    /// ancestor of an edited position.
    fn with_children(&self, children: Vec<Self>) -> Self;

    /// Identity of the underlying allocation.
    fn id(&self) -> NodeId;

    /// true if `self` and `other` are the same value (not merely equal)
    #[inline]
    fn same(&self, other: &Self) -> bool {
        self.id() == other.id()
    }

    /// Placeholder values stand in for an empty slot and are never counted
    /// as an ancestor by `Zipper::common_ancestor`.
    fn is_placeholder(&self) -> bool {
        false
    }

    /// Sequence pseudo-nodes wrap a list-valued field of their parent and
    /// carry nothing but their children.
    fn is_sequence(&self) -> bool {
        false
    }

    fn is_leaf(&self) -> bool {
        self.children().is_empty()
    }
}
