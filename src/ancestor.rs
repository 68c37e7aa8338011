use crate::*;

use rustc_hash::FxHashSet;
use tracing::trace;

impl<T: Tree> Zipper<T> {
    /// The deepest position that is an ancestor of (or equal to) both `self`
    /// and `other`, as reached by walking up from `other`. Placeholder values
    /// never count as an ancestor.
    ///
    /// Ancestry is decided by identity alone, so positions in two separately
    /// built trees have no common ancestor even when the trees are
    /// structurally equal. Nor do positions whose edits have been rebuilt into
    /// different ancestors.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn common_ancestor(&self, other: &Zipper<T>) -> Option<Zipper<T>> {
        // keep the values alive so no address in `ids` can be reused while
        // walking `other`
        let ancestors: Vec<T> = std::iter::successors(Some(self.clone()), |z| z.up())
            .map(Zipper::into_focus)
            .filter(|value| !value.is_placeholder())
            .collect();
        let ids: FxHashSet<NodeId> = ancestors.iter().map(Tree::id).collect();

        let found = std::iter::successors(Some(other.clone()), |z| z.up())
            .find(|z| !z.focus().is_placeholder() && ids.contains(&z.focus().id()));
        match &found {
            Some(z) => trace!(depth = z.depth(), "found common ancestor"),
            None => trace!(candidates = ids.len(), "positions share no ancestor"),
        }
        found
    }
}

/// free-function form of `Zipper::common_ancestor`
pub fn common_ancestor<T: Tree>(a: &Zipper<T>, b: &Zipper<T>) -> Option<Zipper<T>> {
    a.common_ancestor(b)
}
