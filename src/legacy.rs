//! Named accessors from the older position-based API, kept for callers that
//! haven't moved to the primitive moves. Each is exactly its primitive
//! composition and carries no state of its own.

use crate::*;

impl<T: Tree> Zipper<T> {
    /// same as `up`
    pub fn parent(&self) -> Option<Self> {
        self.up()
    }

    /// same as `right`
    pub fn next_sibling(&self) -> Option<Self> {
        self.right()
    }

    /// same as `left`
    pub fn previous_sibling(&self) -> Option<Self> {
        self.left()
    }

    /// `down` then `rightmost`; None for a leaf
    pub fn last_child(&self) -> Option<Self> {
        self.down().map(|child| child.rightmost())
    }

    /// The nearest ancestor that is a real node, stepping over sequence
    /// pseudo-nodes. A statement inside a function body reports the function,
    /// not the body list, which is what the old API's `parent` did.
    pub fn node_parent(&self) -> Option<Self> {
        let mut z = self.up()?;
        while z.focus().is_sequence() {
            z = z.up()?;
        }
        Some(z)
    }
}
