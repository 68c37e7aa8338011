use crate::*;

use std::sync::Arc;
use tracing::trace;

/// A single primitive move of a `Zipper`
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Move {
    Down, // into the first child
    Up,
    Left,
    Right,
    Leftmost,
    Rightmost,
    Root,
}

/// A cursor into an immutable tree: the value in focus plus the `Path` that
/// leads back to the root (None at the root itself).
///
/// Moving never mutates the tree. `replace` swaps the focus and marks the path
/// dirty; ancestors are only rebuilt when `up` actually reaches them, and only
/// along that one chain, so every subtree the edit didn't touch stays
/// identical (same allocation) to the original.
///
/// Cloning is O(1): the path is shared.
#[derive(Debug, Clone)]
pub struct Zipper<T> {
    focus: T,
    path: Option<Arc<Path<T>>>,
}

impl<T: Tree> Zipper<T> {
    /// a zipper at the root of `root`
    pub fn new(root: T) -> Self {
        Zipper { focus: root, path: None }
    }

    #[inline]
    pub fn focus(&self) -> &T {
        &self.focus
    }
    pub fn into_focus(self) -> T {
        self.focus
    }
    pub fn path(&self) -> Option<&Path<T>> {
        self.path.as_deref()
    }
    pub fn is_root(&self) -> bool {
        self.path.is_none()
    }
    /// number of ancestors above the focus
    pub fn depth(&self) -> usize {
        std::iter::successors(self.path(), |path| path.parent_path()).count()
    }

    /// focus the first child. None if the focus is a leaf.
    pub fn down(&self) -> Option<Self> {
        let mut children = self.focus.children().into_iter();
        let first = children.next()?;
        Some(Zipper {
            focus: first,
            path: Some(Arc::new(Path {
                left: List::new(),
                right: children.collect(),
                parent_path: self.path.clone(),
                parent_value: self.focus.clone(),
                changed: false,
            })),
        })
    }

    /// focus the parent. None at the root.
    ///
    /// If nothing under the parent was replaced this hands back the original
    /// parent value; otherwise the parent is rebuilt around the current
    /// siblings and the grandparent's path is marked dirty in turn.
    pub fn up(&self) -> Option<Self> {
        let path = self.path.as_ref()?;
        if !path.changed {
            return Some(Zipper {
                focus: path.parent_value.clone(),
                path: path.parent_path.clone(),
            });
        }
        let children = path.siblings(&self.focus);
        trace!(depth = self.depth(), arity = children.len(), "rebuilding parent");
        Some(Zipper {
            focus: path.parent_value.with_children(children),
            path: path.parent_path.as_ref().map(dirty),
        })
    }

    /// focus the previous sibling. None at the leftmost position.
    pub fn left(&self) -> Option<Self> {
        let path = self.path.as_ref()?;
        let (prev, left) = path.left.uncons()?;
        Some(Zipper {
            focus: prev.clone(),
            path: Some(Arc::new(Path {
                left,
                right: path.right.cons(self.focus.clone()),
                parent_path: path.parent_path.clone(),
                parent_value: path.parent_value.clone(),
                changed: path.changed,
            })),
        })
    }

    /// focus the next sibling. None at the rightmost position.
    pub fn right(&self) -> Option<Self> {
        let path = self.path.as_ref()?;
        let (next, right) = path.right.uncons()?;
        Some(Zipper {
            focus: next.clone(),
            path: Some(Arc::new(Path {
                left: path.left.cons(self.focus.clone()),
                right,
                parent_path: path.parent_path.clone(),
                parent_value: path.parent_value.clone(),
                changed: path.changed,
            })),
        })
    }

    pub fn leftmost(&self) -> Self {
        let mut z = self.clone();
        while let Some(prev) = z.left() {
            z = prev;
        }
        z
    }

    pub fn rightmost(&self) -> Self {
        let mut z = self.clone();
        while let Some(next) = z.right() {
            z = next;
        }
        z
    }

    /// go all the way up, rebuilding whatever was edited on the way
    pub fn root(&self) -> Self {
        let mut z = self.clone();
        while let Some(parent) = z.up() {
            z = parent;
        }
        z
    }

    /// the (possibly rebuilt) root value
    pub fn root_value(&self) -> T {
        self.root().into_focus()
    }

    /// swap the focus for `value`. The rebuild of the ancestors is deferred
    /// to the next `up`.
    pub fn replace(&self, value: T) -> Self {
        Zipper {
            focus: value,
            path: self.path.as_ref().map(dirty),
        }
    }

    pub fn edit<F: FnOnce(&T) -> T>(&self, f: F) -> Self {
        self.replace(f(&self.focus))
    }

    /// take a single step
    pub fn step(&self, mv: Move) -> Option<Self> {
        match mv {
            Move::Down => self.down(),
            Move::Up => self.up(),
            Move::Left => self.left(),
            Move::Right => self.right(),
            Move::Leftmost => Some(self.leftmost()),
            Move::Rightmost => Some(self.rightmost()),
            Move::Root => Some(self.root()),
        }
    }

    /// replay a sequence of moves, stopping with None at the first one that
    /// isn't possible
    pub fn follow(&self, moves: &[Move]) -> Option<Self> {
        let mut z = self.clone();
        for mv in moves {
            z = z.step(*mv)?;
        }
        Some(z)
    }

    /// the moves that lead from the root to this position: a `Down` followed
    /// by one `Right` per left sibling, for each level
    pub fn route(&self) -> Vec<Move> {
        let mut moves = vec![];
        for path in std::iter::successors(self.path(), |path| path.parent_path()) {
            moves.extend(std::iter::repeat(Move::Right).take(path.index()));
            moves.push(Move::Down);
        }
        moves.reverse();
        moves
    }
}
