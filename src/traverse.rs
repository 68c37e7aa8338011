use crate::*;

/// the order in which `descendants` yields a position relative to the positions below it
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Order {
    ChildFirst,  // postorder
    ParentFirst, // preorder
}

/// A pruning predicate that never prunes
pub type NoPrune<T> = fn(&T) -> bool;

fn never<T>(_: &T) -> bool {
    false
}

/// Lazy iterator over the immediate children of a position, left to right.
/// Each child is reached through `down`/`right` so its `Path` is fully linked.
#[derive(Debug, Clone)]
pub struct Children<T> {
    next: Option<Zipper<T>>,
}

impl<T: Tree> Iterator for Children<T> {
    type Item = Zipper<T>;
    fn next(&mut self) -> Option<Self::Item> {
        let z = self.next.take()?;
        self.next = z.right();
        Some(z)
    }
}

/// Preorder traversal. Work list of positions still to visit; a position's
/// right sibling is pushed before its first child so the child comes out first.
/// The start position never moves sideways.
#[derive(Clone)]
pub struct Preorder<T, P> {
    start: Option<Zipper<T>>,
    stack: Vec<Zipper<T>>,
    prune: P,
}

impl<T: Tree, P: FnMut(&T) -> bool> Iterator for Preorder<T, P> {
    type Item = Zipper<T>;
    fn next(&mut self) -> Option<Self::Item> {
        let z = match self.start.take() {
            Some(start) => start,
            None => {
                let z = self.stack.pop()?;
                if let Some(next) = z.right() {
                    self.stack.push(next);
                }
                z
            }
        };
        if !(self.prune)(z.focus()) {
            if let Some(child) = z.down() {
                self.stack.push(child);
            }
        }
        Some(z)
    }
}

#[derive(Clone)]
struct Frame<T> {
    zipper: Zipper<T>,
    // children already pushed, yield on next pop
    expanded: bool,
    // continue with the right sibling once this subtree is done
    siblings: bool,
}

/// Postorder traversal, see `Preorder`.
#[derive(Clone)]
pub struct Postorder<T, P> {
    stack: Vec<Frame<T>>,
    prune: P,
}

impl<T: Tree, P: FnMut(&T) -> bool> Iterator for Postorder<T, P> {
    type Item = Zipper<T>;
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.pop()?;
            if !frame.expanded && !(self.prune)(frame.zipper.focus()) {
                if let Some(child) = frame.zipper.down() {
                    self.stack.push(Frame { expanded: true, ..frame });
                    self.stack.push(Frame { zipper: child, expanded: false, siblings: true });
                    continue;
                }
            }
            if frame.siblings {
                if let Some(next) = frame.zipper.right() {
                    self.stack.push(Frame { zipper: next, expanded: false, siblings: true });
                }
            }
            return Some(frame.zipper);
        }
    }
}

/// Either traversal, chosen at runtime by an `Order`
#[derive(Clone)]
pub enum Descendants<T, P> {
    ParentFirst(Preorder<T, P>),
    ChildFirst(Postorder<T, P>),
}

impl<T: Tree, P: FnMut(&T) -> bool> Iterator for Descendants<T, P> {
    type Item = Zipper<T>;
    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Descendants::ParentFirst(it) => it.next(),
            Descendants::ChildFirst(it) => it.next(),
        }
    }
}

impl<T: Tree> Zipper<T> {
    /// the immediate children of the focus as positions
    pub fn children(&self) -> Children<T> {
        Children { next: self.down() }
    }

    /// this position followed by every position below it, parents before children
    pub fn preorder_descendants(&self) -> Preorder<T, NoPrune<T>> {
        self.preorder_descendants_pruned(never::<T> as NoPrune<T>)
    }

    /// Like `preorder_descendants`, but a value for which `prune` returns true
    /// is still yielded while everything below it is skipped.
    pub fn preorder_descendants_pruned<P: FnMut(&T) -> bool>(&self, prune: P) -> Preorder<T, P> {
        Preorder { start: Some(self.clone()), stack: vec![], prune }
    }

    /// every position below this one, children before parents, then this position
    pub fn postorder_descendants(&self) -> Postorder<T, NoPrune<T>> {
        self.postorder_descendants_pruned(never::<T> as NoPrune<T>)
    }

    /// postorder counterpart of `preorder_descendants_pruned`
    pub fn postorder_descendants_pruned<P: FnMut(&T) -> bool>(&self, prune: P) -> Postorder<T, P> {
        Postorder {
            stack: vec![Frame { zipper: self.clone(), expanded: false, siblings: false }],
            prune,
        }
    }

    pub fn descendants<P: FnMut(&T) -> bool>(&self, order: Order, prune: P) -> Descendants<T, P> {
        match order {
            Order::ParentFirst => Descendants::ParentFirst(self.preorder_descendants_pruned(prune)),
            Order::ChildFirst => Descendants::ChildFirst(self.postorder_descendants_pruned(prune)),
        }
    }
}
