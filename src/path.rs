use crate::*;

use std::fmt::{self, Debug, Formatter};
use std::iter::FromIterator;
use std::sync::Arc;

/// An immutable singly linked list. `cons` and `uncons` are O(1) and every
/// list built on top of another shares its tail.
pub struct List<T>(Option<Arc<Cons<T>>>);

struct Cons<T> {
    head: T,
    tail: List<T>,
}

impl<T> List<T> {
    /// the empty list
    pub fn new() -> Self {
        List(None)
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }
    /// a new list with `head` in front of `self`
    pub fn cons(&self, head: T) -> Self {
        List(Some(Arc::new(Cons { head, tail: self.clone() })))
    }
    pub fn head(&self) -> Option<&T> {
        self.0.as_ref().map(|cell| &cell.head)
    }
    /// split into the first element and the (shared) rest of the list
    pub fn uncons(&self) -> Option<(&T, List<T>)> {
        self.0.as_ref().map(|cell| (&cell.head, cell.tail.clone()))
    }
    /// O(n)
    pub fn len(&self) -> usize {
        self.iter().count()
    }
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { next: self.0.as_deref() }
    }
}

impl<T> Clone for List<T> {
    fn clone(&self) -> Self {
        List(self.0.clone())
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        List::new()
    }
}

// unlink iteratively so long sibling lists can't overflow the stack on drop
impl<T> Drop for List<T> {
    fn drop(&mut self) {
        let mut next = self.0.take();
        while let Some(cell) = next {
            match Arc::try_unwrap(cell) {
                Ok(mut cons) => next = cons.tail.0.take(),
                Err(_) => break,
            }
        }
    }
}

/// the first item yielded becomes the head of the list
impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let items: Vec<T> = iter.into_iter().collect();
        items.into_iter().rev().fold(List::new(), |list, item| list.cons(item))
    }
}

impl<T: Debug> Debug for List<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

pub struct Iter<'a, T> {
    next: Option<&'a Cons<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;
    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|cell| {
            self.next = cell.tail.0.as_deref();
            &cell.head
        })
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// The context of a `Zipper` focus: everything needed to rebuild the parent
/// on the way back up.
///
/// Invariant: `reverse(left) ++ [focus] ++ right` is the child list the parent
/// had when this Path was made by `down`.
#[derive(Debug)]
pub struct Path<T> {
    /// left siblings, nearest first
    pub(crate) left: List<T>,
    /// right siblings, nearest first
    pub(crate) right: List<T>,
    /// None when the parent is the root
    pub(crate) parent_path: Option<Arc<Path<T>>>,
    /// the parent as it was before any edit below it
    pub(crate) parent_value: T,
    /// set once the focus (or anything under it) has been replaced
    pub(crate) changed: bool,
}

impl<T> Path<T> {
    pub fn left(&self) -> &List<T> {
        &self.left
    }
    pub fn right(&self) -> &List<T> {
        &self.right
    }
    pub fn parent_path(&self) -> Option<&Path<T>> {
        self.parent_path.as_deref()
    }
    pub fn parent_value(&self) -> &T {
        &self.parent_value
    }
    pub fn changed(&self) -> bool {
        self.changed
    }
    /// index of the focus among its siblings
    pub fn index(&self) -> usize {
        self.left.len()
    }
}

impl<T: Tree> Path<T> {
    /// the parent's children with `focus` in the hole
    pub fn siblings(&self, focus: &T) -> Vec<T> {
        let mut children: Vec<T> = self.left.iter().cloned().collect();
        children.reverse();
        children.push(focus.clone());
        children.extend(self.right.iter().cloned());
        children
    }

    /// copy of this Path with the changed flag set
    pub(crate) fn mark_changed(&self) -> Path<T> {
        Path {
            left: self.left.clone(),
            right: self.right.clone(),
            parent_path: self.parent_path.clone(),
            parent_value: self.parent_value.clone(),
            changed: true,
        }
    }
}

// a zipper deep in a tree holds one Path per level; unlink them the same way
// as List so dropping it doesn't recurse once per ancestor
impl<T> Drop for Path<T> {
    fn drop(&mut self) {
        let mut next = self.parent_path.take();
        while let Some(path) = next {
            match Arc::try_unwrap(path) {
                Ok(mut path) => next = path.parent_path.take(),
                Err(_) => break,
            }
        }
    }
}

/// Share `path` if it is already marked changed, otherwise a marked copy.
pub(crate) fn dirty<T: Tree>(path: &Arc<Path<T>>) -> Arc<Path<T>> {
    if path.changed {
        path.clone()
    } else {
        Arc::new(path.mark_changed())
    }
}
