use crate::*;

use once_cell::sync::Lazy;
use std::sync::Arc;

/// kind of the placeholder node that fills an empty slot
pub static EMPTY_SYM: Lazy<Symbol> = Lazy::new(|| Symbol::from("Empty"));

/// A value in a syntax tree. Cheap to clone: both variants are shared handles,
/// and two `Value`s are the *same* value only if they point at the same
/// allocation (see `Tree::same`).
///
/// Variants:
/// * Node: an ordinary node with a kind (eg `FunctionDef`), an optional name
///   and its children in field order
/// * Seq: a sequence pseudo-node standing in for a list-valued field of its
///   parent, eg the statements of a function body. It has nothing but children.
#[derive(Debug, Clone)]
pub enum Value {
    Node(Arc<Node>),
    Seq(Arc<Seq>),
}

#[derive(Debug)]
pub struct Node {
    pub kind: Symbol,
    pub name: Option<Symbol>,
    pub children: Vec<Value>,
}

#[derive(Debug)]
pub struct Seq {
    pub items: Vec<Value>,
}

impl Value {
    pub fn node(kind: impl Into<Symbol>, children: Vec<Value>) -> Value {
        Value::Node(Arc::new(Node { kind: kind.into(), name: None, children }))
    }
    pub fn named(kind: impl Into<Symbol>, name: impl Into<Symbol>, children: Vec<Value>) -> Value {
        Value::Node(Arc::new(Node { kind: kind.into(), name: Some(name.into()), children }))
    }
    pub fn leaf(kind: impl Into<Symbol>) -> Value {
        Value::node(kind, vec![])
    }
    pub fn seq(items: Vec<Value>) -> Value {
        Value::Seq(Arc::new(Seq { items }))
    }
    /// a fresh placeholder. Every call allocates, so two placeholders are never the same value.
    pub fn empty() -> Value {
        Value::leaf(EMPTY_SYM.clone())
    }

    /// None for sequences
    pub fn kind(&self) -> Option<&Symbol> {
        match self {
            Value::Node(node) => Some(&node.kind),
            Value::Seq(_) => None,
        }
    }
    pub fn name(&self) -> Option<&Symbol> {
        match self {
            Value::Node(node) => node.name.as_ref(),
            Value::Seq(_) => None,
        }
    }
    pub fn is_seq(&self) -> bool {
        matches!(self, Value::Seq(_))
    }
    pub fn is_empty_node(&self) -> bool {
        self.kind() == Some(&*EMPTY_SYM)
    }
    /// number of direct children
    pub fn arity(&self) -> usize {
        self.child_slice().len()
    }
    #[inline]
    pub fn child_slice(&self) -> &[Value] {
        match self {
            Value::Node(node) => &node.children,
            Value::Seq(seq) => &seq.items,
        }
    }
    /// total number of values in this subtree, including itself
    pub fn size(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(value) = stack.pop() {
            count += 1;
            stack.extend(value.child_slice());
        }
        count
    }
}

// Children are moved onto a work list while we hold the last reference, so a
// deeply nested tree is freed in a loop instead of one stack frame per level.
fn drop_values(mut stack: Vec<Value>) {
    while let Some(value) = stack.pop() {
        match value {
            Value::Node(mut node) => {
                if let Some(node) = Arc::get_mut(&mut node) {
                    stack.append(&mut node.children);
                }
            }
            Value::Seq(mut seq) => {
                if let Some(seq) = Arc::get_mut(&mut seq) {
                    stack.append(&mut seq.items);
                }
            }
        }
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        drop_values(std::mem::take(&mut self.children));
    }
}

impl Drop for Seq {
    fn drop(&mut self) {
        drop_values(std::mem::take(&mut self.items));
    }
}

impl Tree for Value {
    fn children(&self) -> Vec<Value> {
        self.child_slice().to_vec()
    }

    fn with_children(&self, children: Vec<Value>) -> Value {
        match self {
            Value::Node(node) => Value::Node(Arc::new(Node {
                kind: node.kind.clone(),
                name: node.name.clone(),
                children,
            })),
            Value::Seq(_) => Value::seq(children),
        }
    }

    #[inline]
    fn id(&self) -> NodeId {
        match self {
            Value::Node(node) => Arc::as_ptr(node) as *const u8 as NodeId,
            Value::Seq(seq) => Arc::as_ptr(seq) as *const u8 as NodeId,
        }
    }

    fn is_placeholder(&self) -> bool {
        self.is_empty_node()
    }

    fn is_sequence(&self) -> bool {
        self.is_seq()
    }

    fn is_leaf(&self) -> bool {
        self.child_slice().is_empty()
    }
}
