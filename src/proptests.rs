//! Property tests: zippers over randomly generated trees are checked against
//! an index-based oracle that labels every value in preorder and records its
//! parent and children.

use crate::*;

use proptest::prelude::*;
use proptest::sample::Index;
use rustc_hash::FxHashSet;

const KINDS: &[&str] =
    &["Module", "FunctionDef", "Assign", "Return", "If", "Call", "Name", "Const", "Pass"];

fn kind_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(KINDS)
}

/// Random trees mixing named and unnamed nodes, sequences (including empty
/// ones) and placeholders. Every generated value is a separate allocation.
fn tree_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        4 => kind_strategy().prop_map(|kind| Value::leaf(kind)),
        1 => Just(()).prop_map(|_| Value::empty()),
    ];
    leaf.prop_recursive(5, 96, 5, |inner| {
        prop_oneof![
            3 => (kind_strategy(), prop::collection::vec(inner.clone(), 1..5))
                .prop_map(|(kind, children)| Value::node(kind, children)),
            1 => (kind_strategy(), "[a-z]{1,3}", prop::collection::vec(inner.clone(), 0..3))
                .prop_map(|(kind, name, children)| Value::named(kind, name, children)),
            2 => prop::collection::vec(inner, 0..5).prop_map(Value::seq),
        ]
    })
}

struct Entry {
    value: Value,
    parent: Option<usize>,
    children: Vec<usize>,
}

/// every value of a tree labelled in preorder, the root is label 0
struct Labels {
    entries: Vec<Entry>,
}

impl Labels {
    fn new(root: &Value) -> Labels {
        fn assign(entries: &mut Vec<Entry>, value: &Value, parent: Option<usize>) -> usize {
            let label = entries.len();
            entries.push(Entry { value: value.clone(), parent, children: vec![] });
            let children =
                value.children().iter().map(|child| assign(entries, child, Some(label))).collect();
            entries[label].children = children;
            label
        }
        let mut entries = vec![];
        assign(&mut entries, root, None);
        Labels { entries }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn value(&self, label: usize) -> &Value {
        &self.entries[label].value
    }

    fn index_in_parent(&self, label: usize) -> Option<usize> {
        let parent = self.entries[label].parent?;
        self.entries[parent].children.iter().position(|&c| c == label)
    }

    /// every legal move from `label` and where it lands
    fn edges(&self, label: usize) -> Vec<(usize, Move)> {
        let entry = &self.entries[label];
        let mut edges = vec![];
        if let Some(&first) = entry.children.first() {
            edges.push((first, Move::Down));
        }
        if let (Some(parent), Some(index)) = (entry.parent, self.index_in_parent(label)) {
            edges.push((parent, Move::Up));
            edges.push((0, Move::Root));
            let siblings = &self.entries[parent].children;
            if index > 0 {
                edges.push((siblings[0], Move::Leftmost));
                edges.push((siblings[index - 1], Move::Left));
            }
            if index + 1 < siblings.len() {
                edges.push((siblings[index + 1], Move::Right));
                edges.push((siblings[siblings.len() - 1], Move::Rightmost));
            }
        }
        edges
    }

    /// labels from the root down to `label`, inclusive
    fn chain(&self, label: usize) -> Vec<usize> {
        let mut chain: Vec<usize> =
            std::iter::successors(Some(label), |&l| self.entries[l].parent).collect();
        chain.reverse();
        chain
    }

    /// `Down` plus one `Right` per left sibling, for each level below the root
    fn route(&self, label: usize) -> Vec<Move> {
        let mut moves = vec![];
        for &l in self.chain(label).iter().skip(1) {
            moves.push(Move::Down);
            moves.extend(std::iter::repeat(Move::Right).take(self.index_in_parent(l).unwrap_or(0)));
        }
        moves
    }

    fn preorder(&self, label: usize, prune: &dyn Fn(&Value) -> bool) -> Vec<usize> {
        let mut out = vec![label];
        if !prune(self.value(label)) {
            for &child in &self.entries[label].children {
                out.extend(self.preorder(child, prune));
            }
        }
        out
    }

    fn postorder(&self, label: usize, prune: &dyn Fn(&Value) -> bool) -> Vec<usize> {
        let mut out = vec![];
        if !prune(self.value(label)) {
            for &child in &self.entries[label].children {
                out.extend(self.postorder(child, prune));
            }
        }
        out.push(label);
        out
    }

    fn common_ancestor(&self, a: usize, b: usize) -> Option<usize> {
        let ancestors: FxHashSet<usize> =
            std::iter::successors(Some(a), |&l| self.entries[l].parent)
                .filter(|&l| !self.value(l).is_placeholder())
                .collect();
        std::iter::successors(Some(b), |&l| self.entries[l].parent).find(|l| ancestors.contains(l))
    }

    fn node_parent(&self, label: usize) -> Option<usize> {
        std::iter::successors(self.entries[label].parent, |&l| self.entries[l].parent)
            .find(|&l| !self.value(l).is_sequence())
    }
}

fn check_labels<I: Iterator<Item = Zipper<Value>>>(
    labels: &Labels,
    positions: I,
    expected: &[usize],
) -> Result<(), TestCaseError> {
    let positions: Vec<Zipper<Value>> = positions.collect();
    prop_assert_eq!(positions.len(), expected.len());
    for (z, &label) in positions.iter().zip(expected) {
        prop_assert!(
            z.focus().same(labels.value(label)),
            "expected {} got {}",
            labels.value(label),
            z.focus()
        );
    }
    Ok(())
}

fn check_option(
    labels: &Labels,
    z: Option<Zipper<Value>>,
    expected: Option<usize>,
) -> Result<(), TestCaseError> {
    match (z, expected) {
        (Some(z), Some(label)) => prop_assert!(z.focus().same(labels.value(label))),
        (None, None) => {}
        (z, label) => prop_assert!(
            false,
            "got {:?}, expected label {:?}",
            z.map(|z| z.focus().to_string()),
            label
        ),
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_random_walk(
        root in tree_strategy(),
        choices in prop::collection::vec(any::<Index>(), 0..100),
    ) {
        init_tracing();
        let labels = Labels::new(&root);
        let mut label = 0;
        let mut z = Zipper::new(root.clone());
        for choice in choices {
            let edges = labels.edges(label);
            if edges.is_empty() {
                break;
            }
            let (target, mv) = edges[choice.index(edges.len())];
            z = match z.step(mv) {
                Some(next) => next,
                None => {
                    return Err(TestCaseError::fail(format!("{:?} from label {} failed", mv, label)))
                }
            };
            prop_assert!(
                z.focus().same(labels.value(target)),
                "{:?} landed on {} instead of {}",
                mv,
                z.focus(),
                labels.value(target)
            );
            match (z.path(), labels.entries[target].parent) {
                (Some(path), Some(parent)) => {
                    prop_assert!(!path.changed());
                    prop_assert!(path.parent_value().same(labels.value(parent)));
                    let siblings = path.siblings(z.focus());
                    let expected = &labels.entries[parent].children;
                    prop_assert_eq!(siblings.len(), expected.len());
                    for (sibling, &l) in siblings.iter().zip(expected) {
                        prop_assert!(sibling.same(labels.value(l)));
                    }
                }
                (None, None) => {}
                _ => prop_assert!(
                    false,
                    "path presence disagrees with the oracle at label {}",
                    target
                ),
            }
            prop_assert_eq!(z.depth(), labels.chain(target).len() - 1);
            label = target;
        }
        // nothing was replaced, so the walk rebuilt nothing
        prop_assert!(z.root_value().same(&root));
    }

    #[test]
    fn prop_round_trips(root in tree_strategy(), pick in any::<Index>()) {
        let labels = Labels::new(&root);
        let label = pick.index(labels.len());
        let z = Zipper::new(root.clone()).follow(&labels.route(label)).unwrap();
        prop_assert!(z.focus().same(labels.value(label)));
        prop_assert_eq!(z.route(), labels.route(label));
        if let Some(child) = z.down() {
            prop_assert!(child.up().unwrap().focus().same(z.focus()));
        }
        if let Some(next) = z.right() {
            prop_assert!(next.left().unwrap().focus().same(z.focus()));
        }
        if let Some(prev) = z.left() {
            prop_assert!(prev.right().unwrap().focus().same(z.focus()));
        }
        prop_assert!(z.leftmost().leftmost().focus().same(z.leftmost().focus()));
        prop_assert!(z.rightmost().right().is_none());
        prop_assert!(z.root().focus().same(&root));
        prop_assert!(z.root().root().focus().same(&root));
    }

    #[test]
    fn prop_iterators(
        root in tree_strategy(),
        pick in any::<Index>(),
        prune_kind in kind_strategy(),
    ) {
        let labels = Labels::new(&root);
        let label = pick.index(labels.len());
        let prune = move |v: &Value| v.kind().map_or(false, |k| &**k == prune_kind);
        let never = |_: &Value| false;

        // both a fresh zipper on the subtree and a position inside the whole tree
        let starts = [
            Zipper::new(labels.value(label).clone()),
            Zipper::new(root.clone()).follow(&labels.route(label)).unwrap(),
        ];
        for start in starts {
            check_labels(&labels, start.children(), &labels.entries[label].children)?;
            check_labels(&labels, start.preorder_descendants(), &labels.preorder(label, &never))?;
            check_labels(&labels, start.postorder_descendants(), &labels.postorder(label, &never))?;
            let pre = labels.preorder(label, &prune);
            let post = labels.postorder(label, &prune);
            check_labels(&labels, start.preorder_descendants_pruned(prune), &pre)?;
            check_labels(&labels, start.postorder_descendants_pruned(prune), &post)?;
            check_labels(&labels, start.descendants(Order::ChildFirst, prune), &post)?;

            // nothing below a pruned value is ever yielded
            for pos in start.preorder_descendants_pruned(prune) {
                let between = std::iter::successors(pos.up(), |z| z.up())
                    .take(pos.depth() - start.depth());
                for ancestor in between {
                    prop_assert!(!prune(ancestor.focus()));
                }
            }

            // restartable
            check_labels(&labels, start.preorder_descendants(), &labels.preorder(label, &never))?;
        }
    }

    #[test]
    fn prop_legacy_apis(root in tree_strategy(), pick in any::<Index>()) {
        let labels = Labels::new(&root);
        let label = pick.index(labels.len());
        let z = Zipper::new(root.clone()).follow(&labels.route(label)).unwrap();

        check_option(&labels, z.up(), labels.entries[label].parent)?;
        check_option(&labels, z.parent(), labels.entries[label].parent)?;
        check_option(&labels, z.node_parent(), labels.node_parent(label))?;

        let edges = labels.edges(label);
        let target = |mv: Move| edges.iter().find(|(_, m)| *m == mv).map(|(l, _)| *l);
        check_option(&labels, z.right(), target(Move::Right))?;
        check_option(&labels, z.next_sibling(), target(Move::Right))?;
        check_option(&labels, z.left(), target(Move::Left))?;
        check_option(&labels, z.previous_sibling(), target(Move::Left))?;
        check_option(&labels, z.last_child(), labels.entries[label].children.last().copied())?;
        let last = labels.entries[label].children.last().copied();
        check_option(&labels, z.down().map(|c| c.rightmost()), last)?;
    }

    #[test]
    fn prop_common_ancestor(
        root1 in tree_strategy(),
        root2 in tree_strategy(),
        picks in prop::array::uniform4(any::<Index>()),
    ) {
        let labels1 = Labels::new(&root1);
        let labels2 = Labels::new(&root2);
        let l11 = picks[0].index(labels1.len());
        let l12 = picks[1].index(labels1.len());
        let l21 = picks[2].index(labels2.len());
        let l22 = picks[3].index(labels2.len());
        let z1 = Zipper::new(root1.clone());
        let z2 = Zipper::new(root2.clone());
        let n11 = z1.follow(&labels1.route(l11)).unwrap();
        let n12 = z1.follow(&labels1.route(l12)).unwrap();
        let n21 = z2.follow(&labels2.route(l21)).unwrap();
        let n22 = z2.follow(&labels2.route(l22)).unwrap();

        check_option(&labels1, n11.common_ancestor(&n12), labels1.common_ancestor(l11, l12))?;
        check_option(&labels2, n21.common_ancestor(&n22), labels2.common_ancestor(l21, l22))?;
        prop_assert!(n11.common_ancestor(&n22).is_none());
        prop_assert!(n12.common_ancestor(&n21).is_none());
        prop_assert!(common_ancestor(&n22, &n11).is_none());
    }

    #[test]
    fn prop_edit_rebuilds_only_the_edited_chain(
        root in tree_strategy(),
        pick in any::<Index>(),
        kind in kind_strategy(),
    ) {
        let labels = Labels::new(&root);
        let label = pick.index(labels.len());
        let before = root.to_string();
        let replacement = Value::leaf(kind);

        let z = Zipper::new(root.clone()).follow(&labels.route(label)).unwrap();
        let new_root = z.replace(replacement.clone()).root_value();

        // walk old and new trees side by side down the edited chain
        let chain = labels.chain(label);
        let mut new = new_root.clone();
        for (depth, &l) in chain.iter().enumerate() {
            if l == label {
                prop_assert!(new.same(&replacement));
                break;
            }
            prop_assert!(!new.same(labels.value(l)), "ancestor at depth {} was not rebuilt", depth);
            prop_assert_eq!(new.kind(), labels.value(l).kind());
            prop_assert_eq!(new.name(), labels.value(l).name());
            prop_assert_eq!(new.is_seq(), labels.value(l).is_seq());
            let next = chain[depth + 1];
            let old_children = &labels.entries[l].children;
            let new_children = new.children();
            prop_assert_eq!(new_children.len(), old_children.len());
            for (child, &old) in new_children.iter().zip(old_children) {
                if old != next {
                    prop_assert!(child.same(labels.value(old)), "untouched sibling was copied");
                }
            }
            let index = labels.index_in_parent(next).unwrap();
            new = new_children[index].clone();
        }

        // the original tree is untouched
        prop_assert_eq!(root.to_string(), before);
        // and printing the new tree shows the replacement in place
        let relabelled = Labels::new(&new_root);
        prop_assert_eq!(relabelled.len(), labels.len() - labels.value(label).size() + 1);
    }
}
