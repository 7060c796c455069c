use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use crate::node::{Node, NodeData, NodeKind};

/// Key used to look up a canonical inner node. Children are identified by
/// pointer, not by structural content: two `Node`s only ever share an
/// allocation if the interner already made them canonical, so pointer
/// identity of already-canonical children is exactly the structural key.
#[derive(PartialEq, Eq, Hash)]
enum Key {
    Cell(bool),
    Inner {
        level: u8,
        nw: usize,
        ne: usize,
        sw: usize,
        se: usize,
    },
}

impl Key {
    fn inner(nw: &Node, ne: &Node, sw: &Node, se: &Node) -> Key {
        Key::Inner {
            level: nw.level() + 1,
            nw: Rc::as_ptr(&nw.0) as usize,
            ne: Rc::as_ptr(&ne.0) as usize,
            sw: Rc::as_ptr(&sw.0) as usize,
            se: Rc::as_ptr(&se.0) as usize,
        }
    }
}

#[derive(Default)]
struct Interner {
    table: HashMap<Key, Weak<NodeData>>,
}

impl Interner {
    fn make_cell(&mut self, alive: bool) -> Node {
        let key = Key::Cell(alive);
        if let Some(node) = self.table.get(&key).and_then(Weak::upgrade) {
            return Node(node);
        }
        let data = Rc::new(NodeData {
            level: 0,
            population: alive as u64,
            kind: NodeKind::Cell(alive),
            memo: RefCell::new(HashMap::new()),
        });
        self.table.insert(key, Rc::downgrade(&data));
        Node(data)
    }

    fn make_node(&mut self, nw: Node, ne: Node, sw: Node, se: Node) -> Node {
        assert!(
            nw.level() == ne.level() && nw.level() == sw.level() && nw.level() == se.level(),
            "make_node: mismatched child levels ({}, {}, {}, {})",
            nw.level(),
            ne.level(),
            sw.level(),
            se.level(),
        );

        let key = Key::inner(&nw, &ne, &sw, &se);
        if let Some(node) = self.table.get(&key).and_then(Weak::upgrade) {
            return Node(node);
        }

        let level = nw.level() + 1;
        let population = nw.population() + ne.population() + sw.population() + se.population();
        let data = Rc::new(NodeData {
            level,
            population,
            kind: NodeKind::Inner { nw, ne, sw, se },
            memo: RefCell::new(HashMap::new()),
        });
        self.table.insert(key, Rc::downgrade(&data));
        Node(data)
    }
}

thread_local! {
    static INTERNER: RefCell<Interner> = RefCell::new(Interner::default());
}

pub(crate) fn make_cell(alive: bool) -> Node {
    INTERNER.with(|interner| interner.borrow_mut().make_cell(alive))
}

pub(crate) fn make_node(nw: Node, ne: Node, sw: Node, se: Node) -> Node {
    INTERNER.with(|interner| interner.borrow_mut().make_node(nw, ne, sw, se))
}

/// The canonical all-dead node of `level`, built by repeatedly quadrupling a
/// dead cell. Each intermediate level is itself canonicalized, so this is
/// O(level) the first time a given level is requested and O(1) amortized
/// after that (the interner already holds every level up to the deepest one
/// built so far).
pub(crate) fn zero(level: u8) -> Node {
    let mut node = make_cell(false);
    for _ in 0..level {
        node = make_node(node.clone(), node.clone(), node.clone(), node);
    }
    node
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_are_canonical() {
        assert_eq!(Node::cell(true), Node::cell(true));
        assert_eq!(Node::cell(false), Node::cell(false));
        assert_ne!(Node::cell(true), Node::cell(false));
    }

    #[test]
    fn nodes_are_canonical() {
        let a = Node::cell(true);
        let b = Node::cell(false);
        let n1 = Node::node(a.clone(), b.clone(), b.clone(), a.clone());
        let n2 = Node::node(a.clone(), b.clone(), b.clone(), a.clone());
        assert_eq!(n1, n2);
    }

    #[test]
    fn distinct_structure_is_distinct() {
        let a = Node::cell(true);
        let b = Node::cell(false);
        let n1 = Node::node(a.clone(), b.clone(), b.clone(), a.clone());
        let n2 = Node::node(b.clone(), a.clone(), a.clone(), b.clone());
        assert_ne!(n1, n2);
    }

    #[test]
    fn zero_is_dead_and_recursively_canonical() {
        let z2 = Node::zero(2);
        assert_eq!(z2.population(), 0);
        assert_eq!(z2.level(), 2);
        let rebuilt = Node::node(Node::zero(1), Node::zero(1), Node::zero(1), Node::zero(1));
        assert_eq!(z2, rebuilt);
    }

    #[test]
    #[should_panic(expected = "mismatched child levels")]
    fn make_node_rejects_mismatched_levels() {
        let cell = Node::cell(false);
        let inner = Node::node(cell.clone(), cell.clone(), cell.clone(), cell.clone());
        Node::node(cell, inner.clone(), inner.clone(), inner);
    }
}
