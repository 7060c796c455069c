use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::interner;

/// A canonical quad-tree node.
///
/// `Node` is a cheap handle (an `Rc` clone) onto a [`NodeData`] allocation. Two
/// `Node`s compare equal iff they point at the same allocation: the interner
/// guarantees that structurally identical nodes are always the same allocation,
/// so pointer identity and structural equality coincide.
#[derive(Clone)]
pub struct Node(pub(crate) Rc<NodeData>);

pub(crate) struct NodeData {
    pub(crate) level: u8,
    pub(crate) population: u64,
    pub(crate) kind: NodeKind,
    /// `forward` results, keyed by step exponent `j`. Lazy, owned by this node.
    pub(crate) memo: RefCell<HashMap<u8, Node>>,
}

pub(crate) enum NodeKind {
    Cell(bool),
    Inner {
        nw: Node,
        ne: Node,
        sw: Node,
        se: Node,
    },
}

impl Node {
    /// The canonical level-0 node for `alive`.
    pub fn cell(alive: bool) -> Node {
        interner::make_cell(alive)
    }

    /// The canonical inner node with the given quadrants.
    ///
    /// # Panics
    /// Panics if the four children do not share a level, which is always a
    /// bug in the caller's own tree construction, not a recoverable runtime error.
    pub fn node(nw: Node, ne: Node, sw: Node, se: Node) -> Node {
        interner::make_node(nw, ne, sw, se)
    }

    /// The canonical all-dead node of the given level.
    pub fn zero(level: u8) -> Node {
        interner::zero(level)
    }

    pub fn level(&self) -> u8 {
        self.0.level
    }

    pub fn population(&self) -> u64 {
        self.0.population
    }

    /// `true`/`false` for a cell, or `None` for an inner node.
    pub fn alive(&self) -> Option<bool> {
        match self.0.kind {
            NodeKind::Cell(alive) => Some(alive),
            NodeKind::Inner { .. } => None,
        }
    }

    pub fn is_cell(&self) -> bool {
        matches!(self.0.kind, NodeKind::Cell(_))
    }

    fn inner(&self) -> &NodeKind {
        &self.0.kind
    }

    pub fn nw(&self) -> Node {
        match self.inner() {
            NodeKind::Inner { nw, .. } => nw.clone(),
            NodeKind::Cell(_) => panic!("nw() called on a level-0 cell"),
        }
    }

    pub fn ne(&self) -> Node {
        match self.inner() {
            NodeKind::Inner { ne, .. } => ne.clone(),
            NodeKind::Cell(_) => panic!("ne() called on a level-0 cell"),
        }
    }

    pub fn sw(&self) -> Node {
        match self.inner() {
            NodeKind::Inner { sw, .. } => sw.clone(),
            NodeKind::Cell(_) => panic!("sw() called on a level-0 cell"),
        }
    }

    pub fn se(&self) -> Node {
        match self.inner() {
            NodeKind::Inner { se, .. } => se.clone(),
            NodeKind::Cell(_) => panic!("se() called on a level-0 cell"),
        }
    }

    /// A node one level higher whose center is `self` and whose outer ring is
    /// dead. Places a bare cell in the NE quadrant (see DESIGN.md Open Question 1);
    /// for inner nodes, each quadrant keeps the original quadrant at the
    /// geometric center of the result.
    pub fn extend(&self) -> Node {
        match self.inner() {
            NodeKind::Cell(_) => {
                let dead = Node::cell(false);
                Node::node(dead.clone(), self.clone(), dead.clone(), dead)
            }
            NodeKind::Inner { nw, ne, sw, se } => {
                let zero = Node::zero(self.level() - 1);
                let new_nw = Node::node(zero.clone(), zero.clone(), zero.clone(), nw.clone());
                let new_ne = Node::node(zero.clone(), zero.clone(), ne.clone(), zero.clone());
                let new_sw = Node::node(zero.clone(), sw.clone(), zero.clone(), zero.clone());
                let new_se = Node::node(se.clone(), zero.clone(), zero.clone(), zero);
                Node::node(new_nw, new_ne, new_sw, new_se)
            }
        }
    }

    /// The level-(level-1) center of `self` after `2^j` generations (or `2^(level-2)`
    /// if `j` is `None`; `j` is clamped into `[0, level - 2]` otherwise).
    ///
    /// # Panics
    /// Panics if `self.level() < 2`: advancing a node that small is undefined
    /// by construction, and callers (the universe driver) never reach it.
    pub fn forward(&self, j: Option<u8>) -> Node {
        let level = self.level();
        assert!(
            level >= 2,
            "forward() requires a node of level >= 2, got level {level}"
        );
        let max_step = level - 2;
        let j = j.map_or(max_step, |j| j.min(max_step));

        if let Some(cached) = self.0.memo.borrow().get(&j) {
            return cached.clone();
        }

        let result = crate::forward::advance(self, level, j);
        self.0.memo.borrow_mut().insert(j, result.clone());
        result
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Node) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Node {}

impl std::hash::Hash for Node {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        (Rc::as_ptr(&self.0) as usize).hash(state);
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0.kind {
            NodeKind::Cell(alive) => f.debug_tuple("Cell").field(alive).finish(),
            NodeKind::Inner { .. } => f
                .debug_struct("Node")
                .field("level", &self.0.level)
                .field("population", &self.0.population)
                .finish(),
        }
    }
}
