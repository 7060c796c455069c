//! Level-2 -> level-1 base case: the leaf of the `forward` recursion.
//!
//! A level-2 node is a 4x4 block of cells. Its center, one generation later,
//! is a 2x2 block. We encode the 16 cells into a `u16` bitmask and evaluate
//! B3/S23 on each of the four center cells directly from the mask, rather
//! than walking the tree cell by cell.

use crate::node::Node;

/// Bit position (from the high end) of each of the sixteen level-0 cells in a
/// level-2 node, in the order the specification fixes:
/// `nw.nw, nw.ne, ne.nw, ne.ne, nw.sw, nw.se, ne.sw, ne.se,
///  sw.nw, sw.ne, se.nw, se.ne, sw.sw, sw.se, se.sw, se.se`.
const NW_NEIGHBORS: u16 = 0xEAE0;
const NE_NEIGHBORS: u16 = 0x7570;
const SW_NEIGHBORS: u16 = 0x0EAE;
const SE_NEIGHBORS: u16 = 0x0757;

const NW_SELF: u16 = 0x0400;
const NE_SELF: u16 = 0x0200;
const SW_SELF: u16 = 0x0040;
const SE_SELF: u16 = 0x0020;

fn bit(node: &Node) -> u16 {
    node.population() as u16
}

fn encode(node: &Node) -> u16 {
    let nw = node.nw();
    let ne = node.ne();
    let sw = node.sw();
    let se = node.se();

    (bit(&nw.nw()) << 15)
        | (bit(&nw.ne()) << 14)
        | (bit(&ne.nw()) << 13)
        | (bit(&ne.ne()) << 12)
        | (bit(&nw.sw()) << 11)
        | (bit(&nw.se()) << 10)
        | (bit(&ne.sw()) << 9)
        | (bit(&ne.se()) << 8)
        | (bit(&sw.nw()) << 7)
        | (bit(&sw.ne()) << 6)
        | (bit(&se.nw()) << 5)
        | (bit(&se.ne()) << 4)
        | (bit(&sw.sw()) << 3)
        | (bit(&sw.se()) << 2)
        | (bit(&se.sw()) << 1)
        | bit(&se.se())
}

fn next_cell(word: u16, neighbor_mask: u16, self_mask: u16) -> bool {
    let count = (word & neighbor_mask).count_ones();
    count == 3 || (count == 2 && word & self_mask != 0)
}

/// `node` must be a level-2 inner node.
pub(crate) fn level2_center(node: &Node) -> Node {
    debug_assert_eq!(node.level(), 2, "level2_center requires a level-2 node");

    let word = encode(node);
    let nw = Node::cell(next_cell(word, NW_NEIGHBORS, NW_SELF));
    let ne = Node::cell(next_cell(word, NE_NEIGHBORS, NE_SELF));
    let sw = Node::cell(next_cell(word, SW_NEIGHBORS, SW_SELF));
    let se = Node::cell(next_cell(word, SE_NEIGHBORS, SE_SELF));
    Node::node(nw, ne, sw, se)
}
