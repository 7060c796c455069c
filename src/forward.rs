//! The recursive nine-child advance that powers [`Node::forward`](crate::node::Node::forward).

use crate::base;
use crate::node::Node;

/// Computes the level-`(level - 1)` center of `node` after `2^j` generations.
/// `level` and `j` have already been validated/clamped by `Node::forward`; this
/// function only implements the branch selection and stitching.
pub(crate) fn advance(node: &Node, level: u8, j: u8) -> Node {
    if node.population() < 3 {
        // A center with fewer than three live cells can never gain enough
        // neighbors to birth a new cell before it dies out entirely.
        return Node::zero(level - 1);
    }

    if level == 2 {
        return base::level2_center(node);
    }

    let nw = node.nw();
    let ne = node.ne();
    let sw = node.sw();
    let se = node.se();

    // Nine overlapping level-(level-1) windows on a 3x3 grid over `node`.
    // Each is advanced with the same `j`; a window's own `forward` clamps `j`
    // to its own maximum, which is exactly `j` again when `j` was already the
    // top node's maximum -- this is what lets the max-step branch below reuse
    // the very same `ci` values from the stitch branch's inputs.
    let c1 = Node::node(nw.nw(), nw.ne(), nw.sw(), nw.se()).forward(Some(j));
    let c2 = Node::node(nw.ne(), ne.nw(), nw.se(), ne.sw()).forward(Some(j));
    let c3 = Node::node(ne.nw(), ne.ne(), ne.sw(), ne.se()).forward(Some(j));
    let c4 = Node::node(nw.sw(), nw.se(), sw.nw(), sw.ne()).forward(Some(j));
    let c5 = Node::node(nw.se(), ne.sw(), sw.ne(), se.nw()).forward(Some(j));
    let c6 = Node::node(ne.sw(), ne.se(), se.nw(), se.ne()).forward(Some(j));
    let c7 = Node::node(sw.nw(), sw.ne(), sw.sw(), sw.se()).forward(Some(j));
    let c8 = Node::node(sw.ne(), se.nw(), sw.se(), se.sw()).forward(Some(j));
    let c9 = Node::node(se.nw(), se.ne(), se.sw(), se.se()).forward(Some(j));

    let max_step = level - 2;
    if j < max_step {
        Node::node(
            Node::node(c1.se(), c2.sw(), c4.ne(), c5.nw()),
            Node::node(c2.se(), c3.sw(), c5.ne(), c6.nw()),
            Node::node(c4.se(), c5.sw(), c7.ne(), c8.nw()),
            Node::node(c5.se(), c6.sw(), c8.ne(), c9.nw()),
        )
    } else {
        Node::node(
            Node::node(c1, c2.clone(), c4.clone(), c5.clone()).forward(Some(j)),
            Node::node(c2, c3, c5.clone(), c6.clone()).forward(Some(j)),
            Node::node(c4, c5.clone(), c7, c8.clone()).forward(Some(j)),
            Node::node(c5, c6, c8, c9).forward(Some(j)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glider_level3() -> Node {
        // Standard 5-cell glider, placed inside a level-3 (8x8) field with
        // enough dead margin that one generation cannot touch the border.
        //
        //  . # .
        //  . . #
        //  # # #
        let mut cells = vec![false; 8 * 8];
        let set = |cells: &mut Vec<bool>, x: usize, y: usize| cells[y * 8 + x] = true;
        set(&mut cells, 2, 1);
        set(&mut cells, 3, 2);
        set(&mut cells, 1, 3);
        set(&mut cells, 2, 3);
        set(&mut cells, 3, 3);
        crate::universe::HashLifeUniverse::new(8, 8, &cells)
            .root()
            .clone()
    }

    #[test]
    fn forward_defaults_to_max_step() {
        let node = glider_level3();
        let a = node.forward(None);
        let b = node.forward(Some(node.level() - 2));
        assert_eq!(a, b);
    }

    #[test]
    fn forward_is_memoized() {
        let node = glider_level3();
        let a = node.forward(Some(0));
        let b = node.forward(Some(0));
        assert_eq!(a, b);
    }

    #[test]
    fn population_never_grows_past_bound() {
        let node = glider_level3();
        let advanced = node.forward(Some(0));
        assert!(advanced.population() <= node.population());
    }
}
