//! The HashLife universe driver: construction, point queries, and the
//! grow/step/shrink loop that lets `rounds(n)` advance by any `n >= 1` without
//! ever letting a live cell fall off the represented region.

use tracing::{debug, trace};

use crate::error::HashlifeError;
use crate::node::Node;

/// A HashLife-backed, effectively unbounded Game of Life universe.
pub struct HashLifeUniverse {
    root: Node,
    generation: u64,
}

impl HashLifeUniverse {
    /// Builds a universe from a dense, row-major `n x m` bitmap centered at
    /// the origin. Cells outside the bitmap (once padded to a power-of-two
    /// square) are dead.
    pub fn new(n: usize, m: usize, cells: &[bool]) -> HashLifeUniverse {
        assert_eq!(cells.len(), n * m, "cells must have exactly n * m entries");
        let level = level_for(n, m);

        let get = |i: i64, j: i64| -> bool {
            let ii = i + (n as i64) / 2;
            let jj = j + (m as i64) / 2;
            if ii < 0 || ii >= n as i64 || jj < 0 || jj >= m as i64 {
                return false;
            }
            cells[(ii as usize) * m + jj as usize]
        };

        let root = construct(0, 0, level, &get);
        debug!(level, n, m, "constructed HashLife universe from bitmap");
        HashLifeUniverse {
            root,
            generation: 0,
        }
    }

    /// Wraps an already-built canonical tree as a universe. Used by tests
    /// that construct trees directly via [`Node::node`]/[`Node::cell`].
    pub fn from_root(root: Node) -> HashLifeUniverse {
        HashLifeUniverse {
            root,
            generation: 0,
        }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Reads the cell at `(i, j)`. Coordinates outside the represented square
    /// report dead; this is not an error.
    pub fn get(&self, i: i64, j: i64) -> bool {
        let level = self.root.level();
        if level == 0 {
            return i == 0 && j == 0 && self.root.population() == 1;
        }

        let mut lim: i64 = 1 << (level - 1);
        if i < -lim || i >= lim || j < -lim || j >= lim {
            return false;
        }

        let mut node = self.root.clone();
        let (mut i, mut j) = (i, j);
        loop {
            if lim == 0 {
                return node.population() == 1;
            }
            node = match (i >= 0, j >= 0) {
                (false, true) => node.nw(),
                (true, true) => node.ne(),
                (false, false) => node.sw(),
                (true, false) => node.se(),
            };
            lim /= 2;
            i += lim * if i < 0 { 1 } else { -1 };
            j += lim * if j < 0 { 1 } else { -1 };
        }
    }

    /// Advances by exactly one generation.
    pub fn round(&mut self) {
        // `rounds` never fails for n == 1.
        self.rounds(1).expect("rounds(1) cannot fail");
    }

    /// Advances by `n >= 1` generations, decomposing `n` into its binary
    /// expansion and applying one `forward(j)` per set bit, extending and
    /// shrinking the root as needed so the represented region always has
    /// enough dead margin.
    pub fn rounds(&mut self, n: i64) -> Result<(), HashlifeError> {
        if n <= 0 {
            return Err(HashlifeError::NonPositiveRounds(n));
        }
        let original_n = n as u64;
        let mut remaining = original_n;
        let mut j: u8 = 0;

        while remaining > 0 {
            self.extend_to(std::cmp::max(j + 2, self.root.level() + 2));

            if remaining & 1 == 1 {
                trace!(j, level = self.root.level(), "applying forward(j)");
                self.root = self.root.forward(Some(j));
            }

            j += 1;
            remaining >>= 1;

            self.shrink();
        }

        self.generation += original_n;
        Ok(())
    }

    /// Repeatedly extends the root until it is at least `max(k, 2)` levels
    /// deep and its outer ring is entirely dead, so a `forward` call at step
    /// exponent up to `k - 2` cannot let a live cell escape the tree.
    fn extend_to(&mut self, k: u8) {
        let target = k.max(2);
        while self.root.level() < target || !self.outer_ring_empty() {
            self.root = self.root.extend();
            trace!(level = self.root.level(), "extended root");
        }
    }

    /// The outer ring is every grandchild of the root except the four
    /// center-facing ones (`nw.se`, `ne.sw`, `sw.ne`, `se.nw`).
    fn outer_ring_empty(&self) -> bool {
        let nw = self.root.nw();
        let ne = self.root.ne();
        let sw = self.root.sw();
        let se = self.root.se();

        nw.nw().population() == 0
            && nw.ne().population() == 0
            && nw.sw().population() == 0
            && ne.nw().population() == 0
            && ne.ne().population() == 0
            && ne.se().population() == 0
            && sw.nw().population() == 0
            && sw.sw().population() == 0
            && sw.se().population() == 0
            && se.ne().population() == 0
            && se.sw().population() == 0
            && se.se().population() == 0
    }

    /// While the root has redundant dead border, replace it with its own
    /// inner center. Population equality between the root and its center is
    /// an exact proxy for "outer ring is empty" (population is non-negative
    /// and the ring is disjoint from the center).
    fn shrink(&mut self) {
        while self.root.level() > 1 {
            let nw = self.root.nw();
            let ne = self.root.ne();
            let sw = self.root.sw();
            let se = self.root.se();
            let center = Node::node(nw.se(), ne.sw(), sw.ne(), se.nw());
            if center.population() != self.root.population() {
                break;
            }
            self.root = center;
            trace!(level = self.root.level(), "shrank root");
        }
    }
}

fn level_for(n: usize, m: usize) -> u8 {
    let max_dim = n.max(m).max(1);
    if max_dim <= 1 {
        0
    } else {
        (usize::BITS - (max_dim - 1).leading_zeros()) as u8
    }
}

/// Recursively builds a level-`level` node covering `get`'s bitmap, following
/// the reference implementation's offset scheme so quadrant boundaries line
/// up exactly with `get`'s coordinate convention.
fn construct(i: i64, j: i64, level: u8, get: &dyn Fn(i64, i64) -> bool) -> Node {
    if level == 0 {
        return Node::cell(get(i, j));
    }

    let noffset: i64 = if level < 2 { 1 } else { 1 << (level - 2) };
    let poffset: i64 = if level < 2 { 0 } else { 1 << (level - 2) };

    let nw = construct(i - noffset, j + poffset, level - 1, get);
    let sw = construct(i - noffset, j - noffset, level - 1, get);
    let ne = construct(i + poffset, j + poffset, level - 1, get);
    let se = construct(i + poffset, j - noffset, level - 1, get);

    Node::node(nw, ne, sw, se)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block() -> HashLifeUniverse {
        let cells = vec![true, true, true, true];
        HashLifeUniverse::new(2, 2, &cells)
    }

    #[test]
    fn block_is_still_life() {
        let mut universe = block();
        let before: Vec<bool> = (-2..2)
            .flat_map(|i| (-2..2).map(move |j| (i, j)))
            .map(|(i, j)| universe.get(i, j))
            .collect();
        universe.rounds(1).unwrap();
        let after: Vec<bool> = (-2..2)
            .flat_map(|i| (-2..2).map(move |j| (i, j)))
            .map(|(i, j)| universe.get(i, j))
            .collect();
        assert_eq!(before, after);
        assert_eq!(universe.generation(), 1);
    }

    #[test]
    fn block_survives_many_rounds() {
        let mut universe = block();
        universe.rounds(100).unwrap();
        assert_eq!(universe.generation(), 100);
        assert_eq!(universe.root().population(), 4);
    }

    #[test]
    fn empty_universe_stays_empty() {
        let cells = vec![false; 9];
        let mut universe = HashLifeUniverse::new(3, 3, &cells);
        universe.rounds(1_000_000).unwrap();
        assert_eq!(universe.root().population(), 0);
        for i in -3..3 {
            for j in -3..3 {
                assert!(!universe.get(i, j));
            }
        }
    }

    #[test]
    fn rounds_rejects_non_positive_n() {
        let mut universe = block();
        assert!(matches!(
            universe.rounds(0),
            Err(HashlifeError::NonPositiveRounds(0))
        ));
        assert!(matches!(
            universe.rounds(-5),
            Err(HashlifeError::NonPositiveRounds(-5))
        ));
        // Rejected calls must not have mutated the universe.
        assert_eq!(universe.generation(), 0);
    }

    #[test]
    fn additivity_of_stepping() {
        let cells = vec![false, true, false, false, false, true, true, true, true];
        let mut a = HashLifeUniverse::new(3, 3, &cells);
        let mut b = HashLifeUniverse::new(3, 3, &cells);

        a.rounds(3).unwrap();
        a.rounds(5).unwrap();

        b.rounds(8).unwrap();

        assert_eq!(a.generation(), b.generation());
        for i in -8..8 {
            for j in -8..8 {
                assert_eq!(a.get(i, j), b.get(i, j));
            }
        }
    }
}
