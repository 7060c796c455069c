//! A dense, cell-by-cell B3/S23 simulator. Used as an oracle to check the
//! HashLife engine against in tests: no quad-tree, no memoization, no
//! wraparound at the edges.

use tracing::trace;

/// An `n x m` grid of cells, row-major, indexed `[row][col]`.
pub struct NaiveUniverse {
    n: usize,
    m: usize,
    cells: Vec<Vec<bool>>,
}

impl NaiveUniverse {
    pub fn new(n: usize, m: usize, cells: Vec<bool>) -> NaiveUniverse {
        assert_eq!(cells.len(), n * m, "cells must have exactly n * m entries");
        let rows = cells.chunks(m).map(|row| row.to_vec()).collect();
        NaiveUniverse { n, m, cells: rows }
    }

    pub fn get(&self, i: i64, j: i64) -> bool {
        if i < 0 || j < 0 || i as usize >= self.n || j as usize >= self.m {
            return false;
        }
        self.cells[i as usize][j as usize]
    }

    /// Advances by exactly one generation, with no wraparound: cells off the
    /// grid's edge count as dead neighbors.
    pub fn round(&mut self) {
        let mut next = self.cells.clone();
        for i in 0..self.n {
            for j in 0..self.m {
                let mut count = 0u8;
                for (di, dj) in NEIGHBOR_OFFSETS {
                    let ni = i as i64 + di;
                    let nj = j as i64 + dj;
                    if ni >= 0 && nj >= 0 && (ni as usize) < self.n && (nj as usize) < self.m {
                        count += self.cells[ni as usize][nj as usize] as u8;
                    }
                }
                next[i][j] = count == 3 || (count == 2 && self.cells[i][j]);
            }
        }
        trace!(n = self.n, m = self.m, "naive universe advanced one round");
        self.cells = next;
    }

    pub fn rounds(&mut self, n: u64) {
        for _ in 0..n {
            self.round();
        }
    }
}

const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_is_still_life() {
        let cells = vec![true, true, true, true];
        let mut universe = NaiveUniverse::new(2, 2, cells);
        universe.round();
        assert!(universe.get(0, 0));
        assert!(universe.get(0, 1));
        assert!(universe.get(1, 0));
        assert!(universe.get(1, 1));
    }

    #[test]
    fn blinker_oscillates_with_period_two() {
        #[rustfmt::skip]
        let cells = vec![
            false, false, false, false, false,
            false, false, true, false, false,
            false, false, true, false, false,
            false, false, true, false, false,
            false, false, false, false, false,
        ];
        let mut universe = NaiveUniverse::new(5, 5, cells);
        universe.round();
        assert!(universe.get(2, 1));
        assert!(universe.get(2, 2));
        assert!(universe.get(2, 3));
        assert!(!universe.get(1, 2));
        assert!(!universe.get(3, 2));

        universe.round();
        assert!(universe.get(1, 2));
        assert!(universe.get(2, 2));
        assert!(universe.get(3, 2));
        assert!(!universe.get(2, 1));
        assert!(!universe.get(2, 3));
    }

    #[test]
    fn out_of_bounds_reads_are_dead() {
        let universe = NaiveUniverse::new(2, 2, vec![true, true, true, true]);
        assert!(!universe.get(-1, 0));
        assert!(!universe.get(0, 2));
        assert!(!universe.get(100, 100));
    }
}
