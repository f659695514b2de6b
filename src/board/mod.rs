mod zobrist;

use crate::color::Color;
use crate::coords::{Coord, Direction, DIRECTIONS};
use crate::game::Move;

/// The N x N grid of cells. Owned exclusively by `Game` during a match; `Rule` and the
/// evaluator/search borrow it, performing only scratch writes that are restored via `CellGuard`
/// before returning to their caller.
#[derive(Clone, Debug)]
pub struct Board {
    n: usize,
    cells: Vec<Color>,
    zobrist_hash: u64,
}

impl Board {
    pub fn new(n: usize) -> Board {
        Board { n, cells: vec![Color::Empty; n * n], zobrist_hash: 0 }
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn in_bounds(&self, c: Coord) -> bool {
        c.in_bounds(self.n)
    }

    fn index(&self, c: Coord) -> usize {
        c.row * self.n + c.col
    }

    pub fn get(&self, c: Coord) -> Color {
        debug_assert!(self.in_bounds(c));
        self.cells[self.index(c)]
    }

    /// Overwrites the cell at `c`, updating the incremental Zobrist hash.
    pub fn set(&mut self, c: Coord, color: Color) {
        debug_assert!(self.in_bounds(c));
        let idx = self.index(c);
        let prev = self.cells[idx];
        if prev == color {
            return;
        }
        self.zobrist_hash ^= zobrist::cell_key(self.n, c.row, c.col, prev);
        self.zobrist_hash ^= zobrist::cell_key(self.n, c.row, c.col, color);
        self.cells[idx] = color;
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| c.is_empty())
    }

    /// Iterates all in-bounds coordinates in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        let n = self.n;
        (0..n).flat_map(move |row| (0..n).map(move |col| Coord::new(row, col)))
    }

    pub fn coords_of(&self, color: Color) -> impl Iterator<Item = Coord> + '_ {
        self.coords().filter(move |&c| self.get(c) == color)
    }

    /// Length of the maximal run of `color` crossing `mv.coord` along `d`, including the move
    /// cell itself. The caller is responsible for having already placed (or pre-existing) the
    /// stone at `mv.coord`.
    pub fn count_succession(&self, mv: Move, d: Direction) -> usize {
        let mut count = 1;
        for sign in [-1isize, 1isize] {
            let mut k = 1isize;
            while let Some(c) = mv.coord.step(d, sign * k, self.n) {
                if self.get(c) == mv.color {
                    count += 1;
                    k += 1;
                } else {
                    break;
                }
            }
        }
        count
    }

    /// Chebyshev distance from `c` to the nearest non-empty cell, or `None` if the board is
    /// entirely empty.
    pub fn nearest_stone_distance(&self, c: Coord) -> Option<usize> {
        self.coords().filter(|&o| self.get(o) != Color::Empty).map(|o| c.chebyshev(&o)).min()
    }

    /// A deterministic row-major encoding of cell colors, used only to detect scratch-write
    /// corruption in debug builds (see ERROR HANDLING DESIGN).
    pub fn serialize(&self) -> Vec<u8> {
        self.cells.iter().map(|c| *c as i8 as u8).collect()
    }

    pub fn zobrist(&self) -> u64 {
        self.zobrist_hash
    }

    pub fn pretty(&self) -> String {
        (0..self.n)
            .map(|row| {
                (0..self.n)
                    .map(|col| self.get(Coord::new(row, col)).notate())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Restores a cell to its prior value on drop, so every scratch write made during
/// classification is undone on every exit path, including an early return or a panic
/// mid-recursion (see the scratch-write discipline invariant).
pub struct CellGuard<'b> {
    board: &'b mut Board,
    coord: Coord,
    prev: Color,
}

impl<'b> CellGuard<'b> {
    pub fn place(board: &'b mut Board, coord: Coord, color: Color) -> CellGuard<'b> {
        let prev = board.get(coord);
        board.set(coord, color);
        CellGuard { board, coord, prev }
    }

    pub fn board(&self) -> &Board {
        self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl<'b> Drop for CellGuard<'b> {
    fn drop(&mut self) {
        self.board.set(self.coord, self.prev);
    }
}
