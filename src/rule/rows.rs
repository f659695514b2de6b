use crate::board::Board;
use crate::color::Color;
use crate::coords::{Coord, Direction, DIRECTIONS};
use crate::game::Move;

/// A maximal shape of 2-4 same-color cells along one direction, with at most one internal
/// blank separating two sub-runs. Ephemeral: built fresh per classification query, never
/// stored on `Board`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    pub cells: Vec<Coord>,
    pub inner_blank: Option<Coord>,
    pub direction: Direction,
    pub color: Color,
}

impl Row {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn front_blank(&self, n: usize) -> Option<Coord> {
        self.cells.first().and_then(|c| c.front_of(self.direction, n))
    }

    pub fn rear_blank(&self, n: usize) -> Option<Coord> {
        self.cells.last().and_then(|c| c.rear_of(self.direction, n))
    }

    /// A canonical identity for dedup purposes: rows are equal if they cover the same span
    /// in the same direction (the cell list and gap follow from that).
    pub fn span_key(&self) -> (usize, Coord, Coord) {
        let dir_index = DIRECTIONS.iter().position(|d| *d == self.direction).unwrap();
        (dir_index, self.cells[0], *self.cells.last().unwrap())
    }
}

/// Walks outward from `origin` along `d` in the given `sign` (+1 or -1), returning the
/// contiguous run of `color` cells immediately adjacent to `origin` (the "inner" run on this
/// side), the coordinate of the first blank encountered beyond it (if any, and in bounds), and
/// the further run of `color` cells beyond that single blank (the "outer" run). Stops the outer
/// walk at a second blank, an opponent stone, or the board edge, per the row extractor contract.
fn walk_side(
    board: &Board, origin: Coord, d: Direction, sign: isize, color: Color,
) -> (Vec<Coord>, Option<Coord>, Vec<Coord>) {
    let n = board.n();
    let mut inner = Vec::new();
    let mut k = 1isize;
    loop {
        match origin.step(d, sign * k, n) {
            Some(c) if board.get(c) == color => {
                inner.push(c);
                k += 1;
            }
            _ => break,
        }
    }

    let gap = origin.step(d, sign * k, n).filter(|&c| board.get(c) == Color::Empty);
    let Some(gap) = gap else {
        return (inner, None, Vec::new());
    };

    let mut outer = Vec::new();
    k += 1;
    loop {
        match origin.step(d, sign * k, n) {
            Some(c) if board.get(c) == color => {
                outer.push(c);
                k += 1;
            }
            _ => break,
        }
    }

    (inner, Some(gap), outer)
}

/// Enumerates every Row of length 2-4 that the stone at `mv.coord` (already placed on `board`
/// with `mv.color`) participates in, across all four directions.
pub fn rows_through(board: &Board, mv: Move) -> Vec<Row> {
    let mut rows = Vec::new();
    for &d in DIRECTIONS.iter() {
        let (back_inner, back_gap, back_outer) = walk_side(board, mv.coord, d, -1, mv.color);
        let (front_inner, front_gap, front_outer) = walk_side(board, mv.coord, d, 1, mv.color);

        // The pure run crossing the stone: back_inner (reversed, furthest-first) ++ center ++ front_inner.
        let mut pure: Vec<Coord> = back_inner.iter().rev().copied().collect();
        pure.push(mv.coord);
        pure.extend(front_inner.iter().copied());

        if (2..=4).contains(&pure.len()) {
            rows.push(Row { cells: pure.clone(), inner_blank: None, direction: d, color: mv.color });
        }

        if let Some(gap) = back_gap {
            if !back_outer.is_empty() {
                let total = back_outer.len() + pure.len();
                if (2..=4).contains(&total) {
                    let mut cells: Vec<Coord> = back_outer.iter().rev().copied().collect();
                    cells.extend(pure.iter().copied());
                    rows.push(Row { cells, inner_blank: Some(gap), direction: d, color: mv.color });
                }
            }
        }

        if let Some(gap) = front_gap {
            if !front_outer.is_empty() {
                let total = pure.len() + front_outer.len();
                if (2..=4).contains(&total) {
                    let mut cells = pure.clone();
                    cells.extend(front_outer.iter().copied());
                    rows.push(Row { cells, inner_blank: Some(gap), direction: d, color: mv.color });
                }
            }
        }
    }
    rows
}
