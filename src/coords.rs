/// A cell coordinate on an N x N board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub fn new(row: usize, col: usize) -> Coord {
        Coord { row, col }
    }

    pub fn in_bounds(&self, n: usize) -> bool {
        self.row < n && self.col < n
    }

    /// Chebyshev distance, `max(|di|, |dj|)`.
    pub fn chebyshev(&self, other: &Coord) -> usize {
        self.row.abs_diff(other.row).max(self.col.abs_diff(other.col))
    }
}

/// One of the four axis directions a Row can run along. `dr`/`dc` each in {-1,0,1}, not both 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Direction {
    pub dr: isize,
    pub dc: isize,
}

impl Direction {
    const fn new(dr: isize, dc: isize) -> Direction {
        Direction { dr, dc }
    }
}

/// The four axes a five-in-a-row can be built along: horizontal, vertical, and both diagonals.
pub static DIRECTIONS: [Direction; 4] = [
    Direction::new(1, 0),
    Direction::new(0, 1),
    Direction::new(1, 1),
    Direction::new(1, -1),
];

impl Coord {
    /// Steps `k` cells along `d` from this coordinate, bounds-checked against an N x N board.
    /// `k` may be negative to step against the direction.
    pub fn step(&self, d: Direction, k: isize, n: usize) -> Option<Coord> {
        let r = self.row as isize + d.dr * k;
        let c = self.col as isize + d.dc * k;
        if r >= 0 && c >= 0 && (r as usize) < n && (c as usize) < n {
            Some(Coord { row: r as usize, col: c as usize })
        } else {
            None
        }
    }

    /// `front_of(p) = p - d`.
    pub fn front_of(&self, d: Direction, n: usize) -> Option<Coord> {
        self.step(d, -1, n)
    }

    /// `rear_of(p) = p + d`.
    pub fn rear_of(&self, d: Direction, n: usize) -> Option<Coord> {
        self.step(d, 1, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_clips_at_board_edge() {
        let c = Coord::new(0, 0);
        assert_eq!(c.front_of(DIRECTIONS[0], 15), None);
        assert_eq!(c.rear_of(DIRECTIONS[0], 15), Some(Coord::new(1, 0)));
    }

    #[test]
    fn chebyshev_matches_max_axis_delta() {
        assert_eq!(Coord::new(2, 2).chebyshev(&Coord::new(5, 3)), 3);
    }
}
