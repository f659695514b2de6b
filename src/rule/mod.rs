pub mod rows;

use std::collections::HashMap;

use crate::board::{Board, CellGuard};
use crate::color::Color;
use crate::coords::DIRECTIONS;
use crate::game::Move;
use rows::Row;

/// Shared context for the mutually-recursive legality test and threat predicates (see the
/// cyclic-import design note: these live as free functions over `(board, row, color)` sharing
/// one `Rule`, not as methods split across distinct types).
#[derive(Clone, Debug)]
pub struct Rule {
    /// Whether a White run of six-or-more counts as a win (the default) or, as in "Pro Renju",
    /// is left unscored like any other non-winning overline.
    pub overline_wins_for_white: bool,
    memo: HashMap<(u64, Move), bool>,
}

impl Default for Rule {
    fn default() -> Rule {
        Rule { overline_wins_for_white: true, memo: HashMap::new() }
    }
}

impl Rule {
    pub fn new() -> Rule {
        Rule::default()
    }

    /// Clears the legality memo. Must be called between games (or the cache must be keyed on a
    /// unique game id) since the cache is otherwise unbounded over a session.
    pub fn clear_cache(&mut self) {
        self.memo.clear();
    }

    /// The diagnostic form used to explain *why* a move is illegal; bypasses the memo, since the
    /// memo must never cache exception-bearing calls.
    pub fn assert_legal(&mut self, board: &mut Board, mv: Move) -> Result<(), String> {
        if !board.in_bounds(mv.coord) {
            return Err(crate::error::off_board_reason(mv.coord));
        }
        if board.get(mv.coord) != Color::Empty {
            return Err("a stone already occupies this cell".to_string());
        }
        if mv.color == Color::White {
            return Ok(());
        }

        let _guard = CellGuard::place(board, mv.coord, Color::Black);
        let board = _guard.board();

        for &d in DIRECTIONS.iter() {
            if board.count_succession(mv, d) >= 6 {
                return Err("creates an overline (six or more in a row)".to_string());
            }
        }

        let all_rows = rows::rows_through(board, mv);
        let four_count =
            all_rows.iter().filter(|r| r.len() == 4).filter(|r| is_four(board, r, self)).count();
        if four_count >= 2 {
            return Err("creates a double four".to_string());
        }

        let open_three_count = all_rows
            .iter()
            .filter(|r| r.len() == 3)
            .filter(|r| is_open_three(board, r, self) && !is_explicitly_closed_three(board, r))
            .count();
        if open_three_count >= 2 {
            return Err("creates a double open three".to_string());
        }

        Ok(())
    }

    /// `is_legal_move`: true iff the cell is empty and in bounds, and (for Black) the placement
    /// creates no overline, double four, or double open three.
    pub fn is_legal_move(&mut self, board: &mut Board, mv: Move) -> bool {
        if !board.in_bounds(mv.coord) || board.get(mv.coord) != Color::Empty {
            return false;
        }
        if mv.color == Color::White {
            return true;
        }

        let key = (board.zobrist(), mv);
        if let Some(&cached) = self.memo.get(&key) {
            return cached;
        }

        let legal = self.assert_legal(board, mv).is_ok();
        self.memo.insert(key, legal);
        legal
    }

    /// `is_win`: exactly five for Black; five-or-more for White (gated by
    /// `overline_wins_for_white`).
    pub fn is_win(&self, board: &Board, mv: Move) -> bool {
        for &d in DIRECTIONS.iter() {
            let succ = board.count_succession(mv, d);
            match mv.color {
                Color::Black => {
                    if succ == 5 {
                        return true;
                    }
                }
                Color::White => {
                    if succ == 5 || (succ >= 6 && self.overline_wins_for_white) {
                        return true;
                    }
                }
                Color::Empty => {}
            }
        }
        false
    }
}

fn legal_at(board: &mut Board, coord: Option<crate::coords::Coord>, color: Color, rule: &mut Rule) -> bool {
    match coord {
        Some(c) => rule.is_legal_move(board, Move { coord: c, color }),
        None => false,
    }
}

/// True iff some empty extension cell, filled with `color`, would complete a five.
pub fn is_four(board: &Board, row: &Row, rule: &mut Rule) -> bool {
    let n = board.n();
    let color = row.color;
    let mut board = board.clone();
    match row.inner_blank {
        Some(g) => legal_at(&mut board, Some(g), color, rule),
        None => {
            let fb = row.front_blank(n);
            let rb = row.rear_blank(n);
            legal_at(&mut board, fb, color, rule) || legal_at(&mut board, rb, color, rule)
        }
    }
}

/// True only for a pure (gapless) run whose both endpoints are legal placements.
pub fn is_open_four(board: &Board, row: &Row, rule: &mut Rule) -> bool {
    if row.inner_blank.is_some() {
        return false;
    }
    let n = board.n();
    let mut board = board.clone();
    let color = row.color;
    legal_at(&mut board, row.front_blank(n), color, rule)
        && legal_at(&mut board, row.rear_blank(n), color, rule)
}

/// True iff some empty extension produces an open four.
pub fn is_open_three(board: &Board, row: &Row, rule: &mut Rule) -> bool {
    open_three_like(board, row, rule, true)
}

/// Like `is_open_three`, but only one of the two endpoint legalities is required.
pub fn is_half_open_three(board: &Board, row: &Row, rule: &mut Rule) -> bool {
    open_three_like(board, row, rule, false)
}

fn open_three_like(board: &Board, row: &Row, rule: &mut Rule, require_both: bool) -> bool {
    let n = board.n();
    let color = row.color;

    if let Some(gap) = row.inner_blank {
        let mut board = board.clone();
        let _guard = CellGuard::place(&mut board, gap, color);
        let fb_legal = legal_at_ref(_guard.board(), row.front_blank(n), color, rule);
        let rb_legal = legal_at_ref(_guard.board(), row.rear_blank(n), color, rule);
        return if require_both { fb_legal && rb_legal } else { fb_legal || rb_legal };
    }

    let fb = row.front_blank(n);
    let rb = row.rear_blank(n);

    let mut try_extension = |extend_at: Option<crate::coords::Coord>, beyond: Option<crate::coords::Coord>, opposite: Option<crate::coords::Coord>| -> bool {
        let Some(extend_at) = extend_at else { return false };
        let mut board = board.clone();
        let _guard = CellGuard::place(&mut board, extend_at, color);
        let beyond_legal = legal_at_ref(_guard.board(), beyond, color, rule);
        let opposite_legal = legal_at_ref(_guard.board(), opposite, color, rule);
        if require_both {
            beyond_legal && opposite_legal
        } else {
            beyond_legal || opposite_legal
        }
    };

    let beyond_front = fb.and_then(|c| c.front_of(row.direction, n));
    let beyond_rear = rb.and_then(|c| c.rear_of(row.direction, n));

    try_extension(fb, beyond_front, rb) || try_extension(rb, beyond_rear, fb)
}

fn legal_at_ref(board: &Board, coord: Option<crate::coords::Coord>, color: Color, rule: &mut Rule) -> bool {
    let mut board = board.clone();
    legal_at(&mut board, coord, color, rule)
}

/// True when a length-3 row's extensions are blocked on both sides by the board edge, an
/// opponent stone, or a same-color stone on the second-step cell — cheaply ruling it out of
/// the double-three test.
pub fn is_explicitly_closed_three(board: &Board, row: &Row) -> bool {
    if row.len() != 3 {
        return false;
    }
    let n = board.n();
    let color = row.color;

    let invalid = |c: Option<crate::coords::Coord>| -> bool {
        match c {
            None => true,
            Some(c) => board.get(c) == color.opponent(),
        }
    };

    let fb = row.front_blank(n);
    let rb = row.rear_blank(n);

    let both_first_blanks_invalid = invalid(fb) && invalid(rb);

    let second_blank_blocked = {
        let front_second = fb.and_then(|c| c.front_of(row.direction, n));
        let rear_second = rb.and_then(|c| c.rear_of(row.direction, n));
        front_second.is_some_and(|c| board.get(c) == color) || rear_second.is_some_and(|c| board.get(c) == color)
    };

    let pure_run_blocked = row.inner_blank.is_none() && both_first_blanks_invalid;

    both_first_blanks_invalid || second_blank_blocked || pure_run_blocked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Coord;

    fn black_run(board: &mut Board, coords: &[(usize, usize)]) {
        for &(r, c) in coords {
            board.set(Coord::new(r, c), Color::Black);
        }
    }

    #[test]
    fn overline_is_illegal_for_black() {
        let mut board = Board::new(15);
        black_run(&mut board, &[(7, 3), (7, 4), (7, 5), (7, 6), (7, 8)]);
        let mut rule = Rule::new();
        let mv = Move { coord: Coord::new(7, 7), color: Color::Black };
        assert!(!rule.is_legal_move(&mut board, mv));
    }

    #[test]
    fn five_in_a_row_wins() {
        let mut board = Board::new(15);
        black_run(&mut board, &[(7, 3), (7, 4), (7, 5), (7, 6)]);
        board.set(Coord::new(7, 7), Color::Black);
        let mv = Move { coord: Coord::new(7, 7), color: Color::Black };
        let rule = Rule::new();
        assert!(rule.is_win(&board, mv));
    }

    #[test]
    fn open_three_implies_half_open_three() {
        let mut board = Board::new(15);
        black_run(&mut board, &[(7, 5), (7, 6)]);
        board.set(Coord::new(7, 7), Color::Black);
        let mut rule = Rule::new();
        let row = rows::rows_through(&board, Move { coord: Coord::new(7, 6), color: Color::Black })
            .into_iter()
            .find(|r| r.len() == 3)
            .unwrap();
        if is_open_three(&board, &row, &mut rule) {
            assert!(is_half_open_three(&board, &row, &mut rule));
        }
    }

    #[test]
    fn scratch_writes_leave_board_unchanged() {
        let mut board = Board::new(15);
        black_run(&mut board, &[(7, 4), (7, 5), (7, 6)]);
        let before = board.serialize();
        let before_hash = board.zobrist();
        let mut rule = Rule::new();
        let mv = Move { coord: Coord::new(7, 7), color: Color::Black };
        let _ = rule.is_legal_move(&mut board, mv);
        assert_eq!(board.serialize(), before);
        assert_eq!(board.zobrist(), before_hash);
    }

    #[test]
    fn double_four_is_illegal_for_black() {
        let mut board = Board::new(15);
        black_run(&mut board, &[(7, 4), (7, 5), (7, 6), (4, 4), (5, 5), (6, 6)]);
        let mut rule = Rule::new();
        let mv = Move { coord: Coord::new(7, 7), color: Color::Black };
        assert!(!rule.is_legal_move(&mut board, mv));
    }

    #[test]
    fn double_open_three_is_illegal_for_black() {
        let mut board = Board::new(15);
        black_run(&mut board, &[(7, 5), (7, 6), (5, 5), (6, 6)]);
        let mut rule = Rule::new();
        let mv = Move { coord: Coord::new(7, 7), color: Color::Black };
        assert!(!rule.is_legal_move(&mut board, mv));
    }

    #[test]
    fn a_closed_three_does_not_count_toward_the_double_open_three_rule() {
        let mut board = Board::new(15);
        black_run(&mut board, &[(7, 5), (7, 6), (5, 5), (6, 6)]);
        board.set(Coord::new(4, 4), Color::White);
        board.set(Coord::new(8, 8), Color::White);
        let mut rule = Rule::new();
        let mv = Move { coord: Coord::new(7, 7), color: Color::Black };
        assert!(rule.is_legal_move(&mut board, mv));
    }
}
