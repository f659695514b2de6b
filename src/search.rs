use std::collections::HashMap;

use crate::action::Action;
use crate::board::{Board, CellGuard};
use crate::color::Color;
use crate::coords::Coord;
use crate::evaluator::Evaluator;
use crate::game::{Game, Move};
use crate::rule::Rule;

/// Tunables threaded from the CLI/library entry point down into the search and evaluator.
/// One struct holding the knobs with a `Default` impl, parsed or overridden by the caller,
/// mirroring the `AgentConfig`/`LTPServerOptions` pairing.
#[derive(Clone, Debug)]
pub struct SearchConfig {
    pub n: usize,
    pub max_depth: usize,
    pub evaluator: Evaluator,
    pub candidate_cap: usize,
    pub overline_wins_for_white: bool,
}

impl Default for SearchConfig {
    fn default() -> SearchConfig {
        SearchConfig {
            n: 15,
            max_depth: 3,
            evaluator: Evaluator::default(),
            candidate_cap: 10,
            overline_wins_for_white: true,
        }
    }
}

/// The value compared throughout one search call: `max_depth` depth-flag slots (1 where a win
/// was found at that remaining-depth index, to prefer shallower wins) followed by the 6-slot
/// `EvaluatorScore`. Plain `Vec<i32>: Ord` gives the required lexicographic comparison.
pub type ScoreVec = Vec<i32>;

fn zero_prefix(max_depth: usize) -> Vec<i32> {
    vec![0; max_depth]
}

/// A vector with a 1 at depth-index `max_depth - depth` (so a win found with more depth
/// remaining — i.e. reached sooner — sorts ahead of one found deeper), and the maximal
/// 6-tuple appended, signed for Black's favor.
fn max_score_at(max_depth: usize, depth: usize) -> ScoreVec {
    let mut v = zero_prefix(max_depth);
    v[max_depth - depth] = 1;
    v.extend_from_slice(&[1, 1, 1, 1, 1, 1]);
    v
}

/// The mirror of `max_score_at` for White: a -1 depth flag and the minimal 6-tuple.
fn min_score_at(max_depth: usize, depth: usize) -> ScoreVec {
    let mut v = zero_prefix(max_depth);
    v[max_depth - depth] = -1;
    v.extend_from_slice(&[-1, -1, -1, -1, -1, -1]);
    v
}

/// True iff `score` is no better than the all-zero vector from `turn`'s point of view. The
/// vector itself is signed for Black's favor throughout (see `Evaluator::score`), so "losing"
/// means the first nonzero component is negative for Black but positive for White.
fn still_losing(score: &ScoreVec, turn: Color) -> bool {
    match score.iter().find(|&&x| x != 0) {
        Some(&x) => match turn {
            Color::Black => x < 0,
            Color::White => x > 0,
            Color::Empty => false,
        },
        None => true,
    }
}

/// Every empty cell within Chebyshev distance 2 of some non-empty cell, in stable row-major
/// enumeration order (the tie-break order per the redesigned "single total order").
fn candidate_cells(board: &Board) -> Vec<Coord> {
    board
        .coords()
        .filter(|&c| board.get(c) == Color::Empty)
        .filter(|&c| board.nearest_stone_distance(c).is_some_and(|d| d <= 2))
        .collect()
}

/// Depth-limited alpha-beta over legal moves restricted to cells near existing stones,
/// ordered by evaluator score with distance and insertion-order tie-breaks, pruned by the
/// standard cutoff plus a "candidate cap" that gives up exploring further alternatives once
/// 10 have been tried, unless still losing at the root.
#[allow(clippy::too_many_arguments)]
pub fn alphabeta(
    board: &mut Board, rule: &mut Rule, cfg: &SearchConfig, depth: usize, mut alpha: ScoreVec,
    mut beta: ScoreVec, turn: Color, last_move: Option<Move>, is_root: bool,
    memo: &mut HashMap<u64, (Option<Move>, ScoreVec)>,
) -> (Option<Move>, ScoreVec) {
    if let Some(lm) = last_move {
        if rule.is_win(board, lm) {
            let score = if lm.color == Color::Black {
                max_score_at(cfg.max_depth, depth)
            } else {
                min_score_at(cfg.max_depth, depth)
            };
            return (None, score);
        }
    }

    if depth == 0 {
        let lm = last_move.expect("search is never invoked at depth 0 on an empty board");
        let mut prefix = zero_prefix(cfg.max_depth);
        prefix.extend_from_slice(&cfg.evaluator.score(board, rule, lm));
        return (None, prefix);
    }

    let hash = board.zobrist();
    if let Some(cached) = memo.get(&hash) {
        return cached.clone();
    }

    let mut candidates = candidate_cells(board);
    candidates.sort_by_cached_key(|&c| {
        let mv = Move { coord: c, color: turn };
        let _guard = CellGuard::place(board, c, turn);
        let s = cfg.evaluator.score(board, rule, mv);
        let dist = board.nearest_stone_distance(c).unwrap_or(usize::MAX);
        let signed = if turn == Color::Black {
            s.iter().map(|&x| -x).collect::<Vec<_>>()
        } else {
            s.to_vec()
        };
        (signed, dist)
    });

    let mut best_move: Option<Move> = None;
    let mut best_score: Option<ScoreVec> = None;
    let mut explored = 0usize;

    for &c in &candidates {
        if explored >= cfg.candidate_cap {
            let keep_going = is_root
                && best_score.as_ref().map(|s| still_losing(s, turn)).unwrap_or(true);
            if !keep_going {
                break;
            }
        }
        explored += 1;

        let mv = Move { coord: c, color: turn };
        if !rule.is_legal_move(board, mv) {
            continue;
        }

        let child_score = {
            let mut guard = CellGuard::place(board, c, turn);
            let (_, child_score) = alphabeta(
                guard.board_mut(),
                rule,
                cfg,
                depth - 1,
                alpha.clone(),
                beta.clone(),
                turn.opponent(),
                Some(mv),
                false,
                memo,
            );
            child_score
        };

        let better = match (&best_score, turn) {
            (None, _) => true,
            (Some(best), Color::Black) => child_score > *best,
            (Some(best), Color::White) => child_score < *best,
            (Some(_), Color::Empty) => false,
        };
        if better {
            best_score = Some(child_score.clone());
            best_move = Some(mv);
        }

        match turn {
            Color::Black => {
                if child_score > alpha {
                    alpha = child_score.clone();
                }
            }
            Color::White => {
                if child_score < beta {
                    beta = child_score.clone();
                }
            }
            Color::Empty => {}
        }
        if beta <= alpha {
            break;
        }
    }

    let score = best_score.unwrap_or_else(|| {
        let mut prefix = zero_prefix(cfg.max_depth);
        prefix.extend_from_slice(&[0, 0, 0, 0, 0, 0]);
        prefix
    });
    memo.insert(hash, (best_move, score.clone()));
    (best_move, score)
}

/// Wraps `alphabeta` at `cfg.max_depth`, special-casing the empty board (center-cell opening
/// by convention) and an empty candidate set (no legal near-stone cells: `Action::Pass`).
pub fn choose_move(game: &Game, cfg: &SearchConfig) -> Action {
    let Some(turn) = game.next_turn() else {
        return Action::Pass;
    };

    if game.board().is_empty() {
        let center = game.board().n() / 2;
        return Action::Move(Move { coord: Coord::new(center, center), color: turn });
    }

    let mut board = game.board().clone();
    let mut rule = Rule::new();
    rule.overline_wins_for_white = cfg.overline_wins_for_white;

    if candidate_cells(&board).is_empty() {
        return Action::Pass;
    }

    let alpha = {
        let mut v = zero_prefix(cfg.max_depth);
        v.extend_from_slice(&[i32::MIN / 2; 6]);
        v
    };
    let beta = {
        let mut v = zero_prefix(cfg.max_depth);
        v.extend_from_slice(&[i32::MAX / 2; 6]);
        v
    };

    let mut memo = HashMap::new();
    let (best, _) =
        alphabeta(&mut board, &mut rule, cfg, cfg.max_depth, alpha, beta, turn, None, true, &mut memo);

    match best {
        Some(mv) => Action::Move(mv),
        None => Action::Pass,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn place(board: &mut Board, coords: &[(usize, usize)], color: Color) {
        for &(r, c) in coords {
            board.set(Coord::new(r, c), color);
        }
    }

    #[test]
    fn empty_board_opens_at_center() {
        let game = Game::new(15);
        let cfg = SearchConfig::default();
        let action = choose_move(&game, &cfg);
        assert_eq!(action, Action::Move(Move { coord: Coord::new(7, 7), color: Color::Black }));
    }

    #[test]
    fn search_completes_an_open_four() {
        let mut game = Game::new(15);
        for mv in [(7, 3), (0, 0), (7, 4), (0, 1), (7, 5), (0, 2), (7, 6), (0, 3)] {
            let (r, c) = mv;
            let color = if game.next_turn() == Some(Color::Black) { Color::Black } else { Color::White };
            game.play_move(Move { coord: Coord::new(r, c), color }).unwrap();
        }
        let cfg = SearchConfig { max_depth: 2, ..SearchConfig::default() };
        let action = choose_move(&game, &cfg);
        match action {
            Action::Move(mv) => {
                assert_eq!(mv.color, Color::Black);
                assert!(mv.coord == Coord::new(7, 2) || mv.coord == Coord::new(7, 7));
            }
            Action::Pass => panic!("expected a completing move, got a pass"),
        }
    }

    #[test]
    fn search_blocks_opponent_immediate_win() {
        let mut game = Game::new(15);
        // Black plays scattered, disconnected filler so it never builds a threat of its own;
        // White builds an open four on row 7, unfinished, leaving Black to move.
        let filler = [(0, 0), (0, 14), (14, 0), (14, 14)];
        let white_four = [(7, 3), (7, 4), (7, 5), (7, 6)];
        for (&(br, bc), &(wr, wc)) in filler.iter().zip(white_four.iter()) {
            game.play_move(Move { coord: Coord::new(br, bc), color: Color::Black }).unwrap();
            game.play_move(Move { coord: Coord::new(wr, wc), color: Color::White }).unwrap();
        }
        assert_eq!(game.next_turn(), Some(Color::Black));

        let cfg = SearchConfig { max_depth: 2, ..SearchConfig::default() };
        let action = choose_move(&game, &cfg);
        match action {
            Action::Move(mv) => {
                assert_eq!(mv.color, Color::Black);
                assert!(mv.coord == Coord::new(7, 2) || mv.coord == Coord::new(7, 7));
            }
            Action::Pass => panic!("expected a blocking move, got a pass"),
        }
    }

    #[test]
    fn candidate_cells_are_restricted_to_the_chebyshev_neighborhood() {
        let mut board = Board::new(15);
        place(&mut board, &[(7, 7)], Color::Black);
        let cells = candidate_cells(&board);
        assert!(cells.iter().all(|&c| c.chebyshev(&Coord::new(7, 7)) <= 2));
        assert!(!cells.iter().any(|&c| c == Coord::new(7, 7)));
    }
}
