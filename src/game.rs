use crate::board::Board;
use crate::color::Color;
use crate::coords::Coord;
use crate::error::prelude::*;
use crate::error::RuleError;
use crate::rule::Rule;

/// A well-formed candidate placement: a coordinate plus the color attempting to play it.
/// Well-formed means only that the fields typecheck — legality is `Rule`'s concern, not this
/// type's.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub coord: Coord,
    pub color: Color,
}

/// One entry of a completed game's move list. `Pass` records who passed, so
/// `Game::pass_move` can tell whether the immediately preceding entry was a pass by the
/// *other* side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HistoryEntry {
    Played(Move),
    Pass(Color),
}

/// Turn sequencer owning the `Board` for the duration of one match. `Rule` and the search
/// borrow the board read-only (modulo their own scratch-write discipline); only `Game` ever
/// commits a permanent mutation.
#[derive(Debug)]
pub struct Game {
    board: Board,
    history: Vec<HistoryEntry>,
    next_turn: Option<Color>,
    is_game_over: bool,
    winner: Option<Color>,
    rule: Rule,
}

impl Game {
    pub fn new(n: usize) -> Game {
        Game {
            board: Board::new(n),
            history: Vec::new(),
            next_turn: Some(Color::Black),
            is_game_over: false,
            winner: None,
            rule: Rule::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn next_turn(&self) -> Option<Color> {
        self.next_turn
    }

    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    pub fn is_game_over(&self) -> bool {
        self.is_game_over
    }

    fn require_turn(&self, color: Color) -> Result<()> {
        if self.is_game_over {
            return Err(anyhow!(RuleError::GameOver));
        }
        if self.next_turn != Some(color) {
            return Err(anyhow!(RuleError::WrongTurn { expected: self.next_turn, got: color }));
        }
        Ok(())
    }

    /// Plays `mv`, asserting Renju legality first. Sets game-over and `winner` if the move
    /// wins, otherwise flips `next_turn`.
    pub fn play_move(&mut self, mv: Move) -> Result<()> {
        self.require_turn(mv.color)?;

        #[cfg(debug_assertions)]
        let pre_hash = self.board.zobrist();
        self.rule
            .assert_legal(&mut self.board, mv)
            .map_err(|reason| anyhow!(RuleError::illegal(mv, reason)))?;
        #[cfg(debug_assertions)]
        debug_assert_eq!(
            self.board.zobrist(),
            pre_hash,
            "scratch-write corruption: board not restored after legality classification"
        );

        self.board.set(mv.coord, mv.color);
        self.history.push(HistoryEntry::Played(mv));

        if self.rule.is_win(&self.board, mv) {
            self.winner = Some(mv.color);
            self.is_game_over = true;
            self.next_turn = None;
        } else {
            self.next_turn = Some(mv.color.opponent());
        }
        Ok(())
    }

    /// Ends the match in a draw iff the immediately preceding history entry was a pass by the
    /// *other* side (mutual-pass draw; see the documented deviation from the reference's
    /// asymmetric opening-pass rule).
    pub fn pass_move(&mut self, color: Color) -> Result<()> {
        self.require_turn(color)?;

        let mutual = matches!(
            self.history.last(),
            Some(HistoryEntry::Pass(prev)) if *prev == color.opponent()
        );

        self.history.push(HistoryEntry::Pass(color));
        if mutual {
            self.winner = None;
            self.is_game_over = true;
            self.next_turn = None;
        } else {
            self.next_turn = Some(color.opponent());
        }
        Ok(())
    }

    /// Ends the match with `color` as winner (resignation / disconnect). No legality check;
    /// no board mutation.
    pub fn force_win(&mut self, color: Color) {
        self.winner = Some(color);
        self.is_game_over = true;
        self.next_turn = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(row: usize, col: usize, color: Color) -> Move {
        Move { coord: Coord::new(row, col), color }
    }

    #[test]
    fn opening_center_move_is_accepted() {
        let mut game = Game::new(15);
        game.play_move(mv(7, 7, Color::Black)).unwrap();
        assert_eq!(game.history().len(), 1);
        assert_eq!(game.next_turn(), Some(Color::White));
        assert!(!game.is_game_over());
    }

    #[test]
    fn five_in_a_row_wins_the_game() {
        let mut game = Game::new(15);
        for (i, col) in [3usize, 4, 5, 6].into_iter().enumerate() {
            game.play_move(mv(7, col, Color::Black)).unwrap();
            game.play_move(mv(0, i, Color::White)).unwrap();
        }
        game.play_move(mv(7, 7, Color::Black)).unwrap();
        assert!(game.is_game_over());
        assert_eq!(game.winner(), Some(Color::Black));
        assert_eq!(game.next_turn(), None);
    }

    #[test]
    fn overline_is_rejected_as_illegal() {
        let mut game = Game::new(15);
        for (i, col) in [3usize, 4, 5, 6].into_iter().enumerate() {
            game.play_move(mv(7, col, Color::Black)).unwrap();
            game.play_move(mv(0, i, Color::White)).unwrap();
        }
        game.play_move(mv(7, 8, Color::Black)).unwrap();
        game.play_move(mv(0, 4, Color::White)).unwrap();
        let err = game.play_move(mv(7, 7, Color::Black)).unwrap_err();
        assert!(err.to_string().contains("illegal move"));
    }

    #[test]
    fn white_overline_is_accepted_as_a_win() {
        // The symmetric counterpart of `overline_is_rejected_as_illegal`: the same six-in-a-row
        // shape, built by White instead of Black, is a win rather than a forbidden move. Black's
        // filler moves are single stones spaced two columns apart so they never form a three or
        // four of their own.
        let mut game = Game::new(15);
        for (i, col) in [3usize, 4, 5, 6].into_iter().enumerate() {
            game.play_move(mv(0, 2 * i, Color::Black)).unwrap();
            game.play_move(mv(7, col, Color::White)).unwrap();
        }
        game.play_move(mv(0, 8, Color::Black)).unwrap();
        game.play_move(mv(7, 8, Color::White)).unwrap();
        game.play_move(mv(0, 10, Color::Black)).unwrap();
        game.play_move(mv(7, 7, Color::White)).unwrap();
        assert!(game.is_game_over());
        assert_eq!(game.winner(), Some(Color::White));
        assert_eq!(game.next_turn(), None);
    }

    #[test]
    fn wrong_turn_is_rejected() {
        let mut game = Game::new(15);
        let err = game.play_move(mv(7, 7, Color::White)).unwrap_err();
        assert!(err.to_string().contains("wrong turn"));
    }

    #[test]
    fn mutual_pass_ends_the_game_in_a_draw() {
        let mut game = Game::new(15);
        game.pass_move(Color::Black).unwrap();
        assert!(!game.is_game_over());
        game.pass_move(Color::White).unwrap();
        assert!(game.is_game_over());
        assert_eq!(game.winner(), None);
    }

    #[test]
    fn forced_win_ends_the_game_without_touching_the_board() {
        let mut game = Game::new(9);
        let before = game.board().serialize();
        game.force_win(Color::White);
        assert!(game.is_game_over());
        assert_eq!(game.winner(), Some(Color::White));
        assert_eq!(game.board().serialize(), before);
    }
}
