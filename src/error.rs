use std::fmt;

use crate::{coords::Coord, game::Move};

/// Domain errors surfaced at the core/orchestrator boundary (see EXTERNAL INTERFACES).
///
/// The core never catches these itself; they propagate to whatever drives `Game`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuleError {
    /// The target cell is off-board, occupied, or Renju-forbidden for Black.
    IllegalMove { reason: String, mv: Move },

    /// `play_move` / `pass_move` was called with a color that is not `next_turn`.
    WrongTurn { expected: Option<crate::color::Color>, got: crate::color::Color },

    /// A state-advancing operation was attempted after `is_game_over` became true.
    GameOver,
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleError::IllegalMove { reason, mv } => {
                write!(f, "illegal move at {:?} for {:?}: {}", mv.coord, mv.color, reason)
            }
            RuleError::WrongTurn { expected, got } => {
                write!(f, "wrong turn: expected {:?}, got {:?}", expected, got)
            }
            RuleError::GameOver => write!(f, "game is already over"),
        }
    }
}

impl std::error::Error for RuleError {}

impl RuleError {
    pub fn illegal(mv: Move, reason: impl Into<String>) -> RuleError {
        RuleError::IllegalMove { reason: reason.into(), mv }
    }
}

pub(crate) fn off_board_reason(coord: Coord) -> String {
    format!("({}, {}) is off-board", coord.row, coord.col)
}

pub mod prelude {
    pub use anyhow::{anyhow, Context, Error};
    pub type Result<T> = anyhow::Result<T, Error>;
}
