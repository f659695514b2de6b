#![allow(dead_code)]

pub mod action;
pub mod board;
pub mod color;
pub mod coords;
pub mod error;
pub mod evaluator;
pub mod game;
pub mod rule;
pub mod search;
pub mod shell;

pub mod prelude {
    pub use super::action::{Action, ActionSink, NullSink};
    pub use super::board::Board;
    pub use super::color::Color;
    pub use super::coords::{Coord, Direction, DIRECTIONS};
    pub use super::error::prelude::*;
    pub use super::error::RuleError;
    pub use super::evaluator::{Evaluator, EvaluatorScore, Weights};
    pub use super::game::{Game, HistoryEntry, Move};
    pub use super::rule::Rule;
    pub use super::search::{choose_move, SearchConfig};
    pub use super::shell::{RenjuShell, RenjuShellOptions};
}
