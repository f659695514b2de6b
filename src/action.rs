use crate::error::prelude::*;
use crate::game::Move;

/// The outcome `choose_move` hands back: either a move to play, or a pass when the search
/// finds no legal candidate under the Chebyshev-2 restriction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Move(Move),
    Pass,
}

/// The abstract channel by which the search's chosen `Action` reaches an external
/// orchestrator (the websocket transport, arena, etc. that this crate only stubs the
/// interface for). The CLI shell's printer and `NullSink` both implement it.
pub trait ActionSink {
    fn deliver(&mut self, action: Action) -> Result<()>;
}

/// A test double that discards every delivered action.
#[derive(Default)]
pub struct NullSink {
    pub delivered: Vec<Action>,
}

impl ActionSink for NullSink {
    fn deliver(&mut self, action: Action) -> Result<()> {
        self.delivered.push(action);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::coords::Coord;

    #[test]
    fn null_sink_records_delivered_actions() {
        let mut sink = NullSink::default();
        sink.deliver(Action::Pass).unwrap();
        sink.deliver(Action::Move(Move { coord: Coord::new(7, 7), color: Color::Black })).unwrap();
        assert_eq!(sink.delivered.len(), 2);
    }
}
