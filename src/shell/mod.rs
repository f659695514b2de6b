mod notation;
mod options;

use std::process::exit;
use std::str::FromStr;

use itertools::Itertools;
pub use options::RenjuShellOptions;

use crate::action::{Action, ActionSink};
use crate::coords::Coord;
use crate::error::prelude::*;
use crate::game::{Game, HistoryEntry, Move};
use crate::search::{choose_move, SearchConfig};

/// A minimal line-oriented command shell for local/manual driving and scripted tests,
/// grounded on `LTPServer`: a loop reading whitespace-tokenized stdin commands, dispatching
/// to methods, printing one-line replies and an `ok`/`err` footer.
pub struct RenjuShell {
    game: Option<Game>,
    cfg: SearchConfig,
    #[allow(dead_code)]
    config: RenjuShellOptions,
}

impl RenjuShell {
    pub fn new(config: RenjuShellOptions) -> Result<RenjuShell> {
        let cfg = config.search_config()?;
        Ok(RenjuShell { game: None, cfg, config })
    }

    /// Runs the shell until `quit` or stdin closes.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let mut cmdstr = String::new();
            let bytes = std::io::stdin().read_line(&mut cmdstr)?;
            if bytes == 0 {
                return Ok(());
            }

            let args: Vec<&str> = cmdstr.split_whitespace().filter(|s| !s.is_empty()).collect();
            let cmd = *args.first().unwrap_or(&"");
            self.apply(cmd, &args[1..])?;
        }
    }

    fn apply(&mut self, cmd: &str, args: &[&str]) -> Result<()> {
        let result = match cmd {
            "" => Ok(()),
            "newgame" => self.new_game(args),
            "play" => self.play(args),
            "pass" => self.pass(args),
            "resign" => self.resign(args),
            "bestmove" => self.bestmove(args),
            "board" => self.print_board(),
            "history" => self.print_history(),
            "score" => self.print_score(),
            "quit" => exit(0),
            _ => Err(anyhow!("unrecognized command {cmd}")),
        };

        match result {
            Ok(()) => {
                log::debug!("command completed successfully: {cmd} {}", args.join(" "));
                self.ok()
            }
            Err(err) => {
                log::warn!("encountered recoverable error:\n{err}");
                self.err(&err)
            }
        }
    }

    fn new_game(&mut self, args: &[&str]) -> Result<()> {
        let n = match args.first() {
            Some(s) => s.parse::<usize>()?,
            None => self.cfg.n,
        };
        self.game = Some(Game::new(n));
        self.cfg.n = n;
        println!("{}", self.ensure_started()?.board().pretty());
        Ok(())
    }

    fn play(&mut self, args: &[&str]) -> Result<()> {
        let coord = match args {
            [row, col] => Coord::new(row.parse::<usize>()?, col.parse::<usize>()?),
            [packed] => notation::CoordNotation::from_str(packed)?.0,
            _ => return Err(anyhow!("usage: play <row> <col>, or play <row,col>")),
        };

        let game = self.ensure_started_mut()?;
        let color = game.next_turn().ok_or_else(|| anyhow!("game is already over"))?;
        game.play_move(Move { coord, color })?;
        println!("{}", game.board().pretty());
        Ok(())
    }

    fn pass(&mut self, _args: &[&str]) -> Result<()> {
        let game = self.ensure_started_mut()?;
        let color = game.next_turn().ok_or_else(|| anyhow!("game is already over"))?;
        game.pass_move(color)?;
        Ok(())
    }

    fn resign(&mut self, _args: &[&str]) -> Result<()> {
        let game = self.ensure_started_mut()?;
        let color = game.next_turn().ok_or_else(|| anyhow!("game is already over"))?;
        game.force_win(color.opponent());
        Ok(())
    }

    fn bestmove(&mut self, args: &[&str]) -> Result<()> {
        if args.len() >= 2 && args[0] == "depth" {
            self.cfg.max_depth = args[1].parse::<usize>()?;
        }

        let game = self.ensure_started()?;
        let action = choose_move(game, &self.cfg);
        self.deliver(action)
    }

    fn print_board(&mut self) -> Result<()> {
        println!("{}", self.ensure_started()?.board().pretty());
        Ok(())
    }

    fn print_history(&mut self) -> Result<()> {
        let game = self.ensure_started()?;
        let repr = game
            .history()
            .iter()
            .map(|entry| match entry {
                HistoryEntry::Played(mv) => format!("{} {} {}", mv.color.notate(), mv.coord.row, mv.coord.col),
                HistoryEntry::Pass(color) => format!("{} pass", color.notate()),
            })
            .join("; ");
        println!("{}", repr);
        Ok(())
    }

    fn print_score(&mut self) -> Result<()> {
        let game = self.ensure_started()?;
        let Some(HistoryEntry::Played(last)) =
            game.history().iter().rev().find(|e| matches!(e, HistoryEntry::Played(_)))
        else {
            return Err(anyhow!("no move has been played yet"));
        };
        let mut rule = crate::rule::Rule::new();
        let score = self.cfg.evaluator.score(game.board(), &mut rule, *last);
        println!("{:?}", score);
        Ok(())
    }

    fn ensure_started(&self) -> Result<&Game> {
        self.game.as_ref().ok_or_else(|| anyhow!("no game in progress"))
    }

    fn ensure_started_mut(&mut self) -> Result<&mut Game> {
        self.game.as_mut().ok_or_else(|| anyhow!("no game in progress"))
    }

    fn err(&self, err: &Error) -> Result<()> {
        println!("err\n{}", err);
        self.print_ok()
    }

    fn ok(&self) -> Result<()> {
        self.print_ok()
    }

    fn print_ok(&self) -> Result<()> {
        println!("ok");
        Ok(())
    }
}

impl ActionSink for RenjuShell {
    fn deliver(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Move(mv) => println!("{} {} {}", mv.color.notate(), mv.coord.row, mv.coord.col),
            Action::Pass => println!("pass"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> RenjuShellOptions {
        RenjuShellOptions {
            log_level: None,
            board_size: 9,
            depth: 2,
            weights: None,
            overline_wins_for_white: true,
        }
    }

    #[test]
    fn play_on_an_unstarted_game_is_an_error() {
        let mut shell = RenjuShell::new(options()).unwrap();
        let result = shell.play(&["4", "4"]);
        assert!(result.is_err());
    }

    #[test]
    fn bestmove_on_a_fresh_game_opens_at_center() {
        let mut shell = RenjuShell::new(options()).unwrap();
        shell.new_game(&[]).unwrap();
        let result = shell.bestmove(&[]);
        assert!(result.is_ok());
    }

    #[test]
    fn play_then_pass_round_trips_through_the_game() {
        let mut shell = RenjuShell::new(options()).unwrap();
        shell.new_game(&[]).unwrap();
        shell.play(&["4", "4"]).unwrap();
        shell.pass(&[]).unwrap();
        assert_eq!(shell.ensure_started().unwrap().history().len(), 2);
    }
}
