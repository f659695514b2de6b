use clap::Parser;

use crate::evaluator::Weights;
use crate::search::SearchConfig;

/// Process-level CLI options, grounded on `LTPServerOptions`: one `clap::Parser` struct that
/// edits a tunables struct (`SearchConfig` here, `AgentConfig` there).
#[derive(Clone, Debug, Parser)]
pub struct RenjuShellOptions {
    #[arg(long)]
    pub log_level: Option<String>,

    /// Board side length: 9 or 15.
    #[arg(long, default_value_t = 15)]
    pub board_size: usize,

    /// Max alpha-beta search depth.
    #[arg(long, default_value_t = 3)]
    pub depth: usize,

    /// Comma-separated weights overriding the defaults: two,half_open_three,open_three,four.
    #[arg(long)]
    pub weights: Option<String>,

    /// Whether a White run of six-or-more counts as a win ("Pro Renju" sets this false).
    #[arg(long, default_value_t = true)]
    pub overline_wins_for_white: bool,
}

impl RenjuShellOptions {
    pub fn search_config(&self) -> anyhow::Result<SearchConfig> {
        let mut cfg = SearchConfig { n: self.board_size, max_depth: self.depth, ..SearchConfig::default() };
        cfg.overline_wins_for_white = self.overline_wins_for_white;

        if let Some(spec) = &self.weights {
            let parts: Vec<i32> = spec
                .split(',')
                .map(|s| s.trim().parse::<i32>())
                .collect::<Result<_, _>>()?;
            if parts.len() != 4 {
                return Err(anyhow::anyhow!("expected 4 comma-separated weights, got {}", parts.len()));
            }
            cfg.evaluator = crate::evaluator::Evaluator::new(Weights {
                two: parts[0],
                half_open_three: parts[1],
                open_three: parts[2],
                four: parts[3],
            });
        }
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_match_the_documented_values() {
        let w = Weights::default();
        assert_eq!((w.two, w.half_open_three, w.open_three, w.four), (1, 10, 100, 150));
    }
}
