use regex::Regex;

use crate::coords::Coord;
use crate::error::prelude::*;

/// A parsed `play`-command coordinate argument, accepting either `"<row> <col>"` as two
/// tokens or a single packed `"(row,col)"` token. Mirrors `MoveString: FromStr`'s
/// regex-captured coordinate parsing, generalized from a tetromino-shape capture to a plain
/// coordinate pair.
pub struct CoordNotation(pub Coord);

impl std::str::FromStr for CoordNotation {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let pattern = Regex::new(r"^\(?\s*(?<row>[0-9]+)\s*,\s*(?<col>[0-9]+)\s*\)?$")?;
        let Some(matches) = pattern.captures(s.trim()) else {
            return Err(anyhow!("could not parse coordinate {s}"));
        };
        let row = matches.name("row").unwrap().as_str().parse::<usize>()?;
        let col = matches.name("col").unwrap().as_str().parse::<usize>()?;
        Ok(CoordNotation(Coord::new(row, col)))
    }
}
