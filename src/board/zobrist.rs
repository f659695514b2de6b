use std::hash::{DefaultHasher, Hasher};
use std::sync::OnceLock;

use crate::color::Color;

const NUM_COLORS: usize = 2; // Black, White; Empty contributes no key

/// A table of independent 64-bit keys, one per (cell, color), built once and shared by every
/// board. Matches the construction style of a classic incremental Zobrist hash table.
struct ZobristTable {
    n: usize,
    keys: Vec<u64>,
}

fn table_for(n: usize) -> &'static ZobristTable {
    static TABLES: OnceLock<std::sync::Mutex<Vec<&'static ZobristTable>>> = OnceLock::new();
    let registry = TABLES.get_or_init(|| std::sync::Mutex::new(Vec::new()));
    let mut guard = registry.lock().unwrap();
    if let Some(existing) = guard.iter().find(|t| t.n == n) {
        return existing;
    }
    let mut keys = vec![0u64; n * n * NUM_COLORS];
    let mut hasher = DefaultHasher::new();
    for (i, key) in keys.iter_mut().enumerate() {
        hasher.write_usize(i);
        hasher.write_usize(n);
        *key = hasher.finish();
    }
    let table: &'static ZobristTable = Box::leak(Box::new(ZobristTable { n, keys }));
    guard.push(table);
    table
}

/// The Zobrist key contribution of a single (row, col, color) fact. `Empty` contributes 0,
/// so toggling a cell between two colors is `key(old) ^ key(new)`.
pub(super) fn cell_key(n: usize, row: usize, col: usize, color: Color) -> u64 {
    let offset = match color {
        Color::Black => 0,
        Color::White => 1,
        Color::Empty => return 0,
    };
    let table = table_for(n);
    table.keys[offset * n * n + row * n + col]
}
