use std::{env, fmt};

use serde::{Deserialize, Serialize};

/// Externally visible state of a single cell.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub struct CellView {
    pub is_revealed: bool,
    pub is_flagged: bool,
    pub is_mine: bool,
    pub adjacent_mine_count: u8,
}

#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GameState {
    #[default]
    #[serde(rename = "in_progress")]
    InProgress,
    #[serde(rename = "won")]
    Won,
    #[serde(rename = "lost")]
    Lost,
}

impl GameState {
    pub fn is_over(self) -> bool {
        self != Self::InProgress
    }
}

pub const ROWS_VAR: &str = "MINESWEEPER_ROWS";
pub const COLS_VAR: &str = "MINESWEEPER_COLS";
pub const MINES_VAR: &str = "MINESWEEPER_MINES";

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct GameParams {
    pub rows: usize,
    pub cols: usize,
    pub mines: usize,
}

impl Default for GameParams {
    fn default() -> Self {
        Self {
            rows: 16,
            cols: 16,
            mines: 40,
        }
    }
}

fn value_or<F>(lookup: &F, name: &str, fallback: usize) -> usize
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .unwrap_or_else(|| fallback.to_string())
        .parse()
        .unwrap_or(fallback)
}

impl GameParams {
    /// Reads board dimensions from `MINESWEEPER_ROWS`, `MINESWEEPER_COLS`
    /// and `MINESWEEPER_MINES`, keeping the default for any variable that is
    /// missing or not a number.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`GameParams::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            rows: value_or(&lookup, ROWS_VAR, defaults.rows),
            cols: value_or(&lookup, COLS_VAR, defaults.cols),
            mines: value_or(&lookup, MINES_VAR, defaults.mines),
        }
    }

    /// `rows * cols`, or `None` when the product does not fit in a `usize`.
    pub fn cell_count(&self) -> Option<usize> {
        self.rows.checked_mul(self.cols)
    }

    /// Number of non-mine cells that must be revealed to win.
    pub fn safe_cells(&self) -> Option<usize> {
        self.cell_count().map(|cells| cells.saturating_sub(self.mines))
    }
}
