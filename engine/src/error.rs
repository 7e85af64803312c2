use std::fmt;

use minesweeper_common::models::{GameParams, Pos};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Board dimensions or mine count cannot form a playable board.
    InvalidConfiguration {
        params: GameParams,
        reason: &'static str,
    },
    /// A coordinate outside the board was passed to an operation.
    InvalidCoordinate { pos: Pos, rows: usize, cols: usize },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidConfiguration { params, reason } => write!(
                f,
                "invalid board configuration {}x{} with {} mines: {}",
                params.rows, params.cols, params.mines, reason
            ),
            EngineError::InvalidCoordinate { pos, rows, cols } => {
                write!(f, "cell {} is outside the {}x{} board", pos, rows, cols)
            }
        }
    }
}

impl std::error::Error for EngineError {}

pub type Result<T> = std::result::Result<T, EngineError>;
