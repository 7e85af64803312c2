//! Minesweeper board engine
//!
//! Owns the state of one minesweeper board: random mine placement, adjacency
//! counts, flood-fill reveal, flagging and win/loss detection. Rendering and
//! input handling belong to the caller, which drives the engine through
//! [`Board`] (or the [`Game`] wrapper for restarts) and redraws from the
//! returned [`RevealResult`].
//!
//! ```rust
//! use minesweeper_engine::{Board, GameState, Pos};
//!
//! // 2x2 board with a single mine in the top-left corner
//! let mut board = Board::with_mines(2, 2, &[Pos::new(0, 0)])?;
//!
//! let result = board.reveal(Pos::new(1, 1))?;
//! assert_eq!(result.state, GameState::InProgress);
//! assert_eq!(board.cell(Pos::new(1, 1))?.adjacent_mine_count, 1);
//!
//! board.reveal(Pos::new(0, 1))?;
//! let result = board.reveal(Pos::new(1, 0))?;
//! assert_eq!(result.state, GameState::Won);
//! assert_eq!(result.disclosed, vec![Pos::new(0, 0)]);
//! # Ok::<(), minesweeper_engine::EngineError>(())
//! ```
//!
//! Out-of-range coordinates are rejected with
//! [`EngineError::InvalidCoordinate`] and leave the board untouched.

mod data;
mod error;
mod game;
mod logic;

pub use data::Board;
pub use error::{EngineError, Result};
pub use game::Game;

// Re-export common types for convenience
pub use minesweeper_common::{models::*, protocol::*};
