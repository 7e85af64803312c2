use tracing::{info, instrument};

use minesweeper_common::{
    models::{CellView, GameParams, GameState, Pos},
    protocol::RevealResult,
};

use crate::{data::Board, error::Result};

/// A running game: the current board plus the parameters it was built from.
///
/// Restarting throws the board away and builds a new one; nothing carries
/// over between games.
#[derive(Debug)]
pub struct Game {
    params: GameParams,
    board: Board,
}

impl Game {
    #[instrument(level = "trace")]
    pub fn new(params: GameParams) -> Result<Self> {
        let board = Board::new(params)?;
        Ok(Self { params, board })
    }

    /// Starts over with the same parameters.
    pub fn restart(&mut self) -> Result<()> {
        self.restart_with(self.params)
    }

    /// Starts over with new parameters. On error the current game is kept.
    #[instrument(level = "trace", skip(self))]
    pub fn restart_with(&mut self, params: GameParams) -> Result<()> {
        info!(
            "Restarting game with parameters: {}x{} with {} mines",
            params.rows, params.cols, params.mines
        );
        self.board = Board::new(params)?;
        self.params = params;
        Ok(())
    }

    pub fn params(&self) -> GameParams {
        self.params
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> GameState {
        self.board.state()
    }

    pub fn cell(&self, pos: Pos) -> Result<CellView> {
        self.board.cell(pos)
    }

    pub fn reveal(&mut self, pos: Pos) -> Result<RevealResult> {
        self.board.reveal(pos)
    }

    pub fn toggle_flag(&mut self, pos: Pos) -> Result<bool> {
        self.board.toggle_flag(pos)
    }
}
