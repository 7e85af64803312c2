use std::collections::VecDeque;

use rand::Rng;
use tracing::{debug, info, instrument, warn};

use minesweeper_common::{
    models::{CellView, GameParams, GameState, Pos},
    protocol::{CellUpdate, RevealResult},
};

use crate::{
    data::{Board, Cell},
    error::{EngineError, Result},
};

const NEIGHBOUR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Checks that `params` describe a playable board and returns its cell count.
fn validate_params(params: &GameParams) -> Result<usize> {
    let reason = match params.cell_count() {
        _ if params.rows == 0 || params.cols == 0 => {
            "the board needs at least one row and one column"
        }
        None => "board dimensions overflow",
        _ if params.mines == 0 => "at least one mine is required",
        Some(cells) if params.mines >= cells => {
            "mine count must be smaller than the number of cells"
        }
        Some(cells) => return Ok(cells),
    };

    Err(EngineError::InvalidConfiguration {
        params: *params,
        reason,
    })
}

/// In-grid neighbours of `pos`; cells past an edge are skipped, not wrapped.
fn neighbours(pos: Pos, rows: usize, cols: usize) -> impl Iterator<Item = Pos> {
    NEIGHBOUR_OFFSETS.iter().filter_map(move |&(dr, dc)| {
        let row = pos.row.checked_add_signed(dr)?;
        let col = pos.col.checked_add_signed(dc)?;
        (row < rows && col < cols).then_some(Pos { row, col })
    })
}

/// Picks random coordinates until `params.mines` distinct ones are mined.
fn place_mines<R: Rng + ?Sized>(params: &GameParams, cells: usize, rng: &mut R) -> Vec<bool> {
    let mut mines = vec![false; cells];
    let mut placed = 0;

    while placed < params.mines {
        let row = rng.random_range(0..params.rows);
        let col = rng.random_range(0..params.cols);
        let index = row * params.cols + col;

        if !mines[index] {
            mines[index] = true;
            placed += 1;
        }
    }

    mines
}

fn count_adjacent_mines(mines: &[bool], pos: Pos, params: &GameParams) -> u8 {
    neighbours(pos, params.rows, params.cols)
        .filter(|n| mines[n.row * params.cols + n.col])
        .count() as u8
}

fn generate_cells(mines: &[bool], params: &GameParams) -> Vec<Cell> {
    mines
        .iter()
        .enumerate()
        .map(|(i, &mine)| {
            let pos = Pos::new(i / params.cols, i % params.cols);
            Cell {
                mine,
                adjacent: if mine {
                    0
                } else {
                    count_adjacent_mines(mines, pos, params)
                },
                revealed: false,
                flagged: false,
            }
        })
        .collect()
}

impl From<&Cell> for CellView {
    fn from(value: &Cell) -> Self {
        Self {
            is_revealed: value.revealed,
            is_flagged: value.flagged,
            is_mine: value.mine,
            adjacent_mine_count: value.adjacent,
        }
    }
}

impl Board {
    /// Builds a board with randomly placed mines using the thread-local RNG.
    pub fn new(params: GameParams) -> Result<Self> {
        Self::generate(params, &mut rand::rng())
    }

    /// Builds a board with mines placed by `rng`. The same seeded generator
    /// always yields the same layout.
    #[instrument(level = "trace", skip(rng))]
    pub fn generate<R: Rng + ?Sized>(params: GameParams, rng: &mut R) -> Result<Self> {
        let cells = validate_params(&params)?;
        info!(
            "Creating new board: {}x{} with {} mines",
            params.rows, params.cols, params.mines
        );
        let mines = place_mines(&params, cells, rng);
        Ok(Self::from_layout(params, &mines))
    }

    /// Builds a board with mines at exactly the given positions.
    #[instrument(level = "trace", skip(mines), fields(mine_count = mines.len()))]
    pub fn with_mines(rows: usize, cols: usize, mines: &[Pos]) -> Result<Self> {
        let params = GameParams {
            rows,
            cols,
            mines: mines.len(),
        };
        let cells = validate_params(&params)?;

        let mut layout = vec![false; cells];
        for &pos in mines {
            if pos.row >= rows || pos.col >= cols {
                return Err(EngineError::InvalidCoordinate { pos, rows, cols });
            }

            let index = pos.row * cols + pos.col;
            if layout[index] {
                return Err(EngineError::InvalidConfiguration {
                    params,
                    reason: "mine positions must be distinct",
                });
            }
            layout[index] = true;
        }

        debug!("Creating board {}x{} from fixed layout", rows, cols);
        Ok(Self::from_layout(params, &layout))
    }

    fn from_layout(params: GameParams, mines: &[bool]) -> Self {
        Self {
            rows: params.rows,
            cols: params.cols,
            mines: params.mines,
            revealed: 0,
            flags: 0,
            state: GameState::InProgress,
            cells: generate_cells(mines, &params),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn mine_count(&self) -> usize {
        self.mines
    }

    pub fn params(&self) -> GameParams {
        GameParams {
            rows: self.rows,
            cols: self.cols,
            mines: self.mines,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Safe cells uncovered so far.
    pub fn revealed_count(&self) -> usize {
        self.revealed
    }

    pub fn flag_count(&self) -> usize {
        self.flags
    }

    /// Mines minus flags. Negative once the player has placed more flags
    /// than there are mines.
    pub fn mines_remaining(&self) -> isize {
        self.mines as isize - self.flags as isize
    }

    fn index(&self, pos: Pos) -> Result<usize> {
        if pos.row < self.rows && pos.col < self.cols {
            Ok(pos.row * self.cols + pos.col)
        } else {
            warn!("Invalid cell position: {}", pos);
            Err(EngineError::InvalidCoordinate {
                pos,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    fn pos_of(&self, index: usize) -> Pos {
        Pos::new(index / self.cols, index % self.cols)
    }

    pub fn cell(&self, pos: Pos) -> Result<CellView> {
        let index = self.index(pos)?;
        Ok((&self.cells[index]).into())
    }

    /// Every cell's view, one inner vector per row.
    pub fn snapshot(&self) -> Vec<Vec<CellView>> {
        self.cells
            .iter()
            .map(CellView::from)
            .collect::<Vec<_>>()
            .chunks(self.cols)
            .map(|chunk| chunk.to_vec())
            .collect()
    }

    pub fn mine_positions(&self) -> Vec<Pos> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.mine)
            .map(|(i, _)| self.pos_of(i))
            .collect()
    }

    fn has_won(&self) -> bool {
        self.rows * self.cols == self.mines + self.revealed
    }

    /// Shows every mine for the end of the game. Flags stay in place and the
    /// revealed counter is left alone.
    fn disclose_mines(&mut self, updates: &mut Vec<CellUpdate>) -> Vec<Pos> {
        let mut disclosed = Vec::with_capacity(self.mines);

        for index in 0..self.cells.len() {
            if !self.cells[index].mine {
                continue;
            }

            let pos = self.pos_of(index);
            disclosed.push(pos);

            let cell = &mut self.cells[index];
            if !cell.revealed {
                cell.revealed = true;
                updates.push(CellUpdate {
                    pos,
                    value: (&*cell).into(),
                });
            }
        }

        disclosed
    }

    /// Reveals `start` and, through a worklist, every cell reachable across
    /// zero-count cells. Each cell is revealed at most once.
    fn flood_reveal(&mut self, start: usize, updates: &mut Vec<CellUpdate>) {
        let mut pending = VecDeque::from([start]);

        while let Some(index) = pending.pop_front() {
            let pos = self.pos_of(index);
            let cell = &mut self.cells[index];
            if cell.revealed || cell.flagged {
                continue;
            }

            cell.revealed = true;
            self.revealed += 1;
            updates.push(CellUpdate {
                pos,
                value: (&*cell).into(),
            });

            if cell.adjacent != 0 {
                continue;
            }

            for next in neighbours(pos, self.rows, self.cols) {
                let next_index = next.row * self.cols + next.col;
                let neighbour = &self.cells[next_index];
                if !neighbour.revealed && !neighbour.flagged {
                    pending.push_back(next_index);
                }
            }
        }
    }

    /// Reveals the cell at `pos`.
    ///
    /// Revealed or flagged cells and finished games are left untouched and
    /// produce an unchanged result.
    #[instrument(level = "trace", skip(self), fields(row = pos.row, col = pos.col))]
    pub fn reveal(&mut self, pos: Pos) -> Result<RevealResult> {
        let index = self.index(pos)?;

        if self.state.is_over() {
            debug!("Ignoring reveal on finished game at {}", pos);
            return Ok(RevealResult::unchanged(self.state));
        }

        let cell = &mut self.cells[index];
        if cell.revealed {
            debug!("Ignoring reveal on revealed cell {}", pos);
            return Ok(RevealResult::unchanged(self.state));
        }
        if cell.flagged {
            debug!("Ignoring reveal on flagged cell {}", pos);
            return Ok(RevealResult::unchanged(self.state));
        }

        let mut updates = Vec::new();

        if cell.mine {
            warn!("Player hit mine at {} - game over!", pos);
            cell.revealed = true;
            updates.push(CellUpdate {
                pos,
                value: (&*cell).into(),
            });
            self.state = GameState::Lost;
            let disclosed = self.disclose_mines(&mut updates);
            info!("Game ended with loss, disclosed {} mines", disclosed.len());
            return Ok(RevealResult {
                updates,
                state: self.state,
                disclosed,
            });
        }

        debug!("Revealing cell {} with {} adjacent mines", pos, cell.adjacent);
        self.flood_reveal(index, &mut updates);

        let mut disclosed = Vec::new();
        if self.has_won() {
            self.state = GameState::Won;
            disclosed = self.disclose_mines(&mut updates);
            info!("Game won! All {} safe cells revealed.", self.revealed);
        } else {
            debug!("Revealed {} cells, game continues", updates.len());
        }

        Ok(RevealResult {
            updates,
            state: self.state,
            disclosed,
        })
    }

    /// Flips the flag on an unrevealed cell and returns the new flag state.
    /// On a revealed cell or a finished game nothing changes and the current
    /// flag state is returned.
    #[instrument(level = "trace", skip(self), fields(row = pos.row, col = pos.col))]
    pub fn toggle_flag(&mut self, pos: Pos) -> Result<bool> {
        let index = self.index(pos)?;
        let finished = self.state.is_over();
        let cell = &mut self.cells[index];

        if finished {
            debug!("Ignoring flag action on finished game at {}", pos);
            return Ok(cell.flagged);
        }
        if cell.revealed {
            debug!("Ignoring flag action on revealed cell {}", pos);
            return Ok(cell.flagged);
        }

        cell.flagged = !cell.flagged;
        if cell.flagged {
            self.flags += 1;
            debug!("Cell {} flagged", pos);
        } else {
            self.flags -= 1;
            debug!("Cell {} unflagged", pos);
        }

        Ok(cell.flagged)
    }
}
