use minesweeper_common::models::GameState;

#[derive(Debug, Clone, Default)]
pub struct Cell {
    pub mine: bool,
    pub adjacent: u8,
    pub revealed: bool,
    pub flagged: bool,
}

/// One game's grid, stored row major.
///
/// `revealed` counts only safe cells uncovered by play; mines shown at the
/// end of a game are not included.
#[derive(Debug, Clone)]
pub struct Board {
    pub(crate) rows: usize,
    pub(crate) cols: usize,
    pub(crate) mines: usize,
    pub(crate) revealed: usize,
    pub(crate) flags: usize,
    pub(crate) state: GameState,
    pub(crate) cells: Vec<Cell>,
}
