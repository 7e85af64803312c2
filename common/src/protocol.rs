use serde::{Deserialize, Serialize};

use crate::models::{CellView, GameState, Pos};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellUpdate {
    pub pos: Pos,
    pub value: CellView,
}

/// What a single reveal changed.
///
/// `updates` lists every cell whose view changed, in the order they were
/// revealed, so a caller can redraw incrementally. When the reveal ended the
/// game, `disclosed` holds the coordinates of every mine on the board.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct RevealResult {
    pub updates: Vec<CellUpdate>,
    pub state: GameState,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disclosed: Vec<Pos>,
}

impl RevealResult {
    pub fn unchanged(state: GameState) -> Self {
        Self {
            updates: Vec::new(),
            state,
            disclosed: Vec::new(),
        }
    }

    pub fn is_unchanged(&self) -> bool {
        self.updates.is_empty()
    }

    pub fn changed_positions(&self) -> impl Iterator<Item = Pos> + '_ {
        self.updates.iter().map(|update| update.pos)
    }
}
