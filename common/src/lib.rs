//! Value types shared between the minesweeper board engine and whatever
//! presentation layer drives it.

pub mod models;
pub mod protocol;
