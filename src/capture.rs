//! Stone placement and capture resolution.
//!
//! The eight directions are resolved independently. Each flipped span lies
//! strictly between the placed stone and the closing stone of its own
//! direction, so spans never overlap and the resulting board does not depend
//! on the order directions are processed in.

use derive_more::{Display, Error};

use crate::board::{Board, CellColor, PlayerColor, Position};
use crate::constants::DIRECTIONS;
use crate::rules::{is_legal, run_in_direction};

/// [`apply_placement`] was called for a placement that captures nothing
/// (occupied, off the board, or no closed run). Callers are expected to check
/// legality first, so this signals a bug in the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("illegal placement of {color} at {pos}")]
pub struct IllegalMove {
    pub pos: Position,
    pub color: PlayerColor,
}

/// What a placement did to the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    pub placed: Position,
    pub color: PlayerColor,
    /// Flipped cells, one run per accepting direction, each ordered outward
    /// from `placed`.
    pub runs: Vec<Vec<Position>>,
}

impl Capture {
    /// Every flipped cell, run by run.
    pub fn flipped(&self) -> impl Iterator<Item = Position> + '_ {
        self.runs.iter().flatten().copied()
    }

    pub fn flip_count(&self) -> usize {
        self.runs.iter().map(Vec::len).sum()
    }
}

/// Place a stone of `color` at `pos` and flip every captured run.
///
/// The board is untouched when the placement is illegal.
pub fn apply_placement(
    board: &mut Board,
    pos: Position,
    color: PlayerColor,
) -> Result<Capture, IllegalMove> {
    if !is_legal(board, pos, color) {
        return Err(IllegalMove { pos, color });
    }

    let own = CellColor::from(color);
    board.put(pos, own);

    let runs: Vec<Vec<Position>> = DIRECTIONS
        .iter()
        .filter_map(|&dir| run_in_direction(board, pos, color, dir))
        .collect();
    for &cell in runs.iter().flatten() {
        board.put(cell, own);
    }

    Ok(Capture {
        placed: pos,
        color,
        runs,
    })
}
