//! Move legality.
//!
//! A placement is legal when the target cell is empty and, in at least one of
//! the eight directions, a contiguous run of opponent stones is closed off by
//! one of the mover's own stones. Every function here is pure: the board is
//! only read.

use std::collections::BTreeSet;

use crate::board::{Board, CellColor, PlayerColor, Position};
use crate::constants::DIRECTIONS;

/// The set of cells a player may place on, ordered row-major.
pub type MoveSet = BTreeSet<Position>;

/// Scan outward from `origin` in direction `(dx, dy)`.
///
/// Returns the opponent stones crossed, nearest first, if the run is closed
/// by a stone of `color`. Returns `None` if the scan hits an empty cell or the
/// edge first, or if the very first neighbour is already `color`.
pub fn run_in_direction(
    board: &Board,
    origin: Position,
    color: PlayerColor,
    (dx, dy): (isize, isize),
) -> Option<Vec<Position>> {
    let own = CellColor::from(color);
    let mut crossed = Vec::new();
    let mut cur = origin;
    while let Some(next) = cur.offset(dx, dy) {
        match board.at(next) {
            CellColor::Empty => return None,
            c if c == own => return (!crossed.is_empty()).then_some(crossed),
            _ => crossed.push(next),
        }
        cur = next;
    }
    None
}

/// True if `(dx, dy)` from `origin` closes at least one opponent stone.
/// Same walk as [`run_in_direction`] without collecting the run.
fn direction_accepts(
    board: &Board,
    origin: Position,
    own: CellColor,
    (dx, dy): (isize, isize),
) -> bool {
    let mut crossed_opponent = false;
    let mut cur = origin;
    while let Some(next) = cur.offset(dx, dy) {
        match board.at(next) {
            CellColor::Empty => return false,
            c if c == own => return crossed_opponent,
            _ => crossed_opponent = true,
        }
        cur = next;
    }
    false
}

/// Check whether `color` may place a stone at `pos`.
///
/// Off-board positions and occupied cells are never legal.
pub fn is_legal(board: &Board, pos: Position, color: PlayerColor) -> bool {
    match board.get(pos) {
        Ok(CellColor::Empty) => {}
        _ => return false,
    }
    let own = CellColor::from(color);
    DIRECTIONS
        .iter()
        .any(|&dir| direction_accepts(board, pos, own, dir))
}

/// The runs a placement of `color` at `pos` would capture, one entry per
/// accepting direction, each ordered outward from `pos`.
///
/// Empty when the placement is illegal.
pub fn captures_at(board: &Board, pos: Position, color: PlayerColor) -> Vec<Vec<Position>> {
    if board.get(pos) != Ok(CellColor::Empty) {
        return Vec::new();
    }
    DIRECTIONS
        .iter()
        .filter_map(|&dir| run_in_direction(board, pos, color, dir))
        .collect()
}

/// All cells where `color` has a legal placement.
pub fn legal_moves(board: &Board, color: PlayerColor) -> MoveSet {
    Position::all()
        .filter(|&pos| is_legal(board, pos, color))
        .collect()
}

/// True if `color` has at least one legal placement. Stops at the first one found.
pub fn has_legal_move(board: &Board, color: PlayerColor) -> bool {
    Position::all().any(|pos| is_legal(board, pos, color))
}
