//! Board geometry and the fixed opening layout.
//!
//! Reversi is always played on an 8x8 board, so unlike engines for games
//! with several standard sizes there is no feature switch here.

use crate::board::CellColor;

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN).
pub const N: usize = 8;

/// Total number of cells on the board.
pub const CELLS: usize = N * N;

/// Number of stones on the board at the start of a match.
pub const INITIAL_STONES: usize = 4;

/// Maximum number of placements in one match (every empty cell filled once).
pub const MAX_PLACEMENTS: usize = CELLS - INITIAL_STONES;

// =============================================================================
// Scan Directions
// =============================================================================

/// Unit steps `(dx, dy)` for the eight scan directions.
/// Order: NW, W, SW, N, S, NE, E, SE (x grows to the right, y grows downwards).
pub const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

// =============================================================================
// Opening Layout
// =============================================================================

/// The four center stones present at the start of every match, as `(x, y, color)`.
pub const INITIAL_LAYOUT: [(usize, usize, CellColor); INITIAL_STONES] = [
    (3, 3, CellColor::White),
    (4, 3, CellColor::Black),
    (3, 4, CellColor::Black),
    (4, 4, CellColor::White),
];
