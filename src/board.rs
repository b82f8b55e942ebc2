//! The 8x8 grid of cells and the value types that address it.
//!
//! The board is pure storage: it knows nothing about legality or captures.
//! Rule checking lives in [`crate::rules`] and [`crate::capture`].

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use derive_more::{Display, Error};

use crate::constants::{CELLS, INITIAL_LAYOUT, N};

/// Contents of a single cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Display)]
pub enum CellColor {
    #[default]
    Empty,
    Black,
    White,
}

impl CellColor {
    /// The player owning a stone of this color, or `None` for an empty cell.
    pub fn player(self) -> Option<PlayerColor> {
        match self {
            CellColor::Empty => None,
            CellColor::Black => Some(PlayerColor::Black),
            CellColor::White => Some(PlayerColor::White),
        }
    }
}

/// A side that can move: the stone colors without `Empty`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display)]
pub enum PlayerColor {
    Black,
    White,
}

impl PlayerColor {
    /// Both players, Black first (Black always opens).
    pub const ALL: [PlayerColor; 2] = [PlayerColor::Black, PlayerColor::White];

    pub fn opponent(self) -> PlayerColor {
        match self {
            PlayerColor::Black => PlayerColor::White,
            PlayerColor::White => PlayerColor::Black,
        }
    }
}

impl From<PlayerColor> for CellColor {
    fn from(color: PlayerColor) -> Self {
        match color {
            PlayerColor::Black => CellColor::Black,
            PlayerColor::White => CellColor::White,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("unknown color `{input}` (expected black or white)")]
pub struct ParseColorError {
    pub input: String,
}

impl FromStr for PlayerColor {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "black" | "b" | "x" => Ok(PlayerColor::Black),
            "white" | "w" | "o" => Ok(PlayerColor::White),
            _ => Err(ParseColorError { input: s.to_string() }),
        }
    }
}

/// A cell coordinate. `x` is the column, `y` the row, both counted from the
/// top-left corner.
///
/// A `Position` is a plain value pair and may lie off the board; [`Board`]
/// accessors reject such positions with [`BoardError::OutOfRange`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    pub fn is_on_board(self) -> bool {
        self.x < N && self.y < N
    }

    /// Step one unit in direction `(dx, dy)`, or `None` if that leaves the board.
    #[inline]
    pub fn offset(self, dx: isize, dy: isize) -> Option<Position> {
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        let next = Position { x, y };
        next.is_on_board().then_some(next)
    }

    /// Every on-board position in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..N).flat_map(|y| (0..N).map(move |x| Position { x, y }))
    }

    #[inline]
    fn index(self) -> usize {
        self.y * N + self.x
    }
}

// Row-major, so sorted move lists read top to bottom, left to right.
impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Text notation: column letter `a`..`h` then row number `1`..`8`, e.g. `d3` is `(3, 2)`.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_on_board() {
            return write!(f, "({}, {})", self.x, self.y);
        }
        let col = (b'a' + self.x as u8) as char;
        write!(f, "{col}{}", self.y + 1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("invalid position `{input}` (expected a1..h8)")]
pub struct ParsePositionError {
    pub input: String,
}

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePositionError { input: s.to_string() };
        let bytes = s.trim().as_bytes();
        let [col, row] = bytes else {
            return Err(err());
        };
        let col = col.to_ascii_lowercase();
        if !(b'a'..b'a' + N as u8).contains(&col) || !(b'1'..b'1' + N as u8).contains(row) {
            return Err(err());
        }
        Ok(Position::new((col - b'a') as usize, (row - b'1') as usize))
    }
}

/// Errors raised by board accessors.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum BoardError {
    /// Position outside `[0, 8) x [0, 8)`.
    #[display("position ({x}, {y}) is off the board")]
    OutOfRange { x: usize, y: usize },
    /// A row passed to [`Board::from_rows`] is not 8 cells of `X`, `O` or `.`.
    #[display("malformed board row {row}: `{text}`")]
    MalformedRow { row: usize, text: String },
}

/// The 8x8 grid. Every cell always holds a defined [`CellColor`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [CellColor; CELLS],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// A board with the four-stone opening layout.
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.reset_to_initial();
        board
    }

    /// A board with every cell empty.
    pub fn empty() -> Self {
        Self {
            cells: [CellColor::Empty; CELLS],
        }
    }

    /// Build a board from eight rows of text, top row first.
    /// `X` is Black, `O` is White, `.` is empty; spaces are ignored.
    pub fn from_rows(rows: [&str; N]) -> Result<Self, BoardError> {
        let mut board = Self::empty();
        for (y, text) in rows.iter().enumerate() {
            let row: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
            let malformed = || BoardError::MalformedRow {
                row: y,
                text: text.to_string(),
            };
            if row.len() != N {
                return Err(malformed());
            }
            for (x, ch) in row.into_iter().enumerate() {
                let color = match ch {
                    'X' | 'x' => CellColor::Black,
                    'O' | 'o' => CellColor::White,
                    '.' => CellColor::Empty,
                    _ => return Err(malformed()),
                };
                board.cells[Position::new(x, y).index()] = color;
            }
        }
        Ok(board)
    }

    pub fn get(&self, pos: Position) -> Result<CellColor, BoardError> {
        Self::check(pos)?;
        Ok(self.cells[pos.index()])
    }

    /// Overwrite a cell. No game rules are checked here.
    pub fn set(&mut self, pos: Position, color: impl Into<CellColor>) -> Result<(), BoardError> {
        Self::check(pos)?;
        self.cells[pos.index()] = color.into();
        Ok(())
    }

    /// Cell lookup for positions already known to be on the board
    /// (produced by [`Position::offset`] or [`Position::all`]).
    #[inline]
    pub(crate) fn at(&self, pos: Position) -> CellColor {
        debug_assert!(pos.is_on_board(), "off-board lookup at {pos:?}");
        self.cells[pos.index()]
    }

    #[inline]
    pub(crate) fn put(&mut self, pos: Position, color: CellColor) {
        debug_assert!(pos.is_on_board(), "off-board write at {pos:?}");
        self.cells[pos.index()] = color;
    }

    /// Number of cells currently holding `color`.
    pub fn count(&self, color: impl Into<CellColor>) -> usize {
        let color = color.into();
        self.cells.iter().filter(|&&c| c == color).count()
    }

    pub fn is_full(&self) -> bool {
        !self.cells.contains(&CellColor::Empty)
    }

    /// Clear every cell, then place the four opening stones.
    pub fn reset_to_initial(&mut self) {
        self.cells = [CellColor::Empty; CELLS];
        for (x, y, color) in INITIAL_LAYOUT {
            self.put(Position::new(x, y), color);
        }
    }

    /// Every cell with its contents, in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Position, CellColor)> + '_ {
        Position::all().map(|pos| (pos, self.at(pos)))
    }

    fn check(pos: Position) -> Result<(), BoardError> {
        if pos.is_on_board() {
            Ok(())
        } else {
            Err(BoardError::OutOfRange { x: pos.x, y: pos.y })
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " ")?;
        for x in 0..N {
            write!(f, " {}", (b'a' + x as u8) as char)?;
        }
        writeln!(f)?;
        for y in 0..N {
            write!(f, "{}", y + 1)?;
            for x in 0..N {
                let ch = match self.at(Position::new(x, y)) {
                    CellColor::Black => 'X',
                    CellColor::White => 'O',
                    CellColor::Empty => '.',
                };
                write!(f, " {ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
