//! Reversi-Rules: the rules engine of a two-player Reversi/Othello game.
//!
//! This crate implements board storage, legal-move computation, capture
//! resolution and the turn cycle (including forced passes and scoring) on the
//! standard 8x8 board. Rendering, input and sound are left to presentation
//! layers, which talk to the engine through [`observer::GameObserver`].
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions, scan directions and the opening layout
//! - [`board`] - Cells, positions and the board itself
//! - [`rules`] - Legality checks and legal move generation
//! - [`capture`] - Stone placement and flipping
//! - [`game`] - The turn controller: alternation, passes, game over, scoring
//! - [`observer`] - Event callbacks for presentation layers
//! - [`playout`] - Random playouts for demos and testing
//! - [`protocol`] - Text protocol front end
//!
//! ## Example
//!
//! ```
//! use reversi_rules::board::{PlayerColor, Position};
//! use reversi_rules::game::{Placement, TurnController};
//!
//! let mut game = TurnController::new();
//! let placed = game.request_placement(Position::new(2, 3), PlayerColor::Black).unwrap();
//! assert_eq!(placed, Placement::Accepted);
//! assert_eq!(game.stone_count(PlayerColor::Black), 4);
//! assert_eq!(game.current_mover(), PlayerColor::White);
//! ```

pub mod board;
pub mod capture;
pub mod constants;
pub mod game;
pub mod observer;
pub mod playout;
pub mod protocol;
pub mod rules;
