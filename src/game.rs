//! Turn control for one match: opening setup, alternation, forced passes,
//! termination and scoring.
//!
//! The controller owns the only [`Board`]. It moves through four phases:
//!
//! ```text
//! AwaitingPlacement(mover) --legal placement--> Resolving(mover, pos)
//! Resolving(mover, pos)    --flips applied----> DeterminingNextTurn(mover)
//! DeterminingNextTurn      --------------------> AwaitingPlacement(next | mover) | GameOver
//! ```
//!
//! A placement request runs all three transitions before returning, so callers
//! only ever observe `AwaitingPlacement` or `GameOver`.

use std::fmt;

use derive_more::{Display, Error, From};
use tracing::{debug, info, instrument, trace};

use crate::board::{Board, BoardError, CellColor, PlayerColor, Position};
use crate::capture::{IllegalMove, apply_placement};
use crate::observer::{GameObserver, NullObserver};
use crate::rules::{self, MoveSet};

/// Who won, if anyone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Draw,
    Winner(PlayerColor),
}

/// Final result of a match together with the stone tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOutcome {
    pub verdict: Verdict,
    pub black: usize,
    pub white: usize,
}

impl GameOutcome {
    /// Score a board: more stones wins, equal counts draw.
    pub fn from_board(board: &Board) -> Self {
        let black = board.count(PlayerColor::Black);
        let white = board.count(PlayerColor::White);
        let verdict = match black.cmp(&white) {
            std::cmp::Ordering::Greater => Verdict::Winner(PlayerColor::Black),
            std::cmp::Ordering::Less => Verdict::Winner(PlayerColor::White),
            std::cmp::Ordering::Equal => Verdict::Draw,
        };
        Self {
            verdict,
            black,
            white,
        }
    }

    pub fn winner(&self) -> Option<PlayerColor> {
        match self.verdict {
            Verdict::Winner(color) => Some(color),
            Verdict::Draw => None,
        }
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.verdict {
            Verdict::Winner(color) => write!(f, "{color} WIN!")?,
            Verdict::Draw => write!(f, "DRAW")?,
        }
        write!(f, " Black[{}] : White[{}]", self.black, self.white)
    }
}

/// Where the controller is in the turn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingPlacement(PlayerColor),
    Resolving(PlayerColor, Position),
    DeterminingNextTurn(PlayerColor),
    GameOver(GameOutcome),
}

/// Why a placement request was turned down. The game state is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RejectReason {
    #[display("cell is not empty")]
    NotEmpty,
    #[display("placement captures nothing")]
    NoCapture,
    #[display("not this player's turn")]
    NotMoverTurn,
    #[display("game is over")]
    GameOver,
}

/// Answer to [`TurnController::request_placement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Accepted,
    Rejected(RejectReason),
}

impl Placement {
    pub fn is_accepted(self) -> bool {
        self == Placement::Accepted
    }
}

/// Programming errors surfaced by the controller. Neither is reachable from
/// well-formed input: positions come from a bounded UI and placements are
/// checked before they are resolved.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum GameError {
    #[display("{_0}")]
    Board(BoardError),
    #[display("{_0}")]
    IllegalMove(IllegalMove),
}

/// Runs one match at a time and notifies an observer of every event.
///
/// A new match reuses the same controller and board via [`start_game`](Self::start_game).
#[derive(Debug)]
pub struct TurnController<O = NullObserver> {
    board: Board,
    phase: Phase,
    mover: PlayerColor,
    turn: usize,
    passes: usize,
    observer: O,
}

impl TurnController<NullObserver> {
    pub fn new() -> Self {
        Self::with_observer(NullObserver)
    }
}

impl Default for TurnController<NullObserver> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: GameObserver> TurnController<O> {
    /// A controller with a freshly started match.
    pub fn with_observer(observer: O) -> Self {
        let mut controller = Self {
            board: Board::new(),
            phase: Phase::AwaitingPlacement(PlayerColor::Black),
            mover: PlayerColor::Black,
            turn: 0,
            passes: 0,
            observer,
        };
        controller.start_game();
        controller
    }

    /// A controller resuming from an arbitrary board with `mover` to play.
    ///
    /// The position is settled the same way as after a placement: if `mover`
    /// cannot play they pass, and if neither side can play (or the board is
    /// full) the match is over before this returns.
    pub fn with_position(board: Board, mover: PlayerColor, observer: O) -> Self {
        let mut controller = Self {
            board,
            phase: Phase::DeterminingNextTurn(mover.opponent()),
            mover: mover.opponent(),
            turn: 0,
            passes: 0,
            observer,
        };
        controller.determine_next_turn(mover.opponent());
        controller
    }

    /// Reset the board to the opening layout and hand the first move to Black.
    #[instrument(skip(self))]
    pub fn start_game(&mut self) {
        self.board.reset_to_initial();
        self.mover = PlayerColor::Black;
        self.turn = 0;
        self.passes = 0;
        self.phase = Phase::AwaitingPlacement(PlayerColor::Black);
        info!("new game started");
    }

    /// Try to place a stone of `by` at `pos`.
    ///
    /// Rejections are checked in order: game over, wrong player, occupied
    /// cell, no capture. An off-board `pos` is an error, not a rejection.
    #[instrument(skip(self), fields(turn = self.turn))]
    pub fn request_placement(
        &mut self,
        pos: Position,
        by: PlayerColor,
    ) -> Result<Placement, GameError> {
        let cell = self.board.get(pos)?;

        // Only quiescent phases are visible between calls.
        let Phase::AwaitingPlacement(mover) = self.phase else {
            return Ok(Placement::Rejected(RejectReason::GameOver));
        };
        let reject = if by != mover {
            Some(RejectReason::NotMoverTurn)
        } else if cell != CellColor::Empty {
            Some(RejectReason::NotEmpty)
        } else if !rules::is_legal(&self.board, pos, mover) {
            Some(RejectReason::NoCapture)
        } else {
            None
        };
        if let Some(reason) = reject {
            debug!(%pos, %by, %reason, "placement rejected");
            return Ok(Placement::Rejected(reason));
        }

        self.phase = Phase::Resolving(mover, pos);
        if let Err(err) = self.resolve(mover, pos) {
            self.phase = Phase::AwaitingPlacement(mover);
            return Err(err.into());
        }

        self.phase = Phase::DeterminingNextTurn(mover);
        self.determine_next_turn(mover);
        Ok(Placement::Accepted)
    }

    fn resolve(&mut self, mover: PlayerColor, pos: Position) -> Result<(), IllegalMove> {
        let capture = apply_placement(&mut self.board, pos, mover)?;
        debug!(%pos, color = %mover, flips = capture.flip_count(), "stone placed");
        self.observer.on_stone_placed(pos, mover);
        for cell in capture.flipped() {
            trace!(%cell, "flip");
            self.observer.on_stone_flipped(cell, mover);
        }
        self.turn += 1;
        Ok(())
    }

    fn determine_next_turn(&mut self, mover: PlayerColor) {
        if self.board.is_full() {
            self.finish();
            return;
        }

        let next = mover.opponent();
        if rules::has_legal_move(&self.board, next) {
            self.hand_over(next);
            return;
        }

        debug!(color = %next, "no legal placement, turn skipped");
        self.passes += 1;
        self.observer.on_pass(next);

        if rules::has_legal_move(&self.board, mover) {
            self.hand_over(mover);
        } else {
            self.finish();
        }
    }

    fn hand_over(&mut self, color: PlayerColor) {
        self.mover = color;
        self.phase = Phase::AwaitingPlacement(color);
    }

    fn finish(&mut self) {
        let outcome = GameOutcome::from_board(&self.board);
        info!(%outcome, "game finished");
        self.phase = Phase::GameOver(outcome);
        self.observer.on_game_over(&outcome);
    }

    /// Cells where `color` could place now.
    pub fn legal_moves(&self, color: PlayerColor) -> MoveSet {
        rules::legal_moves(&self.board, color)
    }

    /// The player to move, or the last player to have moved once the game is over.
    pub fn current_mover(&self) -> PlayerColor {
        self.mover
    }

    pub fn stone_count(&self, color: PlayerColor) -> usize {
        self.board.count(color)
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver(_))
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        match self.phase {
            Phase::GameOver(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Placements accepted since the match started.
    pub fn turn(&self) -> usize {
        self.turn
    }

    /// Passes declared since the match started.
    pub fn passes(&self) -> usize {
        self.passes
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }
}
