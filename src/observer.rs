//! Notifications from the turn controller to presentation layers.
//!
//! Callbacks are synchronous. The controller has already computed the final
//! board when it replays a placement's flips, so an observer may animate them
//! at its own pace; returning from [`GameObserver::on_pass`] counts as
//! acknowledging the pass.

use crate::board::{PlayerColor, Position};
use crate::game::GameOutcome;

/// Receiver for game events. Every method defaults to doing nothing.
pub trait GameObserver {
    /// A stone was placed. Fired once per placement, before any flips.
    fn on_stone_placed(&mut self, _pos: Position, _color: PlayerColor) {}

    /// A captured stone changed color. Within one direction, cells are reported
    /// outward from the placed stone.
    fn on_stone_flipped(&mut self, _pos: Position, _new_color: PlayerColor) {}

    /// `_color` had no legal placement and was skipped.
    fn on_pass(&mut self, _color: PlayerColor) {}

    /// The match ended. Fired once.
    fn on_game_over(&mut self, _outcome: &GameOutcome) {}
}

impl<O: GameObserver + ?Sized> GameObserver for &mut O {
    fn on_stone_placed(&mut self, pos: Position, color: PlayerColor) {
        (**self).on_stone_placed(pos, color);
    }

    fn on_stone_flipped(&mut self, pos: Position, new_color: PlayerColor) {
        (**self).on_stone_flipped(pos, new_color);
    }

    fn on_pass(&mut self, color: PlayerColor) {
        (**self).on_pass(color);
    }

    fn on_game_over(&mut self, outcome: &GameOutcome) {
        (**self).on_game_over(outcome);
    }
}

/// Ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl GameObserver for NullObserver {}

/// A recorded game event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Placed(Position, PlayerColor),
    Flipped(Position, PlayerColor),
    Pass(PlayerColor),
    GameOver(GameOutcome),
}

/// Records every event in order.
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    pub events: Vec<GameEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the recorded events, leaving the log empty.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn passes(&self) -> impl Iterator<Item = PlayerColor> + '_ {
        self.events.iter().filter_map(|e| match e {
            GameEvent::Pass(color) => Some(*color),
            _ => None,
        })
    }

    pub fn flips(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, GameEvent::Flipped(..)))
            .count()
    }
}

impl GameObserver for EventLog {
    fn on_stone_placed(&mut self, pos: Position, color: PlayerColor) {
        self.events.push(GameEvent::Placed(pos, color));
    }

    fn on_stone_flipped(&mut self, pos: Position, new_color: PlayerColor) {
        self.events.push(GameEvent::Flipped(pos, new_color));
    }

    fn on_pass(&mut self, color: PlayerColor) {
        self.events.push(GameEvent::Pass(color));
    }

    fn on_game_over(&mut self, outcome: &GameOutcome) {
        self.events.push(GameEvent::GameOver(*outcome));
    }
}
