//! Random playouts.
//!
//! A playout drives a match to the end by choosing uniformly among the
//! mover's legal placements. There is no evaluation involved; playouts exist
//! to exercise the rules end to end (demo mode and invariant tests) with a
//! seeded, reproducible generator.

use fastrand::Rng;
use tracing::debug;

use crate::game::{GameError, GameOutcome, TurnController};
use crate::observer::{EventLog, GameObserver};

/// Play random legal placements until the match is over.
///
/// Every accepted placement goes through [`TurnController::request_placement`],
/// so the observer sees the same events a human-driven match would produce.
pub fn playout<O: GameObserver>(
    game: &mut TurnController<O>,
    rng: &mut Rng,
) -> Result<GameOutcome, GameError> {
    while !game.is_game_over() {
        let mover = game.current_mover();
        // The controller never waits on a player without a legal placement.
        let Some(pos) = rng.choice(game.legal_moves(mover)) else {
            break;
        };
        game.request_placement(pos, mover)?;
    }
    let outcome = game
        .outcome()
        .unwrap_or_else(|| GameOutcome::from_board(game.board()));
    debug!(%outcome, turns = game.turn(), passes = game.passes(), "playout finished");
    Ok(outcome)
}

/// Play a whole random match from the opening, recording every event.
pub fn random_game(seed: u64) -> Result<TurnController<EventLog>, GameError> {
    let mut rng = Rng::with_seed(seed);
    let mut game = TurnController::with_observer(EventLog::new());
    playout(&mut game, &mut rng)?;
    Ok(game)
}
