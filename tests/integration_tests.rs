//! Integration tests for reversi-rules
//!
//! Scenario tests drive the turn controller through its public API only.
//! Invariant tests replay many seeded random matches and check every
//! placement against the board before and after.

use fastrand::Rng;

use reversi_rules::board::{Board, CellColor, PlayerColor, Position};
use reversi_rules::game::{Phase, Placement, RejectReason, TurnController, Verdict};
use reversi_rules::observer::{EventLog, GameEvent, NullObserver};
use reversi_rules::rules::{is_legal, legal_moves};

// =============================================================================
// Helper functions
// =============================================================================

fn pos(s: &str) -> Position {
    s.parse().unwrap_or_else(|e| panic!("bad test position {s}: {e}"))
}

/// Play a sequence of placements, alternating as the controller dictates.
/// Panics if any placement is rejected.
fn play_sequence(moves: &[&str]) -> TurnController<EventLog> {
    let mut game = TurnController::with_observer(EventLog::new());
    for mv in moves {
        let mover = game.current_mover();
        let result = game.request_placement(pos(mv), mover).unwrap();
        assert_eq!(result, Placement::Accepted, "{mover} at {mv} was rejected");
    }
    game
}

fn stones(game: &TurnController<EventLog>) -> usize {
    game.stone_count(PlayerColor::Black) + game.stone_count(PlayerColor::White)
}

// =============================================================================
// Opening
// =============================================================================

#[test]
fn test_initial_layout() {
    let game = TurnController::new();
    assert_eq!(game.stone_count(PlayerColor::Black), 2);
    assert_eq!(game.stone_count(PlayerColor::White), 2);

    let board = game.board();
    for (p, color) in board.cells() {
        let expected = match (p.x, p.y) {
            (3, 3) | (4, 4) => CellColor::White,
            (4, 3) | (3, 4) => CellColor::Black,
            _ => CellColor::Empty,
        };
        assert_eq!(color, expected, "unexpected contents at {p}");
    }
    assert_eq!(board.count(CellColor::Empty), 60);
}

#[test]
fn test_black_opens_at_c4() {
    let mut game = TurnController::new();
    let result = game
        .request_placement(Position::new(2, 3), PlayerColor::Black)
        .unwrap();
    assert!(result.is_accepted());

    // The White stone at (3, 3) is closed by Black at (4, 3).
    assert_eq!(game.board().get(Position::new(3, 3)), Ok(CellColor::Black));
    assert_eq!(game.current_mover(), PlayerColor::White);
    assert!(!game.legal_moves(PlayerColor::White).is_empty());
}

#[test]
fn test_every_opening_move_is_symmetric() {
    // The four opening moves are equivalent by symmetry: each flips one stone.
    for mv in ["d3", "c4", "f5", "e6"] {
        let game = play_sequence(&[mv]);
        assert_eq!(game.stone_count(PlayerColor::Black), 4, "after {mv}");
        assert_eq!(game.stone_count(PlayerColor::White), 1, "after {mv}");
        assert_eq!(game.legal_moves(PlayerColor::White).len(), 3, "after {mv}");
    }
}

// =============================================================================
// Rejections
// =============================================================================

#[test]
fn test_no_spurious_capture() {
    let mut game = TurnController::new();
    let before = game.board().clone();

    for p in Position::all() {
        if is_legal(game.board(), p, PlayerColor::Black) {
            continue;
        }
        let result = game.request_placement(p, PlayerColor::Black).unwrap();
        assert!(
            matches!(
                result,
                Placement::Rejected(RejectReason::NotEmpty | RejectReason::NoCapture)
            ),
            "{p} should be rejected, got {result:?}"
        );
        assert_eq!(game.board(), &before, "rejected {p} changed the board");
    }
    assert_eq!(game.phase(), Phase::AwaitingPlacement(PlayerColor::Black));
}

#[test]
fn test_wrong_player_rejected() {
    let mut game = play_sequence(&["d3"]);
    assert_eq!(
        game.request_placement(pos("c3"), PlayerColor::Black),
        Ok(Placement::Rejected(RejectReason::NotMoverTurn))
    );
    assert_eq!(game.current_mover(), PlayerColor::White);
}

// =============================================================================
// Events
// =============================================================================

#[test]
fn test_placement_reported_before_flips() {
    // Black d3, White c5, then Black f6 closes e5 against d4.
    let game = play_sequence(&["d3", "c5", "f6"]);
    let events = &game.observer().events;
    assert_eq!(
        &events[events.len() - 2..],
        &[
            GameEvent::Placed(pos("f6"), PlayerColor::Black),
            GameEvent::Flipped(pos("e5"), PlayerColor::Black),
        ]
    );
}

#[test]
fn test_flips_reported_outward() {
    let board = Board::from_rows([
        ". O O O X . . .",
        ". . . . . . . .",
        ". . . . . . . .",
        ". . . . . . . .",
        ". . . . . . . .",
        ". . . . . . . .",
        ". . . . . . . .",
        ". . . . . . . X",
    ])
    .unwrap();
    let mut game = TurnController::with_position(board, PlayerColor::Black, EventLog::new());
    game.request_placement(pos("a1"), PlayerColor::Black).unwrap();

    let flips: Vec<Position> = game
        .observer()
        .events
        .iter()
        .filter_map(|e| match e {
            GameEvent::Flipped(p, _) => Some(*p),
            _ => None,
        })
        .collect();
    assert_eq!(flips, vec![pos("b1"), pos("c1"), pos("d1")]);
}

// =============================================================================
// Passes and game end
// =============================================================================

#[test]
fn test_single_pass_returns_turn() {
    // After Black takes a2 the White stones on a6 and a7 can only be reached
    // along the a-file, where every Black run ends on an empty cell. Black can
    // still take a5, closing a6 and a7 against a8.
    let board = Board::from_rows([
        ". . . . . . . .",
        ". . . . . . . .",
        "O . . . . . . .",
        "X . . . . . . .",
        ". . . . . . . .",
        "O . . . . . . .",
        "O . . . . . . .",
        "X . . . . . . .",
    ])
    .unwrap();
    let mut game = TurnController::with_position(board, PlayerColor::Black, EventLog::new());
    game.request_placement(pos("a2"), PlayerColor::Black).unwrap();

    let passes: Vec<PlayerColor> = game.observer().passes().collect();
    assert_eq!(passes, vec![PlayerColor::White]);
    assert_eq!(game.current_mover(), PlayerColor::Black);
    assert!(!game.is_game_over());
    assert!(game.legal_moves(PlayerColor::Black).contains(&pos("a5")));
    assert!(game.legal_moves(PlayerColor::White).is_empty());
}

#[test]
fn test_full_board_draw() {
    let mut rows = ["X O X O X O X O"; 8];
    for row in rows.iter_mut().skip(1).step_by(2) {
        *row = "O X O X O X O X";
    }
    let board = Board::from_rows(rows).unwrap();
    assert_eq!(board.count(PlayerColor::Black), 32);

    let game = TurnController::with_position(board, PlayerColor::Black, NullObserver);
    assert!(game.is_game_over());
    let outcome = game.outcome().unwrap();
    assert_eq!(outcome.verdict, Verdict::Draw);
    assert_eq!((outcome.black, outcome.white), (32, 32));
}

#[test]
fn test_blocked_board_ends_without_filling() {
    // Neither side can capture anything: every stone is Black.
    let board = Board::from_rows([
        "X X X . . . . .",
        ". . . . . . . .",
        ". . . . . . . .",
        ". . . . . . . .",
        ". . . . . . . .",
        ". . . . . . . .",
        ". . . . . . . .",
        ". . . . . . . .",
    ])
    .unwrap();
    let game = TurnController::with_position(board, PlayerColor::White, EventLog::new());
    assert!(game.is_game_over());
    assert_eq!(game.outcome().unwrap().verdict, Verdict::Winner(PlayerColor::Black));
    let passes: Vec<PlayerColor> = game.observer().passes().collect();
    assert_eq!(passes, vec![PlayerColor::White]);
}

#[test]
fn test_new_match_after_game_over() {
    let mut game = play_sequence(&[]);
    let mut rng = Rng::with_seed(7);
    reversi_rules::playout::playout(&mut game, &mut rng).unwrap();
    assert!(game.is_game_over());

    game.start_game();
    assert_eq!(game.board(), &Board::new());
    assert_eq!(game.phase(), Phase::AwaitingPlacement(PlayerColor::Black));
    assert_eq!(game.outcome(), None);
}

// =============================================================================
// Invariants over random matches
// =============================================================================

#[test]
fn test_random_match_invariants() {
    for seed in 0..50 {
        let mut rng = Rng::with_seed(seed);
        let mut game = TurnController::with_observer(EventLog::new());

        while !game.is_game_over() {
            let mover = game.current_mover();
            let moves = game.legal_moves(mover);
            assert!(!moves.is_empty(), "seed {seed}: {mover} awaits with no move");
            let target = rng.choice(moves.iter().copied()).unwrap();

            let stones_before = stones(&game);
            let own_before = game.stone_count(mover);
            let empty_before = game.board().count(CellColor::Empty);
            game.observer_mut().drain();

            let result = game.request_placement(target, mover).unwrap();
            assert_eq!(result, Placement::Accepted);

            // Capture conservation
            let flips = game.observer().flips();
            assert!(flips > 0, "seed {seed}: {target} captured nothing");
            assert_eq!(stones(&game), stones_before + 1);
            assert_eq!(game.stone_count(mover), own_before + 1 + flips);
            assert_eq!(game.board().count(CellColor::Empty), empty_before - 1);

            // Turn progression and passes
            let passes: Vec<PlayerColor> = game.observer().passes().collect();
            let board = game.board();
            let full = board.is_full();
            let opp_moves = legal_moves(board, mover.opponent());
            let own_moves = legal_moves(board, mover);
            if game.is_game_over() {
                assert!(
                    full || (opp_moves.is_empty() && own_moves.is_empty()),
                    "seed {seed}: game over with moves left"
                );
            } else if opp_moves.is_empty() {
                assert_eq!(passes, vec![mover.opponent()], "seed {seed}");
                assert_eq!(game.current_mover(), mover);
            } else {
                assert!(passes.is_empty(), "seed {seed}: unexpected pass");
                assert_eq!(game.current_mover(), mover.opponent());
            }
        }

        let outcome = game.outcome().unwrap();
        let expected = match outcome.black.cmp(&outcome.white) {
            std::cmp::Ordering::Greater => Verdict::Winner(PlayerColor::Black),
            std::cmp::Ordering::Less => Verdict::Winner(PlayerColor::White),
            std::cmp::Ordering::Equal => Verdict::Draw,
        };
        assert_eq!(outcome.verdict, expected, "seed {seed}");
    }
}
