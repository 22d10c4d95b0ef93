//! Integration tests for the Reversi rules engine.
//!
//! These tests play complete games and check the engine against a
//! brute-force full-board scan after every move.

use pretty_assertions::assert_eq;
use reversi_core::*;
use std::collections::HashSet;

/// Legality by walking every direction by hand, without the edge set
fn oracle_is_legal(board: &Board, side: Side, at: Coord) -> bool {
    if board.get(at) != Ok(Tile::Empty) {
        return false;
    }

    Direction::ALL.iter().any(|&d| {
        let mut c = d.next(at);
        let mut seen = 0;
        loop {
            match board.get(c) {
                Ok(t) if t == side.opponent().tile() => {
                    seen += 1;
                    c = d.next(c);
                }
                Ok(t) if t == side.tile() => return seen > 0,
                _ => return false,
            }
        }
    })
}

/// Every legal move found by scanning the whole board, row-major
fn oracle_moves(board: &Board, side: Side) -> Vec<Coord> {
    board
        .grid()
        .coords()
        .filter(|&c| oracle_is_legal(board, side, c))
        .collect()
}

fn edges_from_scratch(board: &Board) -> HashSet<Coord> {
    board
        .grid()
        .coords()
        .filter(|&c| board.get(c) == Ok(Tile::Empty))
        .filter(|&c| {
            c.neighbors()
                .iter()
                .any(|&n| matches!(board.get(n), Ok(t) if !t.is_empty()))
        })
        .collect()
}

fn assert_invariants(game: &Game) {
    let board = game.board();
    let area = (board.width() * board.height()) as u32;
    let white = game.score(Side::White);
    let black = game.score(Side::Black);

    assert_eq!(white + black + board.empty_count() as u32, area);
    assert_eq!(white as usize, board.count(Tile::White));
    assert_eq!(black as usize, board.count(Tile::Black));

    assert_eq!(*board.edges(), edges_from_scratch(board));

    let white_moves = oracle_moves(board, Side::White);
    let black_moves = oracle_moves(board, Side::Black);
    assert_eq!(game.is_over(), white_moves.is_empty() && black_moves.is_empty());

    match game.current_side() {
        Some(Side::White) => assert_eq!(game.legal_moves(), white_moves.as_slice()),
        Some(Side::Black) => assert_eq!(game.legal_moves(), black_moves.as_slice()),
        None => assert!(game.legal_moves().is_empty()),
    }
}

/// Apply one move and check the turn transition it reports
fn apply_and_check(game: &mut Game, at: Coord) -> MoveOutcome {
    let mover = game.current_side().expect("game in progress");
    let turn = game.turn();

    let outcome = game.apply_move(at).expect("legal move");
    assert!(outcome.captured >= 1);
    assert_eq!(outcome.flipped.len() as u32, outcome.captured);

    let turn_events = outcome.events.iter().filter(|e| e.is_turn_event()).count();
    assert_eq!(turn_events, 1);

    match outcome.turn_event() {
        Some(GameEvent::TurnEnded { side, next_side }) => {
            assert_eq!(*side, mover);
            assert_eq!(*next_side, mover.opponent());
            assert_eq!(game.current_side(), Some(mover.opponent()));
            assert!(!game.passed());
            assert_eq!(game.turn(), turn + 1);
        }
        Some(GameEvent::TurnPassed { side }) => {
            assert_eq!(*side, mover.opponent());
            assert_eq!(game.current_side(), Some(mover));
            assert!(game.passed());
            assert_eq!(game.turn(), turn + 1);
        }
        Some(GameEvent::GameOver { .. }) => {
            assert!(game.is_over());
            assert_eq!(game.turn(), turn);
        }
        other => panic!("unexpected turn event {:?}", other),
    }

    outcome
}

#[test]
fn test_opening_on_4x4() {
    let game = Game::new(4, 4).unwrap();

    assert_eq!(
        game.board().to_layout(),
        vec!["....", ".wb.", ".bw.", "...."]
    );
    assert_eq!(game.current_side(), Some(Side::White));
    assert_eq!(game.legal_moves().len(), 4);

    for &m in game.legal_moves() {
        assert_eq!(game.board().captures(Side::White, m).len(), 1);
    }
    assert_invariants(&game);
}

#[test]
fn test_first_capture_on_4x4() {
    let mut game = Game::new(4, 4).unwrap();
    let first = game.legal_moves()[0];

    let outcome = apply_and_check(&mut game, first);
    assert_eq!(outcome.captured, 1);
    assert_eq!(game.score(Side::White), 4);
    assert_eq!(game.score(Side::Black), 1);
    assert_eq!(game.current_side(), Some(Side::Black));
    assert_invariants(&game);
}

#[test]
fn test_odd_or_small_dimensions_rejected() {
    assert_eq!(
        Game::new(3, 4).unwrap_err(),
        GameError::InvalidDimensions {
            width: 3,
            height: 4
        }
    );
    assert!(Game::new(2, 4).is_err());
    assert!(Game::new(4, 5).is_err());
}

#[test]
fn test_forced_pass_at_start_leaves_board_unchanged() {
    let board = Board::from_layout(&["wbb.", "....", "....", "...."]).unwrap();
    let game = Game::from_position(board.clone(), Side::Black).unwrap();

    assert!(game.passed());
    assert_eq!(game.current_side(), Some(Side::White));
    assert_eq!(game.turn(), 2);
    assert_eq!(game.board(), &board);
    assert_invariants(&game);
}

#[test]
fn test_forced_pass_after_move() {
    let board = Board::from_layout(&["wbb.", "....", "wb..", "...."]).unwrap();
    let mut game = Game::from_position(board, Side::White).unwrap();
    assert_eq!(game.legal_moves(), &[Coord::new(3, 0), Coord::new(2, 2)]);

    // Closing the lower bracket leaves Black without a move
    let outcome = apply_and_check(&mut game, Coord::new(2, 2));
    assert_eq!(
        outcome.turn_event(),
        Some(&GameEvent::TurnPassed { side: Side::Black })
    );
    assert_eq!(game.current_side(), Some(Side::White));
    assert!(game.passed());
    assert_eq!(game.turn(), 2);
    assert_invariants(&game);

    // Taking the last black tiles ends the game
    let outcome = apply_and_check(&mut game, Coord::new(3, 0));
    assert_eq!(
        outcome.turn_event(),
        Some(&GameEvent::GameOver {
            result: GameResult::Win(Side::White),
            white_score: 7,
            black_score: 0,
        })
    );
    assert!(!game.passed());
    assert_invariants(&game);
}

#[test]
fn test_no_moves_for_either_side_ends_game() {
    let board = Board::from_layout(&["w...", "....", "....", "...b"]).unwrap();
    let mut game = Game::from_position(board, Side::White).unwrap();

    assert!(game.is_over());
    assert_eq!(game.result(), Some(GameResult::Draw));
    assert_eq!(game.apply_move(Coord::new(1, 1)), Err(GameError::GameOver));
    assert_eq!(
        game.play(Side::Black, Coord::new(1, 1)),
        Err(GameError::GameOver)
    );
    assert_invariants(&game);
}

#[test]
fn test_last_empty_cell_ends_game() {
    let board = Board::from_layout(&["wwww", "wwww", "wwww", "wb.b"]).unwrap();
    let mut game = Game::from_position(board, Side::White).unwrap();
    assert_eq!(game.legal_moves(), &[Coord::new(2, 3)]);

    apply_and_check(&mut game, Coord::new(2, 3));
    assert!(game.is_over());
    assert_eq!(game.score(Side::White), 15);
    assert_eq!(game.score(Side::Black), 1);
    assert_eq!(game.result(), Some(GameResult::Win(Side::White)));
    assert_eq!(game.apply_move(Coord::new(0, 0)), Err(GameError::GameOver));
}

#[test]
fn test_random_games_hold_invariants() {
    let sizes = [(4, 4), (4, 6), (6, 6), (8, 8), (10, 6)];

    for (i, &(width, height)) in sizes.iter().enumerate() {
        for seed in 0..4u64 {
            let mut game = Game::new(width, height).unwrap();
            let mut bot = RandomBot::with_seed(seed * 31 + i as u64);
            assert_invariants(&game);

            while !game.is_over() {
                let choice = bot
                    .choose_move(game.legal_moves(), game.board())
                    .unwrap();

                let probe = game.is_legal(choice);
                assert!(probe);
                assert_eq!(game.is_legal(choice), probe);

                apply_and_check(&mut game, choice);
                assert_invariants(&game);
            }

            let result = game.result().unwrap();
            let white = game.score(Side::White);
            let black = game.score(Side::Black);
            match result {
                GameResult::Win(Side::White) => assert!(white > black),
                GameResult::Win(Side::Black) => assert!(black > white),
                GameResult::Draw => assert_eq!(white, black),
            }
        }
    }
}

#[test]
fn test_game_values_are_independent() {
    let mut a = Game::new(8, 8).unwrap();
    let b = a.clone();

    let first = a.legal_moves()[0];
    a.apply_move(first).unwrap();

    assert_eq!(b.turn(), 1);
    assert_eq!(b.snapshot(), Game::new(8, 8).unwrap().snapshot());
    assert_ne!(a.snapshot(), b.snapshot());
}

#[test]
fn test_large_board_search_stays_on_the_frontier() {
    let mut game = Game::new(128, 128).unwrap();
    let mut bot = RandomBot::with_seed(2024).with_sample_limit(64);

    let mut played = 0;
    while played < 200 && !game.is_over() {
        let choice = bot
            .choose_move(game.legal_moves(), game.board())
            .unwrap();
        game.apply_move(choice).unwrap();
        played += 1;
    }

    let candidates = MoveGenerator::new(game.board()).candidate_count();
    let occupied = 4 + played;
    // Each occupied tile can border at most 8 empty cells
    assert!(candidates <= occupied * 8);
    assert!(candidates < 128 * 128 / 4);

    if let Some(side) = game.current_side() {
        assert_eq!(game.legal_moves(), oracle_moves(game.board(), side).as_slice());
    }
    assert_eq!(*game.board().edges(), edges_from_scratch(game.board()));
}

#[test]
fn test_full_game_on_wide_board() {
    let mut game = Game::new(32, 16).unwrap();
    let mut white = RandomBot::with_seed(5);
    let mut black = RandomBot::with_seed(6);

    let result = play_to_end(&mut game, &mut white, &mut black)
        .unwrap()
        .unwrap();

    assert_eq!(game.result(), Some(result));
    assert_invariants(&game);
}
