//! End-to-end game tests
//!
//! These tests drive a persisted game through complete scripted plays,
//! including time travel and restarts.

use tictac_core::{Board, GameStatus, Mark, Square};
use tictac_engine::{GameConfig, HistoryManager};
use tictac_persistence::{InMemoryStorage, PersistentStore};
use tictac_testing::{init_test_logging, play_moves, standard_scenarios};

fn new_game() -> HistoryManager<InMemoryStorage> {
    init_test_logging();
    HistoryManager::open(
        GameConfig::default(),
        PersistentStore::new(InMemoryStorage::new()),
    )
    .unwrap()
}

fn square(index: usize) -> Square {
    Square::new(index).unwrap()
}

#[test]
fn test_first_move() {
    let mut game = new_game();
    assert!(game.current_board().is_empty());

    assert!(game.select_square(square(0)));
    assert_eq!(game.current_board()[square(0)], Some(Mark::X));
    assert_eq!(game.status().to_string(), "Next player: O");
}

#[test]
fn test_top_row_win_blocks_further_moves() {
    let mut game = new_game();
    assert_eq!(play_moves(&mut game, &[0, 3, 1, 4, 2]), 5);

    assert_eq!(game.winner(), Some(Mark::X));
    assert_eq!(game.status().to_string(), "Winner: X");

    let before = game.state().clone();
    assert!(!game.select_square(square(5)));
    assert_eq!(game.state(), &before);
}

#[test]
fn test_full_board_without_line_is_draw() {
    let mut game = new_game();
    assert_eq!(play_moves(&mut game, &[0, 1, 2, 4, 3, 5, 7, 6, 8]), 9);

    assert!(game.current_board().is_full());
    assert_eq!(game.winner(), None);
    assert_eq!(game.status(), GameStatus::Draw);
    assert_eq!(game.status().to_string(), "Scratch: Cat's game");
}

#[test]
fn test_time_travel_then_new_move_discards_future() {
    let mut game = new_game();
    game.select_square(square(0));

    game.jump_to(0).unwrap();
    assert!(game.select_square(square(4)));

    assert_eq!(game.history().len(), 2);
    assert_eq!(game.cursor(), 1);
    let expected = Board::empty().with_mark(square(4), Mark::X);
    assert_eq!(game.current_board(), &expected);
}

#[test]
fn test_jump_forward_again_after_looking_back() {
    let mut game = new_game();
    play_moves(&mut game, &[0, 4, 8]);

    game.jump_to(1).unwrap();
    assert_eq!(game.status(), GameStatus::InProgress(Mark::O));

    game.jump_to(3).unwrap();
    assert_eq!(game.history().len(), 4);
    assert_eq!(game.current_board().marked(), 3);
}

#[test]
fn test_moves_list_tracks_cursor() {
    let mut game = new_game();
    play_moves(&mut game, &[0, 4]);
    game.jump_to(1).unwrap();

    let descriptions: Vec<String> = game.moves().into_iter().map(|m| m.description).collect();
    assert_eq!(
        descriptions,
        vec![
            "Go to game start".to_string(),
            "Go to move #1 (current)".to_string(),
            "Go to move #2".to_string(),
        ]
    );
}

#[test]
fn test_restart_after_win() {
    let mut game = new_game();
    play_moves(&mut game, &[0, 3, 1, 4, 2]);
    game.restart();

    assert_eq!(game.history().len(), 1);
    assert_eq!(game.cursor(), 0);
    assert!(game.select_square(square(5)));
}

#[test]
fn test_standard_scenarios() {
    let mut game = new_game();
    for scenario in standard_scenarios() {
        let result = scenario.run(&mut game);
        assert!(
            result.passed,
            "scenario '{}' ({}) ended with {} after {} applied / {} rejected",
            scenario.name, scenario.description, result.status, result.applied, result.rejected
        );
    }
}
