use tictac_core::{Codec, GameStatus, Mark, Square, StorageBackend};
use tictac_engine::HistoryManager;
use tracing::info;

/// A scripted game: squares played in order and the status expected after.
#[derive(Debug, Clone)]
pub struct GameScenario {
    pub name: &'static str,
    pub description: &'static str,
    pub moves: Vec<usize>,
    pub expected_status: GameStatus,
    /// Moves from `moves` that must be ignored
    pub expected_rejections: usize,
}

#[derive(Debug, Clone)]
pub struct ScenarioResult {
    pub name: &'static str,
    pub status: GameStatus,
    pub applied: usize,
    pub rejected: usize,
    pub passed: bool,
}

/// Play `moves` on `game`, returning how many were applied.
///
/// # Panics
/// Panics if a move index is not a board square; scenarios are test data.
pub fn play_moves<B, C>(game: &mut HistoryManager<B, C>, moves: &[usize]) -> usize
where
    B: StorageBackend,
    C: Codec,
{
    moves
        .iter()
        .filter(|&&index| {
            let square = Square::new(index).expect("scenario move must be a board square");
            game.select_square(square)
        })
        .count()
}

impl GameScenario {
    pub fn run<B, C>(&self, game: &mut HistoryManager<B, C>) -> ScenarioResult
    where
        B: StorageBackend,
        C: Codec,
    {
        info!("Running scenario '{}': {}", self.name, self.description);
        game.restart();
        let applied = play_moves(game, &self.moves);
        let rejected = self.moves.len() - applied;
        let status = game.status();
        let passed = status == self.expected_status && rejected == self.expected_rejections;

        info!(
            "Scenario '{}': status={}, applied={}, rejected={}, passed={}",
            self.name, status, applied, rejected, passed
        );

        ScenarioResult {
            name: self.name,
            status,
            applied,
            rejected,
            passed,
        }
    }
}

pub fn standard_scenarios() -> Vec<GameScenario> {
    vec![
        GameScenario {
            name: "first_move",
            description: "X opens in the corner",
            moves: vec![0],
            expected_status: GameStatus::InProgress(Mark::O),
            expected_rejections: 0,
        },
        GameScenario {
            name: "top_row_win",
            description: "X completes the top row; the trailing move is ignored",
            moves: vec![0, 3, 1, 4, 2, 5],
            expected_status: GameStatus::Won(Mark::X),
            expected_rejections: 1,
        },
        GameScenario {
            name: "diagonal_win_for_o",
            description: "O takes the anti-diagonal",
            moves: vec![0, 2, 1, 4, 8, 6],
            expected_status: GameStatus::Won(Mark::O),
            expected_rejections: 0,
        },
        GameScenario {
            name: "cats_game",
            description: "All nine squares filled without a line",
            moves: vec![0, 1, 2, 4, 3, 5, 7, 6, 8],
            expected_status: GameStatus::Draw,
            expected_rejections: 0,
        },
        GameScenario {
            name: "occupied_squares",
            description: "Repeated clicks on taken squares change nothing",
            moves: vec![4, 4, 0, 0, 4],
            expected_status: GameStatus::InProgress(Mark::X),
            expected_rejections: 3,
        },
    ]
}
