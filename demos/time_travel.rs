use anyhow::Context;
use std::path::PathBuf;
use tictac_core::Square;
use tictac_engine::{GameConfig, HistoryManager};
use tictac_persistence::{FileSystemStorage, PersistentStore};
use tracing::info;

fn print_game(game: &HistoryManager<FileSystemStorage>) {
    println!("{}", game.current_board());
    println!("{}", game.status());
    for entry in game.moves() {
        println!("  {}. {}", entry.step, entry.description);
    }
    println!();
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let data_dir = std::env::var_os("TICTAC_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("tictac-demo"));
    info!("Using data directory {}", data_dir.display());

    let storage = FileSystemStorage::new(&data_dir).context("opening game storage")?;
    let mut game = HistoryManager::open(GameConfig::default(), PersistentStore::new(storage.clone()))?;
    game.restart();

    for index in [0, 3, 1, 4] {
        game.select_square(Square::new(index)?);
    }
    println!("After four moves:");
    print_game(&game);

    game.jump_to(2)?;
    println!("Back at move #2:");
    print_game(&game);

    game.select_square(Square::new(8)?);
    println!("New move from move #2 drops the old future:");
    print_game(&game);

    drop(game);
    let reloaded = HistoryManager::open(GameConfig::default(), PersistentStore::new(storage))?;
    println!("Reloaded from {}:", data_dir.display());
    print_game(&reloaded);

    Ok(())
}
