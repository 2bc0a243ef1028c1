use crate::config::{GameConfig, StorageLayout};
use crate::history::{GameHistory, MoveEntry, StoredGame};
use tictac_core::{
    initial_history, Board, Codec, GameStatus, History, JsonCodec, Mark, Result, Square,
    StorageBackend,
};
use tictac_persistence::PersistentStore;
use tracing::{debug, info, warn};

/// Persisted time-travel game.
///
/// Owns a [`GameHistory`] and a [`PersistentStore`], and is the only way to
/// change the history or cursor. Every committed change (a move, a jump or a
/// restart) is followed by a save of the full (history, cursor) pair before
/// the call returns.
///
/// Storage write failures never fail the operation: the in-memory state stays
/// correct, the failure is logged, and the next change (or an explicit
/// [`flush`](Self::flush)) writes the whole state again.
///
/// # Examples
///
/// ```rust
/// use tictac_engine::{GameConfig, HistoryManager};
/// use tictac_core::Square;
/// use tictac_persistence::{InMemoryStorage, PersistentStore};
///
/// let storage = InMemoryStorage::new();
/// let mut game = HistoryManager::open(GameConfig::default(), PersistentStore::new(storage.clone())).unwrap();
/// game.select_square(Square::new(0).unwrap());
/// assert_eq!(game.status().to_string(), "Next player: O");
///
/// // A second manager on the same storage picks the game up where it was
/// let reloaded = HistoryManager::open(GameConfig::default(), PersistentStore::new(storage)).unwrap();
/// assert_eq!(reloaded.cursor(), 1);
/// ```
#[derive(Debug)]
pub struct HistoryManager<B, C = JsonCodec> {
    config: GameConfig,
    store: PersistentStore<B, C>,
    state: GameHistory,
    dirty: bool,
}

impl<B, C> HistoryManager<B, C>
where
    B: StorageBackend,
    C: Codec,
{
    /// Load the game from `store`, falling back to a fresh game.
    ///
    /// Missing or corrupt entries yield the start state. A persisted cursor
    /// outside its history is clamped to the latest snapshot. The loaded
    /// state is written back immediately.
    ///
    /// # Errors
    /// * Returns the backend error if an entry could not be read. Nothing is
    ///   written, so the stored game is intact for a later attempt.
    pub fn open(config: GameConfig, store: PersistentStore<B, C>) -> Result<Self> {
        let state = load_state(&config, &store).map_err(|e| {
            warn!("Could not read persisted game, leaving storage untouched: {}", e);
            e
        })?;
        debug!(
            "Opened game: snapshots={}, cursor={}",
            state.len(),
            state.cursor()
        );

        let mut manager = Self {
            config,
            store,
            state,
            dirty: false,
        };
        manager.persist();
        Ok(manager)
    }

    /// Play the next mover's mark on `square`.
    ///
    /// Returns `false` and changes nothing if the current board already has a
    /// winner or the square is occupied.
    pub fn select_square(&mut self, square: Square) -> bool {
        let mover = self.state.next_mover();
        if !self.state.select_square(square) {
            debug!("Ignored move on square {}", square);
            if self.dirty {
                self.persist();
            }
            return false;
        }

        debug!(
            "{} played square {}, cursor={}",
            mover,
            square,
            self.state.cursor()
        );
        self.persist();
        true
    }

    /// Show the snapshot at `step` without discarding anything.
    ///
    /// # Errors
    /// * `StepOutOfRange` if `step` is not an index into the history; the
    ///   state is left unchanged
    pub fn jump_to(&mut self, step: usize) -> Result<()> {
        self.state.jump_to(step)?;
        debug!("Jumped to step {}", step);
        self.persist();
        Ok(())
    }

    /// Discard the whole history and start over.
    pub fn restart(&mut self) {
        self.state.restart();
        info!("Game restarted");
        self.persist();
    }

    /// Move the persisted game to a new storage layout.
    ///
    /// The entries under the current layout are removed and the current
    /// state is written under the new one.
    pub fn rekey(&mut self, layout: StorageLayout) -> Result<()> {
        if layout == self.config.layout {
            return Ok(());
        }

        let old = std::mem::replace(&mut self.config.layout, layout);
        if let Err(e) = self.write_state() {
            self.config.layout = old;
            return Err(e);
        }
        for key in old.keys() {
            if !self.config.layout.keys().contains(&key) {
                self.store.remove(key)?;
            }
        }

        info!("Rekeyed game {:?} -> {:?}", old, self.config.layout);
        self.dirty = false;
        Ok(())
    }

    /// Retry a failed write.
    pub fn flush(&mut self) -> Result<()> {
        self.write_state()?;
        self.dirty = false;
        Ok(())
    }

    /// True when the last write failed and has not been retried successfully.
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    pub fn state(&self) -> &GameHistory {
        &self.state
    }

    pub fn history(&self) -> &[Board] {
        self.state.history()
    }

    pub fn cursor(&self) -> usize {
        self.state.cursor()
    }

    pub fn current_board(&self) -> &Board {
        self.state.current_board()
    }

    pub fn next_mover(&self) -> Mark {
        self.state.next_mover()
    }

    pub fn winner(&self) -> Option<Mark> {
        self.state.winner()
    }

    pub fn status(&self) -> GameStatus {
        self.state.status()
    }

    pub fn moves(&self) -> Vec<MoveEntry> {
        self.state.moves()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn store(&self) -> &PersistentStore<B, C> {
        &self.store
    }

    fn persist(&mut self) {
        match self.write_state() {
            Ok(()) => self.dirty = false,
            Err(e) => {
                warn!("Failed to persist game state, will retry: {}", e);
                self.dirty = true;
            }
        }
    }

    fn write_state(&self) -> Result<()> {
        match &self.config.layout {
            StorageLayout::Combined { key } => self.store.save(key, &self.state),
            StorageLayout::Split {
                history_key,
                cursor_key,
            } => {
                // History first: a cursor is only ever stored next to a
                // history at least as long as the one it was taken from
                self.store.save(history_key, self.state.history())?;
                self.store.save(cursor_key, &self.state.cursor())
            }
        }
    }
}

/// Absent and corrupt entries fall back to the start state; a failed read is
/// returned as an error.
fn load_state<B, C>(config: &GameConfig, store: &PersistentStore<B, C>) -> Result<GameHistory>
where
    B: StorageBackend,
    C: Codec,
{
    let (history, cursor) = match &config.layout {
        StorageLayout::Combined { key } => match store.try_load::<StoredGame>(key)? {
            Some(stored) => (stored.history, stored.cursor),
            None => return Ok(GameHistory::new()),
        },
        StorageLayout::Split {
            history_key,
            cursor_key,
        } => {
            let history: History = store
                .try_load(history_key)?
                .unwrap_or_else(initial_history);
            let cursor = store.try_load(cursor_key)?.unwrap_or(0usize);
            (history, cursor)
        }
    };

    if history.is_empty() {
        warn!("Persisted history is empty, starting a new game");
        discard(config, store);
        return Ok(GameHistory::new());
    }

    if config.validate_on_load {
        if let Err(e) = tictac_core::validate_history(&history) {
            warn!("Persisted history rejected, starting a new game: {}", e);
            discard(config, store);
            return Ok(GameHistory::new());
        }
    }

    let tip = history.len() - 1;
    let cursor = if cursor > tip {
        warn!(
            "Persisted cursor {} outside history of {} snapshots, clamping to {}",
            cursor,
            history.len(),
            tip
        );
        tip
    } else {
        cursor
    };

    match GameHistory::from_parts(history, cursor) {
        Ok(game) => Ok(game),
        Err(e) => {
            warn!("Could not rebuild persisted game: {}", e);
            Ok(GameHistory::new())
        }
    }
}

fn discard<B, C>(config: &GameConfig, store: &PersistentStore<B, C>)
where
    B: StorageBackend,
    C: Codec,
{
    for key in config.layout.keys() {
        if let Err(e) = store.remove(key) {
            warn!("Failed to remove rejected entry key={}: {}", key, e);
        }
    }
}
