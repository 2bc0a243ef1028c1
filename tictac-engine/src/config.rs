/// Default key for the history sequence in the split layout.
pub const DEFAULT_HISTORY_KEY: &str = "tic-tac-toe:history";

/// Default key for the cursor in the split layout.
pub const DEFAULT_CURSOR_KEY: &str = "tic-tac-toe:step";

/// Default key for the combined layout.
pub const DEFAULT_GAME_KEY: &str = "tic-tac-toe:game";

/// How the (history, cursor) pair is laid out in storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageLayout {
    /// One entry holding `{"history": [...], "cursor": n}`
    Combined { key: String },
    /// Two independent entries: the history array and the cursor integer
    Split {
        history_key: String,
        cursor_key: String,
    },
}

impl StorageLayout {
    pub fn combined(key: impl Into<String>) -> Self {
        Self::Combined { key: key.into() }
    }

    pub fn split(history_key: impl Into<String>, cursor_key: impl Into<String>) -> Self {
        Self::Split {
            history_key: history_key.into(),
            cursor_key: cursor_key.into(),
        }
    }

    /// All keys this layout writes to.
    pub fn keys(&self) -> Vec<&str> {
        match self {
            Self::Combined { key } => vec![key.as_str()],
            Self::Split {
                history_key,
                cursor_key,
            } => vec![history_key.as_str(), cursor_key.as_str()],
        }
    }
}

impl Default for StorageLayout {
    fn default() -> Self {
        Self::split(DEFAULT_HISTORY_KEY, DEFAULT_CURSOR_KEY)
    }
}

#[derive(Debug, Clone)]
pub struct GameConfig {
    pub layout: StorageLayout,
    /// Treat persisted histories that break the ply invariants as corrupt
    pub validate_on_load: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            layout: StorageLayout::default(),
            validate_on_load: true,
        }
    }
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Config for a separately persisted game instance called `name`.
    ///
    /// ```rust
    /// use tictac_engine::{GameConfig, StorageLayout};
    ///
    /// let config = GameConfig::scoped("lobby-7");
    /// assert_eq!(
    ///     config.layout,
    ///     StorageLayout::split("tic-tac-toe:lobby-7:history", "tic-tac-toe:lobby-7:step")
    /// );
    /// ```
    pub fn scoped(name: &str) -> Self {
        Self::default().with_layout(StorageLayout::split(
            format!("tic-tac-toe:{}:history", name),
            format!("tic-tac-toe:{}:step", name),
        ))
    }

    pub fn with_layout(mut self, layout: StorageLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_combined_key(mut self, key: impl Into<String>) -> Self {
        self.layout = StorageLayout::combined(key);
        self
    }

    pub fn with_validate_on_load(mut self, validate: bool) -> Self {
        self.validate_on_load = validate;
        self
    }
}
