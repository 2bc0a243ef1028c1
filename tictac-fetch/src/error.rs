use thiserror::Error;

/// Errors a [`Fetcher`](crate::Fetcher) can settle with.
///
/// Cloneable so a rejected status can be read by any number of observers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Nothing exists under the requested name
    #[error("No data found for '{name}'")]
    NotFound { name: String },

    /// The request itself failed
    #[error("Request for '{name}' failed: {message}")]
    Failed { name: String, message: String },
}

impl FetchError {
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    pub fn failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Failed {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Name of the request that failed.
    pub fn name(&self) -> &str {
        match self {
            Self::NotFound { name } | Self::Failed { name, .. } => name.as_str(),
        }
    }
}
