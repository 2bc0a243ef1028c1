use crate::FetchError;

/// Where a named request stands.
///
/// A request starts `Pending` and settles into exactly one of `Resolved` or
/// `Rejected`. `Idle` means no name is being tracked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus<T> {
    Idle,
    Pending { name: String },
    Resolved { name: String, data: T },
    Rejected { name: String, error: FetchError },
}

impl<T> FetchStatus<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }

    /// True for `Resolved` and `Rejected`.
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Resolved { .. } | Self::Rejected { .. })
    }

    /// The name this status belongs to, if any.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Pending { name } | Self::Resolved { name, .. } | Self::Rejected { name, .. } => {
                Some(name.as_str())
            }
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Resolved { data, .. } => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            Self::Rejected { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl<T> Default for FetchStatus<T> {
    fn default() -> Self {
        Self::Idle
    }
}
