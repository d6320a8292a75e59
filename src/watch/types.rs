use std::path::PathBuf;

use rustc_hash::FxHashMap;

/// What happened to a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ChangeKind {
    Created,
    Modified,
    Removed,
}

impl ChangeKind {
    pub(super) fn label(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Modified => "modified",
            Self::Removed => "removed",
        }
    }
}

/// Debounced changes, one entry per path.
pub(super) type Changes = FxHashMap<PathBuf, ChangeKind>;

/// Which targets a batch of changes rebuilds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(super) struct RebuildPlan {
    pub(super) main: bool,
    pub(super) ui: bool,
}

impl RebuildPlan {
    pub(super) const ALL: Self = Self {
        main: true,
        ui: true,
    };

    pub(super) fn is_empty(self) -> bool {
        !self.main && !self.ui
    }

    pub(super) fn merge(&mut self, other: Self) {
        self.main |= other.main;
        self.ui |= other.ui;
    }
}
