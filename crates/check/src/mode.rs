//! Run-level options

use crate::checksum::ChecksumMode;
use bitcheck_events::CheckPhases;
use bitcheck_types::WarningKind;
use serde::Serialize;

/// Checksum behaviour requested on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    #[default]
    Verify,
    Add,
    /// Recompute everything without asking
    Force,
    /// Recompute everything once the user agrees to overwrite
    Update,
}

impl RunMode {
    /// Pick the mode from CLI flags; `force` wins over `update` and `add`
    #[must_use]
    pub fn from_flags(add: bool, force: bool, update: bool) -> Self {
        if force {
            Self::Force
        } else if update {
            Self::Update
        } else if add {
            Self::Add
        } else {
            Self::Verify
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Verify => "verify",
            Self::Add => "add",
            Self::Force => "force",
            Self::Update => "update",
        }
    }

    /// Checksum mode once the overwrite confirmation is known
    #[must_use]
    pub fn resolve(self, overwrite_confirmed: bool) -> ChecksumMode {
        match self {
            Self::Verify => ChecksumMode::Verify,
            Self::Add => ChecksumMode::Add,
            Self::Force => ChecksumMode::Force,
            Self::Update if overwrite_confirmed => ChecksumMode::Force,
            Self::Update => ChecksumMode::Verify,
        }
    }
}

/// Which phases each file goes through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunPhases {
    ChecksumOnly,
    IntegrityOnly,
    Both,
}

impl RunPhases {
    /// `integrity_only` skips checksums; otherwise `integrity_enabled`
    /// decides whether validators run alongside them.
    #[must_use]
    pub fn select(integrity_only: bool, integrity_enabled: bool) -> Self {
        match (integrity_only, integrity_enabled) {
            (true, _) => Self::IntegrityOnly,
            (false, true) => Self::Both,
            (false, false) => Self::ChecksumOnly,
        }
    }

    #[must_use]
    pub fn checksum(self) -> bool {
        self != Self::IntegrityOnly
    }

    #[must_use]
    pub fn integrity(self) -> bool {
        self != Self::ChecksumOnly
    }
}

impl From<RunPhases> for CheckPhases {
    fn from(phases: RunPhases) -> Self {
        match phases {
            RunPhases::ChecksumOnly => Self::ChecksumOnly,
            RunPhases::IntegrityOnly => Self::IntegrityOnly,
            RunPhases::Both => Self::Both,
        }
    }
}

/// Everything a run needs besides its collaborators
#[derive(Debug, Clone)]
pub struct CheckOptions {
    pub mode: RunMode,
    pub phases: RunPhases,
    /// Files processed concurrently (at least 1)
    pub jobs: usize,
    /// Warning kinds dropped before reporting
    pub ignore: Vec<WarningKind>,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            mode: RunMode::Verify,
            phases: RunPhases::Both,
            jobs: 1,
            ignore: Vec::new(),
        }
    }
}
