//! Meeting lifecycle states.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ParseStatusError;

/// Lifecycle state of a meeting.
///
/// ```text
/// scheduled ──▶ in_progress ──▶ completed
///     │              │
///     └──────┬───────┘
///            ▼
///        cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeetingStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl MeetingStatus {
    /// States in which credentials may exist and check-ins are accepted.
    pub const OPEN: [MeetingStatus; 2] = [MeetingStatus::Scheduled, MeetingStatus::InProgress];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn is_open(self) -> bool {
        Self::OPEN.contains(&self)
    }

    pub fn is_terminal(self) -> bool {
        !self.is_open()
    }

    /// States a meeting may be in immediately before moving to `self`.
    /// Empty for `Scheduled`, which is only ever an initial state.
    pub fn allowed_predecessors(self) -> &'static [MeetingStatus] {
        match self {
            Self::Scheduled => &[],
            Self::InProgress => &[Self::Scheduled],
            Self::Completed | Self::Cancelled => &Self::OPEN,
        }
    }

    pub fn can_transition_to(self, next: MeetingStatus) -> bool {
        next.allowed_predecessors().contains(&self)
    }
}

impl fmt::Display for MeetingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MeetingStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(Self::Scheduled),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(ParseStatusError {
                kind: "meeting status",
                value: other.to_owned(),
            }),
        }
    }
}
