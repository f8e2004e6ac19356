//! TaskStatus enum and the status transition table for tasks.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a task under estimation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Open for estimation votes.
    #[default]
    Open,
    /// Votes collected, result under review.
    Evaluated,
    /// Parked; can reopen for another poll.
    Suspended,
    /// Closed for good.
    Ended,
}

impl TaskStatus {
    /// All statuses, for exhaustive checks.
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Open,
        TaskStatus::Evaluated,
        TaskStatus::Suspended,
        TaskStatus::Ended,
    ];

    /// Validates a transition from this status to another.
    ///
    /// Valid transitions:
    /// - Open -> Evaluated (evaluate)
    /// - Open -> Suspended (suspend)
    /// - Evaluated -> Ended (close)
    /// - Suspended -> Open (poll again)
    ///
    /// Ended is terminal. Everything else is rejected.
    pub fn can_transition_to(&self, target: &TaskStatus) -> bool {
        use TaskStatus::*;
        matches!(
            (self, target),
            (Open, Evaluated) | (Open, Suspended) | (Evaluated, Ended) | (Suspended, Open)
        )
    }

    /// Returns true if the task accepts estimation votes.
    pub fn accepts_votes(&self) -> bool {
        matches!(self, TaskStatus::Open)
    }

    /// Returns true if no transition leaves this status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Ended)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TaskStatus::Open => "Open",
            TaskStatus::Evaluated => "Evaluated",
            TaskStatus::Suspended => "Suspended",
            TaskStatus::Ended => "Ended",
        };
        write!(f, "{}", s)
    }
}
