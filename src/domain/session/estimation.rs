//! Estimation value object.
//!
//! A single complexity vote cast by a session member against a task.

use crate::domain::foundation::{
    DomainError, EstimationId, TaskId, Timestamp, UserId,
};
use serde::{Deserialize, Serialize};

/// Highest allowed complexity value for a vote.
pub const MAX_COMPLEXITY: u32 = 100;

/// A complexity vote by one member on one task.
///
/// # Invariants
///
/// - `complexity` is in 1..=100
/// - at most one estimation per (task, voter) pair; the aggregate
///   enforces this by replacing earlier votes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Estimation {
    /// Unique identifier for this vote.
    id: EstimationId,

    /// Task the vote applies to.
    task_id: TaskId,

    /// Member who cast the vote.
    voter_id: UserId,

    /// Estimated complexity, 1 to 100.
    complexity: u32,

    /// When the vote was cast.
    cast_at: Timestamp,
}

impl Estimation {
    /// Create a new estimation.
    ///
    /// # Errors
    ///
    /// - `OutOfRange` if complexity is zero or above the maximum
    pub fn new(
        id: EstimationId,
        task_id: TaskId,
        voter_id: UserId,
        complexity: u32,
    ) -> Result<Self, DomainError> {
        if complexity == 0 || complexity > MAX_COMPLEXITY {
            return Err(DomainError::new(
                crate::domain::foundation::ErrorCode::OutOfRange,
                format!(
                    "Complexity must be between 1 and {}, got {}",
                    MAX_COMPLEXITY, complexity
                ),
            ));
        }

        Ok(Self {
            id,
            task_id,
            voter_id,
            complexity,
            cast_at: Timestamp::now(),
        })
    }

    /// Returns the estimation ID.
    pub fn id(&self) -> &EstimationId {
        &self.id
    }

    /// Returns the task this vote applies to.
    pub fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    /// Returns the voting member.
    pub fn voter_id(&self) -> &UserId {
        &self.voter_id
    }

    /// Returns the complexity value.
    pub fn complexity(&self) -> u32 {
        self.complexity
    }

    /// Returns when the vote was cast.
    pub fn cast_at(&self) -> &Timestamp {
        &self.cast_at
    }
}
