//! Session aggregate entity.
//!
//! Sessions are the top-level container for an estimation round.
//! They own the participating members, the tasks under estimation,
//! and every vote cast. All mutations go through the aggregate so the
//! invariants below hold at every commit point.
//!
//! # Concurrency
//!
//! The aggregate carries a monotonically increasing `version`. Every
//! successful mutation bumps it; repositories use the version for
//! compare-and-swap updates so concurrent writers cannot silently
//! overwrite each other.

use crate::domain::foundation::{
    DomainError, ErrorCode, EstimationId, Role, SessionId, SessionStatus, TaskId, TaskStatus,
    Timestamp, UserId,
};
use serde::{Deserialize, Serialize};

use super::estimation::Estimation;
use super::task::Task;

/// A participant in a session, with the role they joined under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    user_id: UserId,
    role: Role,
    joined_at: Timestamp,
}

impl Member {
    /// Creates a new member record.
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self {
            user_id,
            role,
            joined_at: Timestamp::now(),
        }
    }

    /// Returns the member's user ID.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the member's role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns when the member joined.
    pub fn joined_at(&self) -> &Timestamp {
        &self.joined_at
    }
}

/// Session aggregate - one estimation round with members, tasks, votes.
///
/// # Invariants
///
/// - `id` is globally unique
/// - an invalidated or expired session rejects every mutation
/// - at most one member entry per user; rejoining updates the role
/// - at most one estimation per (task, voter) pair
/// - task status changes follow `TaskStatus::can_transition_to`
/// - `version` increases by exactly one per successful mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Unique identifier for this session.
    id: SessionId,

    /// Current status (Active or Invalidated).
    status: SessionStatus,

    /// When the session stops accepting mutations.
    expires_at: Timestamp,

    /// Participants, at most one entry per user.
    members: Vec<Member>,

    /// Tasks under estimation, owned by the session.
    tasks: Vec<Task>,

    /// Votes cast against tasks in this session.
    estimations: Vec<Estimation>,

    /// Optimistic concurrency token.
    version: u64,

    /// When the session was created.
    created_at: Timestamp,

    /// When the session was last updated.
    updated_at: Timestamp,
}

impl Session {
    /// Create a new active session.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if `expires_at` is not in the future
    pub fn new(id: SessionId, expires_at: Timestamp) -> Result<Self, DomainError> {
        let now = Timestamp::now();
        if !expires_at.is_after(&now) {
            return Err(DomainError::validation(
                "expires_at",
                "Expiry must be in the future",
            ));
        }

        Ok(Self {
            id,
            status: SessionStatus::Active,
            expires_at,
            members: Vec::new(),
            tasks: Vec::new(),
            estimations: Vec::new(),
            version: 0,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a session from persistence (no validation, no events).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: SessionId,
        status: SessionStatus,
        expires_at: Timestamp,
        members: Vec<Member>,
        tasks: Vec<Task>,
        estimations: Vec<Estimation>,
        version: u64,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            status,
            expires_at,
            members,
            tasks,
            estimations,
            version,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the session ID.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Returns the current status.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Returns when the session expires.
    pub fn expires_at(&self) -> &Timestamp {
        &self.expires_at
    }

    /// Returns the current members.
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Returns the tasks in this session.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns all estimations cast in this session.
    pub fn estimations(&self) -> &[Estimation] {
        &self.estimations
    }

    /// Returns the optimistic concurrency token.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Returns when the session was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns when the session was last updated.
    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Returns true if the expiry has passed.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_before(&Timestamp::now())
    }

    /// Looks up a member by user ID.
    pub fn member(&self, user_id: &UserId) -> Option<&Member> {
        self.members.iter().find(|m| m.user_id() == user_id)
    }

    /// Looks up a task by ID.
    pub fn task(&self, task_id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id() == task_id)
    }

    /// Returns the single task currently open for voting, if any.
    pub fn open_task(&self) -> Option<&Task> {
        self.tasks.iter().find(|t| t.accepts_votes())
    }

    /// Returns all estimations for a task.
    pub fn estimations_for_task(&self, task_id: &TaskId) -> Vec<&Estimation> {
        self.estimations
            .iter()
            .filter(|e| e.task_id() == task_id)
            .collect()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Invalidate the session, rejecting all further mutations.
    ///
    /// # Errors
    ///
    /// - `SessionInvalidated` if already invalidated
    pub fn invalidate(&mut self) -> Result<(), DomainError> {
        if self.status == SessionStatus::Invalidated {
            return Err(DomainError::new(
                ErrorCode::SessionInvalidated,
                "Session is already invalidated",
            ));
        }

        self.status = SessionStatus::Invalidated;
        self.touch();
        Ok(())
    }

    /// Add a member, or update their role if they already joined.
    ///
    /// Returns true if a new member record was created.
    ///
    /// # Errors
    ///
    /// - `SessionInvalidated` if the session is not active
    pub fn join(&mut self, user_id: UserId, role: Role) -> Result<bool, DomainError> {
        self.ensure_active()?;

        if let Some(member) = self.members.iter_mut().find(|m| m.user_id == user_id) {
            member.role = role;
            self.touch();
            return Ok(false);
        }

        self.members.push(Member::new(user_id, role));
        self.touch();
        Ok(true)
    }

    /// Remove a member from the session.
    ///
    /// # Errors
    ///
    /// - `SessionInvalidated` if the session is not active
    /// - `MemberNotFound` if the user is not a member
    pub fn leave(&mut self, user_id: &UserId) -> Result<Member, DomainError> {
        self.ensure_active()?;

        let pos = self
            .members
            .iter()
            .position(|m| m.user_id() == user_id)
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::MemberNotFound,
                    format!("User {} is not a member of this session", user_id),
                )
            })?;

        let member = self.members.remove(pos);
        self.touch();
        Ok(member)
    }

    /// Add a task to the session.
    ///
    /// # Errors
    ///
    /// - `SessionInvalidated` if the session is not active
    pub fn add_task(&mut self, task: Task) -> Result<(), DomainError> {
        self.ensure_active()?;

        if self.tasks.iter().any(|t| t.id() == task.id()) {
            return Err(DomainError::validation(
                "task_id",
                "A task with this ID already exists in the session",
            ));
        }

        self.tasks.push(task);
        self.touch();
        Ok(())
    }

    /// Move a task to a new status.
    ///
    /// Returns the previous status on success.
    ///
    /// # Errors
    ///
    /// - `SessionInvalidated` if the session is not active
    /// - `TaskNotFound` if the task is not in this session
    /// - `InvalidStateTransition` if the transition is not allowed
    pub fn change_task_status(
        &mut self,
        task_id: &TaskId,
        new_status: TaskStatus,
    ) -> Result<TaskStatus, DomainError> {
        self.ensure_active()?;

        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id() == task_id)
            .ok_or_else(|| Self::task_not_found(task_id))?;

        let old_status = task.change_status(new_status)?;
        self.touch();
        Ok(old_status)
    }

    /// Remove a task and all estimations cast against it.
    ///
    /// # Errors
    ///
    /// - `SessionInvalidated` if the session is not active
    /// - `TaskNotFound` if the task is not in this session
    pub fn remove_task(&mut self, task_id: &TaskId) -> Result<Task, DomainError> {
        self.ensure_active()?;

        let pos = self
            .tasks
            .iter()
            .position(|t| t.id() == task_id)
            .ok_or_else(|| Self::task_not_found(task_id))?;

        let task = self.tasks.remove(pos);
        self.estimations.retain(|e| e.task_id() != task_id);
        self.touch();
        Ok(task)
    }

    /// Record a complexity vote by a member.
    ///
    /// When `task_id` is omitted the vote goes to the single task
    /// currently open for voting. An earlier vote by the same member on
    /// the same task is replaced.
    ///
    /// # Errors
    ///
    /// - `SessionInvalidated` if the session is not active
    /// - `MemberNotFound` if the voter has not joined the session
    /// - `TaskNotFound` if the named task is not in this session
    /// - `NoOpenTask` if no task is open and none was named
    /// - `InvalidStateTransition` if the named task is not open
    /// - `OutOfRange` if complexity is outside 1..=100
    pub fn add_estimation(
        &mut self,
        voter_id: UserId,
        task_id: Option<TaskId>,
        complexity: u32,
    ) -> Result<Estimation, DomainError> {
        self.ensure_active()?;

        if self.member(&voter_id).is_none() {
            return Err(DomainError::new(
                ErrorCode::MemberNotFound,
                format!("User {} is not a member of this session", voter_id),
            ));
        }

        let task = match task_id {
            Some(ref id) => self.task(id).ok_or_else(|| Self::task_not_found(id))?,
            None => self.open_task().ok_or_else(|| {
                DomainError::new(
                    ErrorCode::NoOpenTask,
                    "No task is currently open for voting",
                )
            })?,
        };

        if !task.accepts_votes() {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Task in status {} does not accept votes", task.status()),
            ));
        }

        let target_task_id = *task.id();
        let estimation = Estimation::new(
            EstimationId::new(),
            target_task_id,
            voter_id.clone(),
            complexity,
        )?;

        self.estimations
            .retain(|e| !(e.task_id() == &target_task_id && e.voter_id() == &voter_id));
        self.estimations.push(estimation.clone());
        self.touch();
        Ok(estimation)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Validates that the session still accepts mutations.
    fn ensure_active(&self) -> Result<(), DomainError> {
        if !self.status.is_mutable() {
            return Err(DomainError::new(
                ErrorCode::SessionInvalidated,
                "Session has been invalidated",
            ));
        }
        if self.is_expired() {
            return Err(DomainError::new(
                ErrorCode::SessionInvalidated,
                "Session has expired",
            ));
        }
        Ok(())
    }

    fn task_not_found(task_id: &TaskId) -> DomainError {
        DomainError::new(
            ErrorCode::TaskNotFound,
            format!("Task {} not found in this session", task_id),
        )
    }

    fn touch(&mut self) {
        self.version += 1;
        self.updated_at = Timestamp::now();
    }
}
