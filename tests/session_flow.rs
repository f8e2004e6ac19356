//! End-to-end tests for the estimation session flow.
//!
//! These tests drive the application handlers against the in-memory
//! adapters and verify:
//! 1. The full session lifecycle (create, join, task walk, votes, invalidate)
//! 2. Exactly one `task.created.v1` event per successful task creation
//! 3. Live fan-out through the event bridge into session rooms
//! 4. Concurrent votes surviving the version check

use std::sync::Arc;
use std::time::Duration;

use estimation_hub::adapters::events::InMemoryEventBus;
use estimation_hub::adapters::storage::InMemorySessionRepository;
use estimation_hub::adapters::websocket::{
    BroadcastPolicy, ClientId, RoomManager, SessionEventBridge, SessionEventKind,
};
use estimation_hub::application::handlers::estimation::{
    AddEstimationCommand, AddEstimationHandler,
};
use estimation_hub::application::handlers::session::{
    CreateSessionCommand, CreateSessionHandler, GetSessionHandler, GetSessionQuery,
    InvalidateSessionCommand, InvalidateSessionHandler, JoinSessionCommand, JoinSessionHandler,
    LeaveSessionCommand, LeaveSessionHandler,
};
use estimation_hub::application::handlers::task::{
    AddTaskCommand, AddTaskHandler, ChangeTaskStatusCommand, ChangeTaskStatusHandler,
    DeleteTaskCommand, DeleteTaskHandler,
};
use estimation_hub::domain::foundation::{Role, SessionStatus, TaskStatus, Timestamp, UserId};
use estimation_hub::domain::session::SessionError;

// =============================================================================
// Test Infrastructure
// =============================================================================

struct Stack {
    repository: Arc<InMemorySessionRepository>,
    bus: Arc<InMemoryEventBus>,
    create_session: CreateSessionHandler,
    get_session: GetSessionHandler,
    invalidate_session: InvalidateSessionHandler,
    join_session: JoinSessionHandler,
    leave_session: LeaveSessionHandler,
    add_task: AddTaskHandler,
    change_task_status: ChangeTaskStatusHandler,
    delete_task: DeleteTaskHandler,
    add_estimation: AddEstimationHandler,
}

fn stack() -> Stack {
    let repository = Arc::new(InMemorySessionRepository::new());
    let bus = Arc::new(InMemoryEventBus::new());
    let repo: Arc<dyn estimation_hub::ports::SessionRepository> = repository.clone();
    let publisher: Arc<dyn estimation_hub::ports::EventPublisher> = bus.clone();

    Stack {
        repository,
        bus: bus.clone(),
        create_session: CreateSessionHandler::new(repo.clone(), publisher.clone()),
        get_session: GetSessionHandler::new(repo.clone()),
        invalidate_session: InvalidateSessionHandler::new(repo.clone(), publisher.clone()),
        join_session: JoinSessionHandler::new(repo.clone(), publisher.clone()),
        leave_session: LeaveSessionHandler::new(repo.clone(), publisher.clone()),
        add_task: AddTaskHandler::new(repo.clone(), publisher.clone()),
        change_task_status: ChangeTaskStatusHandler::new(repo.clone(), publisher.clone()),
        delete_task: DeleteTaskHandler::new(repo.clone(), publisher.clone()),
        add_estimation: AddEstimationHandler::new(repo, publisher),
    }
}

fn user(id: &str) -> UserId {
    UserId::new(id).unwrap()
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn full_session_lifecycle() {
    let stack = stack();

    // Create a session and have two members join.
    let created = stack
        .create_session
        .handle(CreateSessionCommand {
            expires_at: Timestamp::now().plus_secs(3600),
        })
        .await
        .unwrap();
    let session_id = *created.session.id();

    for (id, role) in [("alice", Role::Moderator), ("bob", Role::Voter)] {
        stack
            .join_session
            .handle(JoinSessionCommand {
                session_id,
                user_id: user(id),
                role,
            })
            .await
            .unwrap();
    }

    // Add a task; both members vote on it.
    let added = stack
        .add_task
        .handle(AddTaskCommand {
            session_id,
            title: "Implement login".to_string(),
            url: None,
            description: None,
        })
        .await
        .unwrap();
    let task_id = added.task_id;

    for (id, complexity) in [("alice", 3), ("bob", 8)] {
        stack
            .add_estimation
            .handle(AddEstimationCommand {
                session_id,
                voter_id: user(id),
                task_id: Some(task_id),
                complexity,
            })
            .await
            .unwrap();
    }

    // Walk the task through its states and delete it.
    for status in [TaskStatus::Evaluated, TaskStatus::Ended] {
        stack
            .change_task_status
            .handle(ChangeTaskStatusCommand {
                session_id,
                task_id,
                new_status: status,
            })
            .await
            .unwrap();
    }
    stack
        .delete_task
        .handle(DeleteTaskCommand {
            session_id,
            task_id,
        })
        .await
        .unwrap();

    // The deleted task is gone for both status changes and re-deletion.
    let err = stack
        .change_task_status
        .handle(ChangeTaskStatusCommand {
            session_id,
            task_id,
            new_status: TaskStatus::Open,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, SessionError::TaskNotFound(_)));
    let err = stack
        .delete_task
        .handle(DeleteTaskCommand {
            session_id,
            task_id,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, SessionError::TaskNotFound(_)));

    // One member leaves, then the session ends.
    stack
        .leave_session
        .handle(LeaveSessionCommand {
            session_id,
            user_id: user("bob"),
        })
        .await
        .unwrap();
    stack
        .invalidate_session
        .handle(InvalidateSessionCommand { session_id })
        .await
        .unwrap();

    // A second invalidation fails; the session stays readable.
    let err = stack
        .invalidate_session
        .handle(InvalidateSessionCommand { session_id })
        .await
        .unwrap_err();
    assert!(matches!(err, SessionError::NotActive(_)));

    let session = stack
        .get_session
        .handle(GetSessionQuery { session_id })
        .await
        .unwrap();
    assert_eq!(session.status(), SessionStatus::Invalidated);
    assert_eq!(session.members().len(), 1);
    assert!(session.tasks().is_empty());
    assert!(session.estimations().is_empty());

    // The whole flow left one session behind.
    assert_eq!(stack.repository.len().await, 1);
}

#[tokio::test]
async fn exactly_one_broadcast_per_created_task() {
    let stack = stack();

    let created = stack
        .create_session
        .handle(CreateSessionCommand {
            expires_at: Timestamp::now().plus_secs(3600),
        })
        .await
        .unwrap();
    let session_id = *created.session.id();

    stack
        .add_task
        .handle(AddTaskCommand {
            session_id,
            title: "Size the API".to_string(),
            url: None,
            description: None,
        })
        .await
        .unwrap();

    // A rejected creation publishes nothing.
    let err = stack
        .add_task
        .handle(AddTaskCommand {
            session_id,
            title: "   ".to_string(),
            url: None,
            description: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, SessionError::ValidationFailed { .. }));

    let events = stack.bus.events_of_type("task.created.v1");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].payload["title"], "Size the API");
}

#[tokio::test]
async fn task_events_fan_out_to_session_room() {
    let stack = stack();
    let room_manager = Arc::new(RoomManager::with_default_capacity());
    let bridge = SessionEventBridge::new_shared(room_manager.clone(), BroadcastPolicy::all());
    bridge.register(stack.bus.as_ref());

    let created = stack
        .create_session
        .handle(CreateSessionCommand {
            expires_at: Timestamp::now().plus_secs(3600),
        })
        .await
        .unwrap();
    let session_id = *created.session.id();

    let mut rx = room_manager.join(&session_id, ClientId::new()).await;

    stack
        .add_task
        .handle(AddTaskCommand {
            session_id,
            title: "Live update".to_string(),
            url: None,
            description: None,
        })
        .await
        .unwrap();

    let update = tokio::time::timeout(Duration::from_secs(1), rx.recv())
        .await
        .expect("no update within timeout")
        .expect("room channel closed");
    assert_eq!(update.kind, SessionEventKind::TaskCreated);
    assert_eq!(update.data["title"], "Live update");
}

#[tokio::test]
async fn concurrent_votes_from_two_members_both_persist() {
    let stack = stack();

    let created = stack
        .create_session
        .handle(CreateSessionCommand {
            expires_at: Timestamp::now().plus_secs(3600),
        })
        .await
        .unwrap();
    let session_id = *created.session.id();

    for id in ["alice", "bob"] {
        stack
            .join_session
            .handle(JoinSessionCommand {
                session_id,
                user_id: user(id),
                role: Role::Voter,
            })
            .await
            .unwrap();
    }
    let task_id = stack
        .add_task
        .handle(AddTaskCommand {
            session_id,
            title: "Contested task".to_string(),
            url: None,
            description: None,
        })
        .await
        .unwrap()
        .task_id;

    let add_estimation = Arc::new(stack.add_estimation);
    let first = {
        let handler = add_estimation.clone();
        tokio::spawn(async move {
            handler
                .handle(AddEstimationCommand {
                    session_id,
                    voter_id: user("alice"),
                    task_id: Some(task_id),
                    complexity: 5,
                })
                .await
        })
    };
    let second = {
        let handler = add_estimation.clone();
        tokio::spawn(async move {
            handler
                .handle(AddEstimationCommand {
                    session_id,
                    voter_id: user("bob"),
                    task_id: Some(task_id),
                    complexity: 13,
                })
                .await
        })
    };
    first.await.unwrap().unwrap();
    second.await.unwrap().unwrap();

    let session = stack
        .get_session
        .handle(GetSessionQuery { session_id })
        .await
        .unwrap();
    assert_eq!(session.estimations_for_task(&task_id).len(), 2);
    assert_eq!(stack.bus.events_of_type("estimation.added.v1").len(), 2);
}
