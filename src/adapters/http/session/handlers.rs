//! HTTP endpoint handlers for the session API.
//!
//! Thin layer: parse the request, call the matching application
//! handler, translate the result into a response. All domain rules
//! live below this layer.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::estimation::{AddEstimationCommand, AddEstimationHandler};
use crate::application::handlers::session::{
    CreateSessionCommand, CreateSessionHandler, GetSessionHandler, GetSessionQuery,
    InvalidateSessionCommand, InvalidateSessionHandler, JoinSessionCommand, JoinSessionHandler,
    LeaveSessionCommand, LeaveSessionHandler,
};
use crate::application::handlers::task::{
    AddTaskCommand, AddTaskHandler, ChangeTaskStatusCommand, ChangeTaskStatusHandler,
    DeleteTaskCommand, DeleteTaskHandler,
};
use crate::domain::foundation::{SessionId, Timestamp, UserId};
use crate::domain::session::SessionError;

use super::dto::{
    AddEstimationRequest, AddTaskRequest, ChangeTaskStatusRequest, CreateSessionRequest,
    ErrorResponse, EstimationResponse, JoinSessionRequest, MemberResponse, SessionResponse,
    TaskResponse,
};

/// Default session lifetime when the client does not ask for one.
const DEFAULT_SESSION_TTL_SECS: u64 = 4 * 3600;

/// Shared state for all session endpoints.
#[derive(Clone)]
pub struct SessionHandlers {
    pub create_session: Arc<CreateSessionHandler>,
    pub get_session: Arc<GetSessionHandler>,
    pub invalidate_session: Arc<InvalidateSessionHandler>,
    pub join_session: Arc<JoinSessionHandler>,
    pub leave_session: Arc<LeaveSessionHandler>,
    pub add_task: Arc<AddTaskHandler>,
    pub change_task_status: Arc<ChangeTaskStatusHandler>,
    pub delete_task: Arc<DeleteTaskHandler>,
    pub add_estimation: Arc<AddEstimationHandler>,
}

/// `POST /newSession`
pub async fn create_session(
    State(handlers): State<SessionHandlers>,
    request: Option<Json<CreateSessionRequest>>,
) -> Response {
    let Json(request) = request.unwrap_or_default();
    let expires_at = request
        .expires_at
        .unwrap_or_else(|| Timestamp::now().plus_secs(DEFAULT_SESSION_TTL_SECS));

    match handlers
        .create_session
        .handle(CreateSessionCommand { expires_at })
        .await
    {
        Ok(result) => {
            (StatusCode::OK, Json(SessionResponse::from(&result.session))).into_response()
        }
        Err(e) => session_error_response(e),
    }
}

/// `GET /:id`
pub async fn get_session(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers.get_session.handle(GetSessionQuery { session_id }).await {
        Ok(session) => (StatusCode::OK, Json(SessionResponse::from(&session))).into_response(),
        Err(e) => session_error_response(e),
    }
}

/// `PUT /:id/invalidate`
pub async fn invalidate_session(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .invalidate_session
        .handle(InvalidateSessionCommand { session_id })
        .await
    {
        Ok(_) => (StatusCode::OK, Json(true)).into_response(),
        Err(e) => session_error_response(e),
    }
}

/// `POST /:id/entry`
///
/// The joining identity comes from the bearer token, not the body.
pub async fn join_session(
    State(handlers): State<SessionHandlers>,
    RequireAuth(user): RequireAuth,
    Path(session_id): Path<String>,
    Json(request): Json<JoinSessionRequest>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let user_id = user.id.clone();
    let cmd = JoinSessionCommand {
        session_id,
        user_id: user.id,
        role: request.role,
    };
    match handlers.join_session.handle(cmd).await {
        Ok(result) => {
            let member = result
                .session
                .members()
                .iter()
                .find(|m| m.user_id() == &user_id)
                .map(MemberResponse::from);
            match member {
                Some(member) => (StatusCode::CREATED, Json(member)).into_response(),
                None => internal_error_response(),
            }
        }
        Err(e) => session_error_response(e),
    }
}

/// `PUT /:id/leaveSession/:user_id`
pub async fn leave_session(
    State(handlers): State<SessionHandlers>,
    Path((session_id, user_id)): Path<(String, String)>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let user_id = match UserId::new(user_id) {
        Ok(id) => id,
        Err(e) => return bad_request_response(e.to_string()),
    };

    match handlers
        .leave_session
        .handle(LeaveSessionCommand { session_id, user_id })
        .await
    {
        Ok(_) => (StatusCode::OK, Json(true)).into_response(),
        Err(e) => session_error_response(e),
    }
}

/// `POST /:id/task`
pub async fn add_task(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<String>,
    Json(request): Json<AddTaskRequest>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = AddTaskCommand {
        session_id,
        title: request.title,
        url: request.url,
        description: request.description,
    };
    match handlers.add_task.handle(cmd).await {
        Ok(result) => match result.session.task(&result.task_id) {
            Some(task) => (StatusCode::OK, Json(TaskResponse::from(task))).into_response(),
            None => internal_error_response(),
        },
        Err(e) => session_error_response(e),
    }
}

/// `PUT /:id/task/status`
pub async fn change_task_status(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<String>,
    Json(request): Json<ChangeTaskStatusRequest>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let task_id = request.id;
    let cmd = ChangeTaskStatusCommand {
        session_id,
        task_id,
        new_status: request.status,
    };
    match handlers.change_task_status.handle(cmd).await {
        Ok(result) => match result.session.task(&task_id) {
            Some(task) => (StatusCode::OK, Json(TaskResponse::from(task))).into_response(),
            None => internal_error_response(),
        },
        Err(e) => session_error_response(e),
    }
}

/// `DELETE /:id/task/:task_id`
pub async fn delete_task(
    State(handlers): State<SessionHandlers>,
    Path((session_id, task_id)): Path<(String, String)>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let task_id = match task_id.parse() {
        Ok(id) => id,
        Err(_) => return bad_request_response("Task id must be a UUID"),
    };

    match handlers
        .delete_task
        .handle(DeleteTaskCommand { session_id, task_id })
        .await
    {
        Ok(_) => StatusCode::OK.into_response(),
        Err(e) => session_error_response(e),
    }
}

/// `POST /:id/estimation`
pub async fn add_estimation(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<String>,
    Json(request): Json<AddEstimationRequest>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let voter_id = match UserId::new(request.vote_by) {
        Ok(id) => id,
        Err(e) => return bad_request_response(e.to_string()),
    };

    let cmd = AddEstimationCommand {
        session_id,
        voter_id,
        task_id: request.task_id,
        complexity: request.complexity,
    };
    match handlers.add_estimation.handle(cmd).await {
        Ok(result) => (
            StatusCode::CREATED,
            Json(EstimationResponse::from(&result.estimation)),
        )
            .into_response(),
        Err(e) => session_error_response(e),
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn parse_session_id(raw: &str) -> Result<SessionId, Response> {
    raw.parse()
        .map_err(|_| bad_request_response("Session id must be a UUID"))
}

fn bad_request_response(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::bad_request(message)),
    )
        .into_response()
}

fn internal_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new("INTERNAL_ERROR", "Internal server error")),
    )
        .into_response()
}

/// Maps domain errors onto the HTTP status space.
fn session_error_response(error: SessionError) -> Response {
    let status = match &error {
        SessionError::NotFound(_)
        | SessionError::TaskNotFound(_)
        | SessionError::MemberNotFound(_) => StatusCode::NOT_FOUND,
        SessionError::NotActive(_)
        | SessionError::InvalidTransition(_)
        | SessionError::NoOpenTask
        | SessionError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
        SessionError::Unauthorized => StatusCode::UNAUTHORIZED,
        SessionError::Conflict => StatusCode::CONFLICT,
        SessionError::Infrastructure(detail) => {
            tracing::error!(detail = %detail, "request failed on infrastructure error");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let body = if status == StatusCode::INTERNAL_SERVER_ERROR {
        ErrorResponse::new("INTERNAL_ERROR", "Internal server error")
    } else {
        ErrorResponse::new(error.code().to_string(), error.message())
    };

    (status, Json(body)).into_response()
}
