//! Estimation Hub server binary.
//!
//! Wires configuration, storage, the event bus, the WebSocket bridge
//! and the HTTP API together, then serves until shutdown.

use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, Router};
use http::HeaderValue;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use estimation_hub::adapters::auth::{JwtTokenVerifier, MockTokenVerifier};
use estimation_hub::adapters::events::InMemoryEventBus;
use estimation_hub::adapters::http::middleware::{auth_middleware, AuthState};
use estimation_hub::adapters::http::session::{session_routes, SessionHandlers};
use estimation_hub::adapters::storage::{InMemorySessionRepository, PostgresSessionRepository};
use estimation_hub::adapters::websocket::{RoomManager, SessionEventBridge, WebSocketState};
use estimation_hub::application::handlers::estimation::AddEstimationHandler;
use estimation_hub::application::handlers::session::{
    CreateSessionHandler, GetSessionHandler, InvalidateSessionHandler, JoinSessionHandler,
    LeaveSessionHandler,
};
use estimation_hub::application::handlers::task::{
    AddTaskHandler, ChangeTaskStatusHandler, DeleteTaskHandler,
};
use estimation_hub::config::AppConfig;
use estimation_hub::ports::{SessionRepository, TokenVerifier};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.server.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    config.validate()?;
    tracing::info!(environment = ?config.server.environment, "starting estimation hub");

    let repository = build_repository(&config).await?;
    let event_bus = Arc::new(InMemoryEventBus::new());
    let token_verifier = build_token_verifier(&config);

    let room_manager = Arc::new(RoomManager::new(config.channel.capacity));
    let bridge = SessionEventBridge::new_shared(
        room_manager.clone(),
        config.channel.broadcast_policy(),
    );
    bridge.register(event_bus.as_ref());

    let handlers = SessionHandlers {
        create_session: Arc::new(CreateSessionHandler::new(
            repository.clone(),
            event_bus.clone(),
        )),
        get_session: Arc::new(GetSessionHandler::new(repository.clone())),
        invalidate_session: Arc::new(InvalidateSessionHandler::new(
            repository.clone(),
            event_bus.clone(),
        )),
        join_session: Arc::new(JoinSessionHandler::new(
            repository.clone(),
            event_bus.clone(),
        )),
        leave_session: Arc::new(LeaveSessionHandler::new(
            repository.clone(),
            event_bus.clone(),
        )),
        add_task: Arc::new(AddTaskHandler::new(repository.clone(), event_bus.clone())),
        change_task_status: Arc::new(ChangeTaskStatusHandler::new(
            repository.clone(),
            event_bus.clone(),
        )),
        delete_task: Arc::new(DeleteTaskHandler::new(
            repository.clone(),
            event_bus.clone(),
        )),
        add_estimation: Arc::new(AddEstimationHandler::new(repository, event_bus)),
    };

    let ws_state = WebSocketState {
        room_manager: room_manager.clone(),
    };

    let auth_state: AuthState = token_verifier;
    let app = Router::new()
        .nest(
            "/estimation/v1/session",
            session_routes(handlers, ws_state),
        )
        .layer(middleware::from_fn_with_state(auth_state, auth_middleware))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&config))
                .layer(TimeoutLayer::new(Duration::from_secs(
                    config.server.request_timeout_secs,
                ))),
        );

    let addr = config.server.socket_addr()?;
    tracing::info!(%addr, "listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn build_repository(
    config: &AppConfig,
) -> Result<Arc<dyn SessionRepository>, Box<dyn std::error::Error>> {
    match &config.database.url {
        Some(url) => {
            let pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .acquire_timeout(config.database.acquire_timeout())
                .connect(url)
                .await?;
            let repository = PostgresSessionRepository::new(pool);
            repository.ensure_schema().await?;
            tracing::info!("using postgres session repository");
            Ok(Arc::new(repository))
        }
        None => {
            tracing::info!("no database configured, using in-memory session repository");
            Ok(Arc::new(InMemorySessionRepository::new()))
        }
    }
}

fn build_token_verifier(config: &AppConfig) -> Arc<dyn TokenVerifier> {
    match &config.auth.jwt_secret {
        Some(secret) => Arc::new(JwtTokenVerifier::new(secret)),
        None => {
            tracing::warn!("no JWT secret configured, using mock token verifier");
            Arc::new(MockTokenVerifier::new())
        }
    }
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins = config.server.cors_origins_list();
    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(parsed)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
