// Copyright (C) 2026 Homebook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod live;

use axum::{
    Json, Router,
    extract::{FromRef, Path, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use homebook_api::{
    ApiError, AvailabilityPolicy, CatalogProvider, CommandRequest, ConfirmationView,
    ErrorResponse, InMemoryCatalog, OpenSessionRequest, SessionRegistry, SessionView,
    SimulatedBackend, SubmissionError, parse_date, parse_time, translate_domain_error,
};
use homebook_audit::{Actor, ActorKind, Cause};
use homebook_domain::{
    Addon, DEFAULT_WINDOW_DAYS, DomainError, Provider, Service, ServiceId, SessionId,
};
use live::{LiveEventBroadcaster, live_events_handler};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use time::{Date, OffsetDateTime, Time};
use tracing::{error, info};

/// Homebook Server - HTTP server for the Homebook booking system
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Path to a JSON catalog document. If not provided, uses the built-in catalog.
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Simulated booking backend latency in milliseconds
    #[arg(long, default_value_t = 1200)]
    latency_ms: u64,

    /// Day offset (1-based) to black out; repeatable
    #[arg(long = "blackout", value_name = "OFFSET")]
    blackout: Vec<u16>,

    /// Time already booked, as HH:MM; repeatable
    #[arg(long = "booked", value_name = "HH:MM", value_parser = parse_clock)]
    booked: Vec<Time>,

    /// Time to flag as popular, as HH:MM; repeatable
    #[arg(long = "popular", value_name = "HH:MM", value_parser = parse_clock)]
    popular: Vec<Time>,

    /// Number of days offered after today
    #[arg(long, default_value_t = DEFAULT_WINDOW_DAYS)]
    window_days: u16,
}

impl Args {
    /// Builds the availability policy, falling back to the defaults for any
    /// set that was not given on the command line.
    fn availability_policy(&self) -> AvailabilityPolicy {
        let defaults: AvailabilityPolicy = AvailabilityPolicy::default();
        AvailabilityPolicy {
            window_days: self.window_days,
            blackout_offsets: if self.blackout.is_empty() {
                defaults.blackout_offsets
            } else {
                self.blackout.iter().copied().collect()
            },
            booked_times: if self.booked.is_empty() {
                defaults.booked_times
            } else {
                self.booked.iter().copied().collect::<BTreeSet<Time>>()
            },
            popular_times: if self.popular.is_empty() {
                defaults.popular_times
            } else {
                self.popular.iter().copied().collect::<BTreeSet<Time>>()
            },
        }
    }
}

fn parse_clock(value: &str) -> Result<Time, String> {
    parse_time("time", value).map_err(|e| e.to_string())
}

type Registry = SessionRegistry<InMemoryCatalog, SimulatedBackend, LiveEventBroadcaster>;

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// Open booking sessions.
    registry: Arc<Registry>,
    /// Confirmation fan-out to WebSocket clients.
    broadcaster: Arc<LiveEventBroadcaster>,
    /// Source of request correlation identifiers.
    requests: Arc<AtomicU64>,
}

impl AppState {
    fn new(catalog: InMemoryCatalog, policy: AvailabilityPolicy, backend: SimulatedBackend) -> Self {
        let broadcaster: Arc<LiveEventBroadcaster> = Arc::new(LiveEventBroadcaster::new());
        Self {
            registry: Arc::new(SessionRegistry::new(
                Arc::new(catalog),
                policy,
                Arc::new(backend),
                Arc::clone(&broadcaster),
            )),
            broadcaster,
            requests: Arc::new(AtomicU64::new(1)),
        }
    }

    /// The actor and cause for a request against a session.
    fn attribution(&self, session_id: SessionId, description: String) -> (Actor, Cause) {
        let request: u64 = self.requests.fetch_add(1, Ordering::Relaxed);
        (
            Actor::new(format!("session-{session_id}"), ActorKind::Customer),
            Cause::new(format!("http-{request}"), description),
        )
    }
}

impl FromRef<AppState> for Arc<LiveEventBroadcaster> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.broadcaster)
    }
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error body.
    body: ErrorResponse,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::ServiceNotFound { .. } | ApiError::SessionNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            ApiError::DomainRuleViolation { .. } | ApiError::IncompleteStep { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::SubmissionInFlight { .. } => StatusCode::CONFLICT,
            ApiError::CatalogLoad { .. } | ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            body: ErrorResponse::from_api_error(&err),
        }
    }
}

impl From<SubmissionError> for HttpError {
    fn from(err: SubmissionError) -> Self {
        let status: StatusCode = match err {
            SubmissionError::AlreadyInFlight
            | SubmissionError::SlotNoLongerAvailable
            | SubmissionError::Discarded => StatusCode::CONFLICT,
            SubmissionError::NotReady { .. } | SubmissionError::InvalidDraft { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            SubmissionError::Backend { .. } => StatusCode::BAD_GATEWAY,
            SubmissionError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            body: ErrorResponse::message(err.to_string()),
        }
    }
}

/// Fails with `ServiceNotFound` unless the service is in the catalog.
fn require_service(state: &AppState, id: &ServiceId) -> Result<(), HttpError> {
    if state.registry.catalog().service(id).is_some() {
        Ok(())
    } else {
        Err(HttpError::from(translate_domain_error(
            DomainError::UnknownService(id.clone()),
        )))
    }
}

/// Handler for GET `/api/services`.
async fn handle_list_services(AxumState(state): AxumState<AppState>) -> Json<Vec<Service>> {
    Json(state.registry.catalog().list_services())
}

/// Handler for GET `/api/services/{id}/addons`.
async fn handle_list_addons(
    AxumState(state): AxumState<AppState>,
    Path(service_id): Path<String>,
) -> Result<Json<Vec<Addon>>, HttpError> {
    let id: ServiceId = ServiceId::new(&service_id);
    require_service(&state, &id)?;
    Ok(Json(state.registry.catalog().list_addons(&id)))
}

/// Handler for GET `/api/services/{id}/providers`.
async fn handle_list_providers(
    AxumState(state): AxumState<AppState>,
    Path(service_id): Path<String>,
) -> Result<Json<Vec<Provider>>, HttpError> {
    let id: ServiceId = ServiceId::new(&service_id);
    require_service(&state, &id)?;
    Ok(Json(state.registry.catalog().list_providers(&id)))
}

/// Handler for POST `/api/sessions`.
///
/// Opens a booking session. Availability is generated from `today` when
/// given, otherwise from the current UTC date.
async fn handle_open_session(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<OpenSessionRequest>,
) -> Result<(StatusCode, Json<SessionView>), HttpError> {
    let today: Date = match req.today.as_deref() {
        Some(value) => parse_date("today", value)?,
        None => OffsetDateTime::now_utc().date(),
    };

    let orchestrator = state
        .registry
        .open(&ServiceId::new(&req.service_id), today)
        .await?;
    let session = orchestrator.session().await;

    Ok((
        StatusCode::CREATED,
        Json(SessionView::new(&session, orchestrator.is_submitting())),
    ))
}

/// Handler for GET `/api/sessions/{id}`.
async fn handle_get_session(
    AxumState(state): AxumState<AppState>,
    Path(session_id): Path<u64>,
) -> Result<Json<SessionView>, HttpError> {
    let orchestrator = state.registry.get(SessionId::new(session_id)).await?;
    let session = orchestrator.session().await;
    Ok(Json(SessionView::new(&session, orchestrator.is_submitting())))
}

/// Handler for POST `/api/sessions/{id}/commands`.
///
/// Refused selections and blocked advances succeed; the returned view shows
/// the unchanged draft and any field errors.
async fn handle_command(
    AxumState(state): AxumState<AppState>,
    Path(session_id): Path<u64>,
    Json(req): Json<CommandRequest>,
) -> Result<Json<SessionView>, HttpError> {
    let session_id: SessionId = SessionId::new(session_id);
    let orchestrator = state.registry.get(session_id).await?;
    let command = req.into_command()?;
    let (actor, cause) = state.attribution(
        session_id,
        format!("HTTP {} on session {session_id}", command.name()),
    );

    let result = orchestrator.execute(command, actor, cause).await?;
    Ok(Json(SessionView::new(
        &result.session,
        orchestrator.is_submitting(),
    )))
}

/// Handler for POST `/api/sessions/{id}/submit`.
async fn handle_submit(
    AxumState(state): AxumState<AppState>,
    Path(session_id): Path<u64>,
) -> Result<Json<ConfirmationView>, HttpError> {
    let session_id: SessionId = SessionId::new(session_id);
    let orchestrator = state.registry.get(session_id).await?;
    let (actor, cause) =
        state.attribution(session_id, format!("HTTP submit on session {session_id}"));

    let confirmation = orchestrator.submit(actor, cause).await?;
    Ok(Json(ConfirmationView::from(&confirmation)))
}

/// Handler for DELETE `/api/sessions/{id}`.
///
/// Cancels the draft and destroys the session.
async fn handle_close_session(
    AxumState(state): AxumState<AppState>,
    Path(session_id): Path<u64>,
) -> Result<StatusCode, HttpError> {
    let session_id: SessionId = SessionId::new(session_id);
    let (actor, cause) =
        state.attribution(session_id, format!("HTTP cancel on session {session_id}"));
    state.registry.close(session_id, actor, cause).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/services", get(handle_list_services))
        .route("/api/services/{id}/addons", get(handle_list_addons))
        .route("/api/services/{id}/providers", get(handle_list_providers))
        .route("/api/sessions", post(handle_open_session))
        .route(
            "/api/sessions/{id}",
            get(handle_get_session).delete(handle_close_session),
        )
        .route("/api/sessions/{id}/commands", post(handle_command))
        .route("/api/sessions/{id}/submit", post(handle_submit))
        .route("/api/live", get(live_events_handler))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Homebook Server");

    let catalog: InMemoryCatalog = if let Some(path) = &args.catalog {
        info!("Loading catalog from: {}", path.display());
        InMemoryCatalog::from_json(&std::fs::read_to_string(path)?)?
    } else {
        info!("Using built-in catalog");
        InMemoryCatalog::builtin()?
    };
    info!(services = catalog.list_services().len(), "Catalog loaded");

    let policy: AvailabilityPolicy = args.availability_policy();
    info!(
        window_days = policy.window_days,
        blackout = ?policy.blackout_offsets,
        booked = policy.booked_times.len(),
        "Availability policy"
    );

    let backend: SimulatedBackend = SimulatedBackend::new(Duration::from_millis(args.latency_ms));
    let app: Router = build_router(AppState::new(catalog, policy, backend));

    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
