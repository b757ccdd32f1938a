//! Endpoint handlers and router assembly.
//!
//! The surface mirrors a small LCA database server:
//!
//! - `GET  /api/database/health` — archive load status
//! - `GET  /api/database/processes` — list all processes (lazy-loads)
//! - `GET  /api/database/methods` — list all impact methods (lazy-loads)
//! - `GET  /api/database/process/{id}` — one process, 404 when unknown
//! - `GET  /api/olca/health` — service liveness
//! - `GET  /api/olca/version` — component versions
//! - `POST /api/olca/database/connect` — connection stub, nothing is opened
//! - `GET  /api/olca/models/{type}` — canned model list stub
//! - `POST /api/olca/calculate` — calculation stub, echoes its input
//!
//! Listing endpoints trigger the archive open on first use; the health
//! endpoint is a pure query and never loads.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use karbyn_core::{ModelKind, ProjectedEntity};
use karbyn_store::Listing;

use crate::error::{Error, Result};
use crate::state::AppState;

/// Archive load status, reported without touching the archive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseHealth {
    /// `"healthy"` once the archive is loaded, `"unhealthy"` before.
    pub status: String,
    /// Whether an archive handle is currently held.
    pub database_loaded: bool,
}

/// Service liveness response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceHealth {
    /// Always `"OK"` when the process is serving.
    pub status: String,
    /// Service name.
    pub service: String,
    /// Unix timestamp in milliseconds.
    pub timestamp: i64,
}

/// Component version report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionInfo {
    /// Server crate version.
    pub server: String,
    /// Archive format the store understands.
    pub archive_format: String,
}

/// Body for the connection stub.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectRequest {
    /// Path the caller would like opened.
    pub path: Option<String>,
}

/// Canned connection response; no database is actually opened.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectReceipt {
    /// Always true for the stub.
    pub success: bool,
    /// Notes that the connection was simulated.
    pub message: String,
    /// The requested path, echoed back.
    pub path: Option<String>,
}

/// Canned model list for one type name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelStubList {
    /// The type name from the request path, echoed back.
    #[serde(rename = "type")]
    pub model_type: String,
    /// Placeholder model names.
    pub models: Vec<String>,
    /// Number of placeholder models.
    pub count: usize,
}

/// Canned calculation response; no impact-assessment math is performed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationReceipt {
    /// Always true for the stub.
    pub success: bool,
    /// Generated id for the (not actually run) calculation.
    pub calculation_id: String,
    /// Always `"completed"`.
    pub status: String,
    /// The request body, echoed back.
    pub request: Value,
}

/// `GET /api/database/health`
pub async fn database_health(State(state): State<AppState>) -> Json<DatabaseHealth> {
    let loaded = state.catalog.is_loaded();
    Json(DatabaseHealth {
        status: if loaded { "healthy" } else { "unhealthy" }.to_string(),
        database_loaded: loaded,
    })
}

/// `GET /api/database/processes`
pub async fn list_processes(State(state): State<AppState>) -> Result<Json<Listing>> {
    list_kind(&state, ModelKind::Process)
}

/// `GET /api/database/methods`
pub async fn list_methods(State(state): State<AppState>) -> Result<Json<Listing>> {
    list_kind(&state, ModelKind::ImpactMethod)
}

fn list_kind(state: &AppState, kind: ModelKind) -> Result<Json<Listing>> {
    state.catalog.ensure_loaded()?;
    let listing = state.catalog.list(kind)?;
    if listing.skipped > 0 {
        tracing::warn!(kind = %kind, skipped = listing.skipped, "listing skipped entries");
    }
    Ok(Json(listing))
}

/// `GET /api/database/process/{id}`
pub async fn process_details(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProjectedEntity>> {
    state.catalog.ensure_loaded()?;
    match state.catalog.get(ModelKind::Process, &id)? {
        Some(entity) => Ok(Json(entity)),
        None => Err(Error::NotFound {
            kind: ModelKind::Process,
            id,
        }),
    }
}

/// `GET /api/olca/health`
pub async fn service_health() -> Json<ServiceHealth> {
    Json(ServiceHealth {
        status: "OK".to_string(),
        service: "karbyn-server".to_string(),
        timestamp: Utc::now().timestamp_millis(),
    })
}

/// `GET /api/olca/version`
pub async fn version() -> Json<VersionInfo> {
    Json(VersionInfo {
        server: env!("CARGO_PKG_VERSION").to_string(),
        archive_format: "openLCA JSON-LD zip".to_string(),
    })
}

/// `POST /api/olca/database/connect`
///
/// Stub: acknowledges the request without opening anything. The archive the
/// catalog reads from is fixed at startup.
pub async fn connect_database(Json(request): Json<ConnectRequest>) -> Json<ConnectReceipt> {
    Json(ConnectReceipt {
        success: true,
        message: "Database connection simulated".to_string(),
        path: request.path,
    })
}

/// `GET /api/olca/models/{type}`
///
/// Stub: returns a canned model list for any type name.
pub async fn list_model_stubs(Path(model_type): Path<String>) -> Json<ModelStubList> {
    let models = vec![
        "Example model 1".to_string(),
        "Example model 2".to_string(),
    ];
    let count = models.len();
    Json(ModelStubList {
        model_type,
        models,
        count,
    })
}

/// `POST /api/olca/calculate`
///
/// Stub: acknowledges the request and echoes it back without running any
/// impact assessment.
pub async fn calculate(Json(request): Json<Value>) -> Json<CalculationReceipt> {
    Json(CalculationReceipt {
        success: true,
        calculation_id: format!("calc_{}", Utc::now().timestamp_millis()),
        status: "completed".to_string(),
        request,
    })
}

/// Assemble the full router around shared state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/database/health", get(database_health))
        .route("/api/database/processes", get(list_processes))
        .route("/api/database/methods", get(list_methods))
        .route("/api/database/process/{id}", get(process_details))
        .route("/api/olca/health", get(service_health))
        .route("/api/olca/version", get(version))
        .route("/api/olca/database/connect", post(connect_database))
        .route("/api/olca/models/{type}", get(list_model_stubs))
        .route("/api/olca/calculate", post(calculate))
        .with_state(state)
}

// ============================================================================
// Tests
// ============================================================================
