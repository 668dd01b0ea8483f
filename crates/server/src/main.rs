// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use clap::Parser;
use profit_share_api::{
    AddManualDetailRequest, AddManualDetailResponse, ApiError, AuditTrailResponse,
    CreateDistributionRequest, CreateDistributionResponse, DistributionSummaryResponse,
    ListDistributionsResponse, RemoveDetailRequest, RemoveDetailResponse,
    RunAutomaticAllocationRequest, RunAutomaticAllocationResponse, UpdateTotalProfitRequest,
    UpdateTotalProfitResponse, add_manual_detail, create_distribution, get_distribution_audit,
    get_distribution_summary, list_distributions, remove_detail, run_automatic_allocation,
    update_total_profit,
};
use profit_share_audit::{Actor, Cause};
use profit_share_persistence::Persistence;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

/// Profit Share Server - HTTP server for the profit distribution engine
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,
}

/// Application state shared across handlers.
///
/// Every operation locks the persistence handle for its whole duration,
/// so two operations on the same distribution never interleave.
#[derive(Clone)]
struct AppState {
    persistence: Arc<Mutex<Persistence>>,
}

/// Who is acting and why. Flattened into every write request body.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct Attribution {
    /// The actor ID performing this action.
    actor_id: String,
    /// The kind of actor (operator, system, ...).
    actor_type: String,
    /// The cause ID for this action.
    cause_id: String,
    /// The cause description.
    cause_description: String,
}

impl Attribution {
    fn into_parts(self) -> (Actor, Cause) {
        (
            Actor::new(self.actor_id, self.actor_type),
            Cause::new(self.cause_id, self.cause_description),
        )
    }
}

/// API request for creating a distribution.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateDistributionApiRequest {
    #[serde(flatten)]
    attribution: Attribution,
    /// The period label (e.g. "2026-Q1").
    period: String,
    /// The distribution date (ISO 8601, `YYYY-MM-DD`).
    distribution_date: String,
    /// The profit to distribute, in whole currency units.
    total_profit: i64,
}

/// API request for adding a manual detail row.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct AddManualDetailApiRequest {
    #[serde(flatten)]
    attribution: Attribution,
    /// The participant receiving the share.
    participant_id: i64,
    /// The share, in percent.
    percentage: f64,
}

/// API request for correcting a distribution's total profit.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct UpdateTotalProfitApiRequest {
    #[serde(flatten)]
    attribution: Attribution,
    /// The new total profit.
    total_profit: i64,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Handler for POST `/distributions`.
async fn handle_create_distribution(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateDistributionApiRequest>,
) -> Result<Json<CreateDistributionResponse>, HttpError> {
    info!(
        actor_id = %req.attribution.actor_id,
        period = %req.period,
        total_profit = req.total_profit,
        "Handling create_distribution request"
    );

    let (actor, cause) = req.attribution.into_parts();
    let request: CreateDistributionRequest = CreateDistributionRequest {
        period: req.period,
        distribution_date: req.distribution_date,
        total_profit: req.total_profit,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: CreateDistributionResponse =
        create_distribution(&mut persistence, &request, actor, cause)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/distributions`.
async fn handle_list_distributions(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListDistributionsResponse>, HttpError> {
    info!("Handling list_distributions request");

    let mut persistence = app_state.persistence.lock().await;
    let response: ListDistributionsResponse = list_distributions(&mut persistence)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/distributions/{distribution_id}`.
///
/// Returns the distribution with its detail rows and totals.
async fn handle_get_distribution(
    AxumState(app_state): AxumState<AppState>,
    Path(distribution_id): Path<i64>,
) -> Result<Json<DistributionSummaryResponse>, HttpError> {
    info!(distribution_id, "Handling get_distribution request");

    let mut persistence = app_state.persistence.lock().await;
    let response: DistributionSummaryResponse =
        get_distribution_summary(&mut persistence, distribution_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for PUT `/distributions/{distribution_id}/total_profit`.
async fn handle_update_total_profit(
    AxumState(app_state): AxumState<AppState>,
    Path(distribution_id): Path<i64>,
    Json(req): Json<UpdateTotalProfitApiRequest>,
) -> Result<Json<UpdateTotalProfitResponse>, HttpError> {
    info!(
        actor_id = %req.attribution.actor_id,
        distribution_id,
        total_profit = req.total_profit,
        "Handling update_total_profit request"
    );

    let (actor, cause) = req.attribution.into_parts();
    let request: UpdateTotalProfitRequest = UpdateTotalProfitRequest {
        distribution_id,
        total_profit: req.total_profit,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: UpdateTotalProfitResponse =
        update_total_profit(&mut persistence, request, actor, cause)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/distributions/{distribution_id}/details`.
async fn handle_add_manual_detail(
    AxumState(app_state): AxumState<AppState>,
    Path(distribution_id): Path<i64>,
    Json(req): Json<AddManualDetailApiRequest>,
) -> Result<Json<AddManualDetailResponse>, HttpError> {
    info!(
        actor_id = %req.attribution.actor_id,
        distribution_id,
        participant_id = req.participant_id,
        percentage = req.percentage,
        "Handling add_manual_detail request"
    );

    let (actor, cause) = req.attribution.into_parts();
    let request: AddManualDetailRequest = AddManualDetailRequest {
        distribution_id,
        participant_id: req.participant_id,
        percentage: req.percentage,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: AddManualDetailResponse =
        add_manual_detail(&mut persistence, &request, actor, cause)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/distributions/{distribution_id}/allocate`.
///
/// Replaces every detail row of the distribution. Callers are expected
/// to have confirmed the replacement with the user.
async fn handle_run_automatic_allocation(
    AxumState(app_state): AxumState<AppState>,
    Path(distribution_id): Path<i64>,
    Json(req): Json<Attribution>,
) -> Result<Json<RunAutomaticAllocationResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        distribution_id,
        "Handling run_automatic_allocation request"
    );

    let (actor, cause) = req.into_parts();
    let request: RunAutomaticAllocationRequest = RunAutomaticAllocationRequest { distribution_id };

    let mut persistence = app_state.persistence.lock().await;
    let response: RunAutomaticAllocationResponse =
        run_automatic_allocation(&mut persistence, request, actor, cause)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for DELETE `/details/{detail_id}`.
async fn handle_remove_detail(
    AxumState(app_state): AxumState<AppState>,
    Path(detail_id): Path<i64>,
    Json(req): Json<Attribution>,
) -> Result<Json<RemoveDetailResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        detail_id,
        "Handling remove_detail request"
    );

    let (actor, cause) = req.into_parts();
    let request: RemoveDetailRequest = RemoveDetailRequest { detail_id };

    let mut persistence = app_state.persistence.lock().await;
    let response: RemoveDetailResponse = remove_detail(&mut persistence, request, actor, cause)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/distributions/{distribution_id}/audit`.
async fn handle_get_distribution_audit(
    AxumState(app_state): AxumState<AppState>,
    Path(distribution_id): Path<i64>,
) -> Result<Json<AuditTrailResponse>, HttpError> {
    info!(distribution_id, "Handling get_distribution_audit request");

    let mut persistence = app_state.persistence.lock().await;
    let response: AuditTrailResponse = get_distribution_audit(&mut persistence, distribution_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/distributions", post(handle_create_distribution))
        .route("/distributions", get(handle_list_distributions))
        .route("/distributions/{distribution_id}", get(handle_get_distribution))
        .route(
            "/distributions/{distribution_id}/total_profit",
            put(handle_update_total_profit),
        )
        .route(
            "/distributions/{distribution_id}/details",
            post(handle_add_manual_detail),
        )
        .route(
            "/distributions/{distribution_id}/allocate",
            post(handle_run_automatic_allocation),
        )
        .route("/details/{detail_id}", delete(handle_remove_detail))
        .route(
            "/distributions/{distribution_id}/audit",
            get(handle_get_distribution_audit),
        )
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

    info!("Initializing Profit Share Server");

    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests;
