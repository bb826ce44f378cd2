//! HTTP route handlers.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::domain::OpisId;
use crate::optimizer::PlanError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/optimize-route", post(optimize_route))
        .route("/api/stations/:id", get(station_details))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Plan fuel stops between two addresses.
async fn optimize_route(
    State(state): State<AppState>,
    body: Result<Json<OptimizeRouteRequest>, JsonRejection>,
) -> Result<Json<OptimizeRouteResponse>, AppError> {
    let Json(req) = body.map_err(|e| AppError::BadRequest {
        message: e.body_text(),
    })?;

    let plan = state.planner.plan(&req.start, &req.end).await?;

    Ok(Json(OptimizeRouteResponse::from_plan(plan)))
}

/// Station details, geocoding the station first if needed.
async fn station_details(
    State(state): State<AppState>,
    id: Result<Path<OpisId>, PathRejection>,
) -> Result<Json<StationDetailsResponse>, AppError> {
    let Path(id) = id.map_err(|e| AppError::BadRequest {
        message: e.body_text(),
    })?;

    let station = state
        .planner
        .station_details(id)
        .await?
        .ok_or_else(|| AppError::NotFound {
            message: format!("station {id} not found"),
        })?;

    Ok(Json(StationDetailsResponse::from_station(&station)))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    BadGateway { message: String },
    GatewayTimeout { message: String },
    Internal { message: String },
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        match e {
            PlanError::InvalidRequest(message) => AppError::BadRequest { message },
            // Unknown address or unroutable pair: the caller's input
            PlanError::Provider(ref p) if p.is_not_found() => AppError::BadRequest {
                message: e.to_string(),
            },
            // Malformed payloads can carry a provider body excerpt
            PlanError::Provider(ref p) if p.is_malformed() => AppError::Internal {
                message: e.to_string(),
            },
            PlanError::Provider(_) => AppError::BadGateway {
                message: e.to_string(),
            },
            PlanError::Timeout => AppError::GatewayTimeout {
                message: e.to_string(),
            },
            PlanError::Store(_) => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::BadGateway { message } => {
                warn!(%message, "upstream provider failed");
                (StatusCode::BAD_GATEWAY, message)
            }
            AppError::GatewayTimeout { message } => (StatusCode::GATEWAY_TIMEOUT, message),
            AppError::Internal { message } => {
                // Details stay in the log
                error!(%message, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
