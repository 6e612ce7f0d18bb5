//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::dates;
use crate::decode::filter_by_category;
use crate::railway::RailwayError;
use crate::stations::Station;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/current-date", get(current_date))
        .route("/api/tickets", get(query_tickets))
        .route("/api/stations/search", get(search_stations))
        .route("/api/stations/in-city", get(stations_in_city))
        .route("/api/stations/by-name", get(station_by_name))
        .route("/api/stations/by-code", get(station_by_code))
        // The browser frontend is served from a different origin.
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Today's date in the railway's time zone.
async fn current_date() -> Json<CurrentDateResponse> {
    Json(CurrentDateResponse {
        date: dates::current_date_string(),
    })
}

/// Query left tickets between two stations.
async fn query_tickets(
    State(state): State<AppState>,
    Query(req): Query<TicketQueryRequest>,
) -> Result<Json<TicketQueryResponse>, AppError> {
    if req.date.is_empty() || req.from_station.is_empty() || req.to_station.is_empty() {
        return Err(AppError::BadRequest {
            message: "date, fromStation and toStation are required".to_string(),
        });
    }

    let date = dates::parse_date(&req.date).ok_or_else(|| AppError::BadRequest {
        message: format!("invalid date: {}", req.date),
    })?;

    if !dates::is_on_or_after(date, dates::today_in_china()) {
        return Err(AppError::BadRequest {
            message: "date must not be before today".to_string(),
        });
    }

    let decoded = state
        .railway
        .query_tickets(date, &req.from_station, &req.to_station)
        .await?;

    let tickets = filter_by_category(&decoded, &req.train_filter_flags);

    info!(
        total = decoded.len(),
        returned = tickets.len(),
        filter = %req.train_filter_flags,
        "ticket query complete"
    );

    let message = tickets
        .is_empty()
        .then(|| "没有找到符合条件的车票信息".to_string());

    Ok(Json(TicketQueryResponse { tickets, message }))
}

/// Search stations by keyword.
async fn search_stations(
    State(state): State<AppState>,
    Query(req): Query<StationSearchRequest>,
) -> Json<StationListResponse> {
    let limit = req.limit.unwrap_or(10).min(50);
    let stations = state.stations.search(&req.q, limit).await;

    Json(StationListResponse { stations })
}

/// List all stations in a city.
async fn stations_in_city(
    State(state): State<AppState>,
    Query(req): Query<CityRequest>,
) -> Result<Json<StationListResponse>, AppError> {
    if req.city.is_empty() {
        return Err(AppError::BadRequest {
            message: "city is required".to_string(),
        });
    }

    let stations = state.stations.in_city(&req.city).await;
    Ok(Json(StationListResponse { stations }))
}

/// Look up a station by exact display name.
async fn station_by_name(
    State(state): State<AppState>,
    Query(req): Query<StationNameRequest>,
) -> Result<Json<Station>, AppError> {
    let station = state
        .stations
        .find_by_name(&req.name)
        .await
        .ok_or_else(|| AppError::NotFound {
            message: format!("no station named {}", req.name),
        })?;

    Ok(Json(station))
}

/// Look up a station by telecode.
async fn station_by_code(
    State(state): State<AppState>,
    Query(req): Query<StationCodeRequest>,
) -> Result<Json<Station>, AppError> {
    let station = state
        .stations
        .find_by_code(&req.code)
        .await
        .ok_or_else(|| AppError::NotFound {
            message: format!("no station with code {}", req.code),
        })?;

    Ok(Json(station))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Upstream { message: String },
}

impl From<RailwayError> for AppError {
    fn from(e: RailwayError) -> Self {
        match e {
            // An application-level rejection is the client's problem
            // (bad station pair, date out of booking range).
            RailwayError::Rejected(message) => AppError::BadRequest { message },
            other => AppError::Upstream {
                message: other.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message.clone()),
            AppError::Upstream { message } => (StatusCode::BAD_GATEWAY, message.clone()),
        };

        error!(%status, "{message}");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
