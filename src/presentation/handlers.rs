// HTTP request handlers
use crate::application::auth_service::{AuthError, IssuedToken, Principal};
use crate::application::dashboard_service::EventOutcome;
use crate::application::view::UiEvent;
use crate::domain::battery::Battery;
use crate::domain::dashboard::ModelPerformance;
use crate::domain::fleet::{FleetSummary, HealthSummary};
use crate::domain::materials::MaterialRecord;
use crate::domain::requests::{LoginRequest, RouteRequest, TokenResponse};
use crate::domain::route::Route;
use crate::domain::station::Station;
use crate::domain::weather::Weather;
use crate::infrastructure::snapshot_view::DashboardSnapshot;
use crate::presentation::app_state::AppState;
use crate::presentation::auth::AuthenticatedUser;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn token_response(issued: IssuedToken) -> Json<TokenResponse> {
    Json(TokenResponse {
        expires_in: issued.expires_in(chrono::Utc::now()),
        access_token: issued.access_token,
        token_type: "bearer".to_string(),
    })
}

fn internal_error(context: &str, e: anyhow::Error) -> StatusCode {
    tracing::error!("Error {}: {:#}", context, e);
    StatusCode::INTERNAL_SERVER_ERROR
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "SmartSwap API running", "version": VERSION }))
}

pub async fn info() -> Json<Value> {
    Json(json!({
        "app_name": "SmartSwap",
        "version": VERSION,
        "features": [
            "Battery Health Monitoring",
            "Route Range Lookup",
            "Circular Economy Tracking",
            "Station Placement",
        ],
    }))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AuthError> {
    let issued = state.auth_service.login(&request.username, &request.password)?;
    Ok(token_response(issued))
}

pub async fn me(user: AuthenticatedUser) -> Json<Principal> {
    Json(user.principal)
}

pub async fn refresh_token(
    State(state): State<Arc<AppState>>,
    user: AuthenticatedUser,
) -> Result<Json<TokenResponse>, AuthError> {
    let issued = state.auth_service.refresh(&user.token)?;
    Ok(token_response(issued))
}

pub async fn logout(State(state): State<Arc<AppState>>, user: AuthenticatedUser) -> Json<Value> {
    if state.dashboard.dispatch(UiEvent::Logout).await == EventOutcome::LogoutRequested {
        state.auth_service.logout(&user.token);
        tracing::info!("User logged out: {}", user.principal.username);
    }
    Json(json!({ "message": "Logged out successfully" }))
}

pub async fn list_batteries(
    State(state): State<Arc<AppState>>,
    _user: AuthenticatedUser,
) -> Result<Json<Vec<Battery>>, StatusCode> {
    state
        .fleet_service
        .batteries()
        .await
        .map(Json)
        .map_err(|e| internal_error("fetching batteries", e))
}

pub async fn get_battery(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    _user: AuthenticatedUser,
) -> Result<Json<Battery>, StatusCode> {
    match state.fleet_service.battery(&id).await {
        Ok(Some(battery)) => Ok(Json(battery)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(internal_error("fetching battery", e)),
    }
}

pub async fn list_stations(
    State(state): State<Arc<AppState>>,
    _user: AuthenticatedUser,
) -> Result<Json<Vec<Station>>, StatusCode> {
    state
        .fleet_service
        .stations()
        .await
        .map(Json)
        .map_err(|e| internal_error("fetching stations", e))
}

pub async fn get_station(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    _user: AuthenticatedUser,
) -> Result<Json<Station>, StatusCode> {
    match state.fleet_service.station(&id).await {
        Ok(Some(station)) => Ok(Json(station)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(internal_error("fetching station", e)),
    }
}

pub async fn optimize_route(
    State(state): State<Arc<AppState>>,
    user: AuthenticatedUser,
    Json(request): Json<RouteRequest>,
) -> Json<Route> {
    tracing::info!(
        "Route lookup requested by {}: {} -> {}",
        user.principal.username,
        request.origin,
        request.destination
    );
    let route = state.fleet_service.optimize_route(&request.origin, &request.destination);
    state
        .dashboard
        .dispatch(UiEvent::CalculateRoute {
            origin: request.origin,
            destination: request.destination,
        })
        .await;
    Json(route)
}

pub async fn circular_economy(
    State(state): State<Arc<AppState>>,
    _user: AuthenticatedUser,
) -> Result<Json<Vec<MaterialRecord>>, StatusCode> {
    state
        .fleet_service
        .circular_economy()
        .await
        .map(Json)
        .map_err(|e| internal_error("fetching material recovery", e))
}

pub async fn ml_performance(State(state): State<Arc<AppState>>, _user: AuthenticatedUser) -> Json<ModelPerformance> {
    Json(state.fleet_service.ml_performance())
}

pub async fn fleet_summary(
    State(state): State<Arc<AppState>>,
    _user: AuthenticatedUser,
) -> Result<Json<FleetSummary>, StatusCode> {
    state
        .fleet_service
        .fleet_summary()
        .await
        .map(Json)
        .map_err(|e| internal_error("computing fleet summary", e))
}

pub async fn battery_health_summary(
    State(state): State<Arc<AppState>>,
    _user: AuthenticatedUser,
) -> Result<Json<HealthSummary>, StatusCode> {
    state
        .fleet_service
        .battery_health_summary()
        .await
        .map(Json)
        .map_err(|e| internal_error("computing battery health summary", e))
}

pub async fn weather(
    Path(location): Path<String>,
    State(state): State<Arc<AppState>>,
    _user: AuthenticatedUser,
) -> Json<Weather> {
    Json(state.fleet_service.weather(&location))
}

pub async fn dashboard_snapshot(State(state): State<Arc<AppState>>, _user: AuthenticatedUser) -> Json<DashboardSnapshot> {
    Json(state.dashboard.inspect(DashboardSnapshot::capture).await)
}

/// Unknown sections are ignored; the response is the unchanged snapshot.
pub async fn navigate(
    Path(section): Path<String>,
    State(state): State<Arc<AppState>>,
    _user: AuthenticatedUser,
) -> Json<DashboardSnapshot> {
    state.dashboard.navigate(&section).await;
    Json(state.dashboard.inspect(DashboardSnapshot::capture).await)
}

pub async fn resize(State(state): State<Arc<AppState>>, _user: AuthenticatedUser) -> Json<DashboardSnapshot> {
    state.dashboard.dispatch(UiEvent::Resized).await;
    Json(state.dashboard.inspect(DashboardSnapshot::capture).await)
}

pub async fn set_language(
    Path(code): Path<String>,
    State(state): State<Arc<AppState>>,
    _user: AuthenticatedUser,
) -> Json<DashboardSnapshot> {
    state.dashboard.dispatch(UiEvent::LanguageChanged(code)).await;
    Json(state.dashboard.inspect(DashboardSnapshot::capture).await)
}
