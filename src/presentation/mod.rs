// Presentation layer - HTTP routing
pub mod app_state;
pub mod auth;
pub mod handlers;

use crate::presentation::app_state::AppState;
use crate::presentation::handlers::*;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/healthz", get(health_check))
        .route("/info", get(info))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/me", get(me))
        .route("/api/auth/refresh", post(refresh_token))
        .route("/api/batteries", get(list_batteries))
        .route("/api/batteries/:id", get(get_battery))
        .route("/api/stations", get(list_stations))
        .route("/api/stations/:id", get(get_station))
        .route("/api/routes/optimize", post(optimize_route))
        .route("/api/analytics/circular-economy", get(circular_economy))
        .route("/api/analytics/ml-performance", get(ml_performance))
        .route("/api/analytics/fleet-summary", get(fleet_summary))
        .route("/api/analytics/battery-health-summary", get(battery_health_summary))
        .route("/api/weather/:location", get(weather))
        .route("/api/dashboard", get(dashboard_snapshot))
        .route("/api/dashboard/navigate/:section", post(navigate))
        .route("/api/dashboard/language/:code", post(set_language))
        .route("/api/dashboard/resize", post(resize))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::auth_service::AuthService;
    use crate::application::dashboard_service::Dashboard;
    use crate::application::fleet_service::FleetService;
    use crate::application::refresh_loop::Jitter;
    use crate::application::session::DashboardSession;
    use crate::application::telemetry_store::SharedStore;
    use crate::application::translations::TranslationTable;
    use crate::infrastructure::api_client::{ApiClient, ApiError};
    use crate::infrastructure::memory_repository::InMemoryFleetRepository;
    use crate::infrastructure::seed::seed_store;
    use crate::infrastructure::snapshot_view::{RecordingChartRenderer, SnapshotView};
    use crate::infrastructure::token_store::{MemoryTokenStore, TokenStore};
    use chrono::TimeDelta;
    use std::time::Duration;

    const LOAD_DELAY: Duration = Duration::from_millis(10);

    async fn spawn_server() -> String {
        let store = SharedStore::new(seed_store());
        let dashboard = Dashboard::new(
            store.clone(),
            Arc::new(TranslationTable::builtin().unwrap()),
            SnapshotView::new(),
            RecordingChartRenderer::default(),
            Jitter::seeded(21),
        );
        let state = Arc::new(AppState {
            fleet_service: FleetService::new(Arc::new(InMemoryFleetRepository::new(store))),
            auth_service: AuthService::new("demo", "demo123", "admin", TimeDelta::minutes(30)),
            dashboard: DashboardSession::start(dashboard, "en", LOAD_DELAY),
        });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, build_router(state)).await.unwrap();
        });
        format!("http://{}", addr)
    }

    async fn logged_in_client() -> (ApiClient, Arc<MemoryTokenStore>) {
        let base_url = spawn_server().await;
        let tokens = Arc::new(MemoryTokenStore::default());
        let client = ApiClient::new(base_url, tokens.clone());
        client.login("demo", "demo123").await.unwrap();
        (client, tokens)
    }

    #[tokio::test]
    async fn test_login_persists_token_and_reads_fleet() {
        let (client, tokens) = logged_in_client().await;
        assert!(tokens.load().unwrap().is_some());

        let batteries = client.batteries().await.unwrap();
        assert_eq!(batteries.len(), 4);
        assert_eq!(client.stations().await.unwrap().len(), 3);

        let summary = client.fleet_summary().await.unwrap();
        assert_eq!(summary.total_batteries, 4);
        assert_eq!(summary.avg_health, 88);
        assert_eq!(summary.avg_utilization, 83);

        assert_eq!(client.battery("BAT002").await.unwrap().location, "Pune");
        assert!(matches!(
            client.battery("BAT999").await,
            Err(ApiError::Status { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn test_bad_login_is_unauthorized() {
        let base_url = spawn_server().await;
        let tokens = Arc::new(MemoryTokenStore::default());
        let client = ApiClient::new(base_url, tokens.clone());

        assert!(matches!(client.login("demo", "nope").await, Err(ApiError::Unauthorized)));
        assert!(!client.is_authenticated().unwrap());
    }

    #[tokio::test]
    async fn test_stale_token_is_cleared_on_unauthorized() {
        let base_url = spawn_server().await;
        let tokens = Arc::new(MemoryTokenStore::default());
        tokens.save("stale-token").unwrap();
        let client = ApiClient::new(base_url, tokens.clone());

        assert!(matches!(client.batteries().await, Err(ApiError::Unauthorized)));
        assert_eq!(tokens.load().unwrap(), None);
    }

    #[tokio::test]
    async fn test_logout_revokes_server_side() {
        let (client, tokens) = logged_in_client().await;
        let token = tokens.load().unwrap().unwrap();

        client.logout().await.unwrap();
        assert!(!client.is_authenticated().unwrap());

        tokens.save(&token).unwrap();
        assert!(matches!(client.stations().await, Err(ApiError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_route_lookup_over_http() {
        let (client, _) = logged_in_client().await;

        let forward = client.optimize_route("Mumbai", "Pune").await.unwrap();
        let reverse = client.optimize_route("Pune", "Mumbai").await.unwrap();
        assert_eq!(forward, reverse);
        assert_eq!(forward.elevation_gain, 650.0);

        let fallback = client.optimize_route("Delhi", "Goa").await.unwrap();
        assert_eq!(fallback.distance, 250.0);
        assert_eq!(fallback.predicted_range, 235.0);
    }

    #[tokio::test]
    async fn test_analytics_and_weather() {
        let (client, _) = logged_in_client().await;

        let materials = client.circular_economy().await.unwrap();
        assert_eq!(materials.len(), 3);
        assert_eq!(client.ml_performance().await.unwrap().ml_enhanced_accuracy, 92.5);

        let weather = client.weather("New Delhi").await.unwrap();
        assert_eq!(weather.location, "New Delhi");
        assert!(weather.mock_data);
    }

    #[tokio::test]
    async fn test_dashboard_navigation_over_http() {
        let (client, _) = logged_in_client().await;
        tokio::time::sleep(LOAD_DELAY * 5).await;

        let snapshot = client.dashboard().await.unwrap();
        assert_eq!(snapshot["active_section"], "dashboard");
        assert_eq!(snapshot["kpis"]["total_batteries"], 4);

        let snapshot = client.navigate("settings").await.unwrap();
        assert_eq!(snapshot["active_section"], "dashboard");

        client.navigate("circular-economy").await.unwrap();
        tokio::time::sleep(LOAD_DELAY * 5).await;
        let snapshot = client.dashboard().await.unwrap();
        assert_eq!(snapshot["active_section"], "circular-economy");
        let charts = snapshot["charts"].as_array().unwrap();
        assert_eq!(charts.len(), 1);
        assert_eq!(charts[0]["canvas_id"], "materialsChart");

        let snapshot = client.set_language("es").await.unwrap();
        assert_eq!(snapshot["language"], "es");
        assert_eq!(snapshot["texts"]["nav.analytics"], "Analítica");
    }

    #[tokio::test]
    async fn test_public_routes_need_no_token() {
        let base_url = spawn_server().await;
        let body = reqwest::get(format!("{}/healthz", base_url))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert_eq!(body, "ok");

        let status = reqwest::get(format!("{}/api/batteries", base_url)).await.unwrap().status();
        assert_eq!(status, reqwest::StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_me_and_refresh() {
        let (client, tokens) = logged_in_client().await;
        let first = tokens.load().unwrap().unwrap();

        let principal = client.me().await.unwrap();
        assert_eq!(principal.username, "demo");
        assert_eq!(principal.role, "admin");

        client.refresh().await.unwrap();
        let second = tokens.load().unwrap().unwrap();
        assert_ne!(first, second);
        assert_eq!(client.me().await.unwrap().username, "demo");

        tokens.save(&first).unwrap();
        assert!(matches!(client.me().await, Err(ApiError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_station_by_id_and_health_summary() {
        let (client, _) = logged_in_client().await;

        let station = client.station("ST003").await.unwrap();
        assert_eq!(station.name, "Bangalore Tech Park");
        assert!(matches!(
            client.station("ST404").await,
            Err(ApiError::Status { status: 404, .. })
        ));

        let health = client.battery_health_summary().await.unwrap();
        assert_eq!(health.total_batteries, 4);
        let counted: usize = health.categories.iter().map(|b| b.count).sum();
        assert_eq!(counted, 4);
    }

    #[tokio::test]
    async fn test_route_calculation_reaches_dashboard() {
        let (client, _) = logged_in_client().await;
        client.navigate("route-optimizer").await.unwrap();
        tokio::time::sleep(LOAD_DELAY * 5).await;

        let snapshot = client.dashboard().await.unwrap();
        assert_eq!(snapshot["content"]["section"], "route-optimizer");
        assert!(snapshot["content"]["route"].is_null());

        client.optimize_route("Bangalore", "Chennai").await.unwrap();
        let snapshot = client.dashboard().await.unwrap();
        assert_eq!(snapshot["content"]["route"]["distance"], 346.0);
        assert_eq!(snapshot["content"]["route"]["confidence"], 91.0);
    }

    #[tokio::test]
    async fn test_resize_reaches_live_charts() {
        let (client, _) = logged_in_client().await;
        client.navigate("battery-health").await.unwrap();
        tokio::time::sleep(LOAD_DELAY * 5).await;

        let snapshot = client.resize_dashboard().await.unwrap();
        assert_eq!(snapshot["charts"].as_array().unwrap().len(), 2);
        assert_eq!(snapshot["chart_stats"]["resized"], 2);
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_a_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let tokens = Arc::new(MemoryTokenStore::default());
        tokens.save("kept-token").unwrap();
        let client = ApiClient::new(format!("http://{}", addr), tokens.clone());

        assert!(matches!(client.batteries().await, Err(ApiError::Transport(_))));
        assert_eq!(tokens.load().unwrap().as_deref(), Some("kept-token"));
    }

    #[tokio::test]
    async fn test_lowercase_bearer_scheme_is_accepted() {
        let base_url = spawn_server().await;
        let tokens = Arc::new(MemoryTokenStore::default());
        ApiClient::new(base_url.clone(), tokens.clone())
            .login("demo", "demo123")
            .await
            .unwrap();
        let token = tokens.load().unwrap().unwrap();

        let response = reqwest::Client::new()
            .get(format!("{}/api/stations", base_url))
            .header("authorization", format!("bearer {}", token))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);
    }
}
