// Application layer - Dashboard core and use cases
pub mod auth_service;
pub mod chart_lifecycle;
pub mod dashboard_service;
pub mod fleet_repository;
pub mod fleet_service;
pub mod refresh_loop;
pub mod route_service;
pub mod session;
pub mod telemetry_store;
pub mod translations;
pub mod view;
pub mod view_router;
