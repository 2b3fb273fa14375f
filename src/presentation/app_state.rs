// Application state for HTTP handlers
use crate::application::auth_service::AuthService;
use crate::application::fleet_service::FleetService;
use crate::application::session::DashboardSession;
use crate::infrastructure::snapshot_view::{RecordingChartRenderer, SnapshotView};

pub type WebDashboard = DashboardSession<SnapshotView, RecordingChartRenderer>;

#[derive(Clone)]
pub struct AppState {
    pub fleet_service: FleetService,
    pub auth_service: AuthService,
    pub dashboard: WebDashboard,
}
