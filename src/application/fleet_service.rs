// Fleet service - Use cases behind the REST API
use crate::application::fleet_repository::FleetRepository;
use crate::application::route_service::RouteLookup;
use crate::domain::battery::Battery;
use crate::domain::dashboard::ModelPerformance;
use crate::domain::fleet::{FleetSummary, HealthSummary};
use crate::domain::materials::MaterialRecord;
use crate::domain::route::Route;
use crate::domain::station::Station;
use crate::domain::weather::Weather;
use std::sync::Arc;

#[derive(Clone)]
pub struct FleetService {
    repository: Arc<dyn FleetRepository>,
    routes: RouteLookup,
}

impl FleetService {
    pub fn new(repository: Arc<dyn FleetRepository>) -> Self {
        Self {
            repository,
            routes: RouteLookup::default(),
        }
    }

    pub async fn batteries(&self) -> anyhow::Result<Vec<Battery>> {
        self.repository.list_batteries().await
    }

    pub async fn battery(&self, id: &str) -> anyhow::Result<Option<Battery>> {
        self.repository.get_battery(id).await
    }

    pub async fn stations(&self) -> anyhow::Result<Vec<Station>> {
        self.repository.list_stations().await
    }

    pub async fn station(&self, id: &str) -> anyhow::Result<Option<Station>> {
        self.repository.get_station(id).await
    }

    pub async fn circular_economy(&self) -> anyhow::Result<Vec<MaterialRecord>> {
        self.repository.material_recovery().await
    }

    pub async fn fleet_summary(&self) -> anyhow::Result<FleetSummary> {
        let batteries = self.repository.list_batteries().await?;
        let stations = self.repository.list_stations().await?;
        Ok(FleetSummary::compute(&batteries, &stations))
    }

    pub async fn battery_health_summary(&self) -> anyhow::Result<HealthSummary> {
        let batteries = self.repository.list_batteries().await?;
        Ok(HealthSummary::compute(&batteries))
    }

    pub fn optimize_route(&self, origin: &str, destination: &str) -> Route {
        self.routes.compute(origin, destination)
    }

    pub fn ml_performance(&self) -> ModelPerformance {
        ModelPerformance::default()
    }

    pub fn weather(&self, location: &str) -> Weather {
        Weather::mock(location)
    }
}
