// Repository trait for fleet data access
use crate::domain::battery::Battery;
use crate::domain::materials::MaterialRecord;
use crate::domain::station::Station;
use async_trait::async_trait;

#[async_trait]
pub trait FleetRepository: Send + Sync {
    /// Current battery snapshot, including refresh-loop jitter
    async fn list_batteries(&self) -> anyhow::Result<Vec<Battery>>;

    async fn get_battery(&self, id: &str) -> anyhow::Result<Option<Battery>>;

    async fn list_stations(&self) -> anyhow::Result<Vec<Station>>;

    async fn get_station(&self, id: &str) -> anyhow::Result<Option<Station>>;

    /// Recovery figures for lithium, cobalt and nickel
    async fn material_recovery(&self) -> anyhow::Result<Vec<MaterialRecord>>;
}
