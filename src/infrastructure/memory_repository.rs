// In-memory repository backed by the shared telemetry store
use crate::application::fleet_repository::FleetRepository;
use crate::application::telemetry_store::SharedStore;
use crate::domain::battery::Battery;
use crate::domain::materials::MaterialRecord;
use crate::domain::station::Station;
use anyhow::Result;
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct InMemoryFleetRepository {
    store: SharedStore,
}

impl InMemoryFleetRepository {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl FleetRepository for InMemoryFleetRepository {
    async fn list_batteries(&self) -> Result<Vec<Battery>> {
        Ok(self.store.read().batteries().to_vec())
    }

    async fn get_battery(&self, id: &str) -> Result<Option<Battery>> {
        Ok(self.store.read().battery(id).cloned())
    }

    async fn list_stations(&self) -> Result<Vec<Station>> {
        Ok(self.store.read().stations().to_vec())
    }

    async fn get_station(&self, id: &str) -> Result<Option<Station>> {
        Ok(self.store.read().station(id).cloned())
    }

    async fn material_recovery(&self) -> Result<Vec<MaterialRecord>> {
        Ok(self.store.read().materials().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::fleet_service::FleetService;
    use crate::infrastructure::seed::seed_store;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_fleet_service_over_seed_store() {
        let store = SharedStore::new(seed_store());
        let service = FleetService::new(Arc::new(InMemoryFleetRepository::new(store.clone())));

        let summary = service.fleet_summary().await.unwrap();
        assert_eq!(summary.total_batteries, 4);
        assert_eq!(summary.avg_health, 88);
        assert_eq!(summary.active_stations, 3);
        assert_eq!(summary.avg_utilization, 83);

        assert!(service.battery("BAT003").await.unwrap().is_some());
        assert!(service.battery("BAT999").await.unwrap().is_none());
        assert_eq!(service.station("ST002").await.unwrap().unwrap().name, "Pune Highway");
        assert!(service.station("ST404").await.unwrap().is_none());
        assert_eq!(service.circular_economy().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_repository_sees_store_mutations() {
        let store = SharedStore::new(seed_store());
        let repository = InMemoryFleetRepository::new(store.clone());

        store.write().batteries_mut()[0].nudge_soc(-100.0);

        let battery = repository.get_battery("BAT001").await.unwrap().unwrap();
        assert_eq!(battery.soc, 0.0);
    }
}
