// In-memory telemetry snapshot shared between the refresh loop and readers
use crate::domain::battery::Battery;
use crate::domain::fleet::FleetSummary;
use crate::domain::materials::MaterialRecord;
use crate::domain::station::Station;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Clone, Default)]
pub struct TelemetryStore {
    batteries: Vec<Battery>,
    stations: Vec<Station>,
    materials: Vec<MaterialRecord>,
}

impl TelemetryStore {
    pub fn new(batteries: Vec<Battery>, stations: Vec<Station>, materials: Vec<MaterialRecord>) -> Self {
        Self {
            batteries,
            stations,
            materials,
        }
    }

    pub fn batteries(&self) -> &[Battery] {
        &self.batteries
    }

    pub fn battery(&self, id: &str) -> Option<&Battery> {
        self.batteries.iter().find(|b| b.id == id)
    }

    /// Battery records are mutated in place and never removed.
    pub fn batteries_mut(&mut self) -> &mut [Battery] {
        &mut self.batteries
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn station(&self, id: &str) -> Option<&Station> {
        self.stations.iter().find(|s| s.id == id)
    }

    pub fn materials(&self) -> &[MaterialRecord] {
        &self.materials
    }

    pub fn summary(&self) -> FleetSummary {
        FleetSummary::compute(&self.batteries, &self.stations)
    }
}

/// Cloneable handle to a store with one writer (the refresh tick) and many readers.
#[derive(Debug, Clone, Default)]
pub struct SharedStore {
    inner: Arc<RwLock<TelemetryStore>>,
}

impl SharedStore {
    pub fn new(store: TelemetryStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    // Poisoned locks are recovered; the store holds plain values only.
    pub fn read(&self) -> RwLockReadGuard<'_, TelemetryStore> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, TelemetryStore> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}
