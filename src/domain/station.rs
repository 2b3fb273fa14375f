// Station domain model
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StationStatus {
    Active,
    Offline,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    /// Battery slot count
    pub batteries: u32,
    pub utilization: f64,
    pub status: StationStatus,
}

impl Station {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        lat: f64,
        lng: f64,
        batteries: u32,
        utilization: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            lat,
            lng,
            batteries,
            utilization: utilization.clamp(0.0, 100.0),
            status: StationStatus::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == StationStatus::Active
    }
}
