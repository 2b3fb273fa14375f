// Initial fleet loaded at startup
use crate::application::telemetry_store::TelemetryStore;
use crate::domain::battery::{Battery, BatteryStatus};
use crate::domain::materials::{Material, MaterialRecord, Trend};
use crate::domain::station::Station;

pub fn seed_store() -> TelemetryStore {
    let batteries = vec![
        Battery::new("BAT001", 95.0, 87.0, 245, 32.0, "Mumbai", BatteryStatus::Active),
        Battery::new("BAT002", 87.0, 72.0, 567, 28.0, "Pune", BatteryStatus::Active),
        Battery::new("BAT003", 92.0, 91.0, 123, 30.0, "Bangalore", BatteryStatus::Charging),
        Battery::new("BAT004", 78.0, 45.0, 892, 35.0, "Chennai", BatteryStatus::Maintenance),
    ];

    let stations = vec![
        Station::new("ST001", "Mumbai Central", 19.0760, 72.8777, 24, 85.0),
        Station::new("ST002", "Pune Highway", 18.5204, 73.8567, 18, 72.0),
        Station::new("ST003", "Bangalore Tech Park", 12.9716, 77.5946, 32, 91.0),
    ];

    let materials = vec![
        MaterialRecord::new(Material::Lithium, 78.2, 85.0, Trend::Up),
        MaterialRecord::new(Material::Cobalt, 85.1, 90.0, Trend::Stable),
        MaterialRecord::new(Material::Nickel, 91.8, 95.0, Trend::Up),
    ];

    TelemetryStore::new(batteries, stations, materials)
}
