// Battery domain model
use serde::{Deserialize, Serialize};

pub const SOC_MIN: f64 = 0.0;
pub const SOC_MAX: f64 = 100.0;
pub const TEMP_MIN_C: f64 = 20.0;
pub const TEMP_MAX_C: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatteryStatus {
    Active,
    Charging,
    Maintenance,
}

impl BatteryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BatteryStatus::Active => "active",
            BatteryStatus::Charging => "charging",
            BatteryStatus::Maintenance => "maintenance",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Battery {
    pub id: String,
    pub health: f64,
    pub soc: f64,
    pub cycles: u32,
    pub temp: f64,
    pub location: String,
    pub status: BatteryStatus,
}

impl Battery {
    pub fn new(
        id: impl Into<String>,
        health: f64,
        soc: f64,
        cycles: u32,
        temp: f64,
        location: impl Into<String>,
        status: BatteryStatus,
    ) -> Self {
        Self {
            id: id.into(),
            health: health.clamp(0.0, 100.0),
            soc: soc.clamp(SOC_MIN, SOC_MAX),
            cycles,
            temp: temp.clamp(TEMP_MIN_C, TEMP_MAX_C),
            location: location.into(),
            status,
        }
    }

    /// Shift state of charge by `delta` points, clamped to [0, 100].
    pub fn nudge_soc(&mut self, delta: f64) {
        self.soc = (self.soc + delta).clamp(SOC_MIN, SOC_MAX);
    }

    /// Shift temperature by `delta` degrees, clamped to [20, 40].
    pub fn nudge_temp(&mut self, delta: f64) {
        self.temp = (self.temp + delta).clamp(TEMP_MIN_C, TEMP_MAX_C);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nudges_clamp_instead_of_wrapping() {
        let mut battery = Battery::new("BAT001", 95.0, 99.5, 245, 39.5, "Mumbai", BatteryStatus::Active);

        battery.nudge_soc(2.0);
        battery.nudge_temp(1.0);
        assert_eq!(battery.soc, 100.0);
        assert_eq!(battery.temp, 40.0);

        battery.nudge_soc(-250.0);
        battery.nudge_temp(-50.0);
        assert_eq!(battery.soc, 0.0);
        assert_eq!(battery.temp, 20.0);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&BatteryStatus::Maintenance).unwrap();
        assert_eq!(json, "\"maintenance\"");
        assert_eq!(BatteryStatus::Charging.as_str(), "charging");
    }
}
