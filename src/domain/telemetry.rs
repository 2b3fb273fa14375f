// Chart data domain models
use super::battery::Battery;
use super::materials::{Material, MaterialRecord};
use super::section::ChartSlot;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Radar,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesData {
    pub name: String,
    pub color: Option<String>,
    pub values: Vec<f64>,
}

impl SeriesData {
    pub fn new(name: impl Into<String>, color: Option<&str>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            color: color.map(str::to_string),
            values,
        }
    }
}

/// Everything a renderer needs to draw one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    pub slot: ChartSlot,
    pub kind: ChartKind,
    pub title: String,
    pub labels: Vec<String>,
    pub y_min: Option<f64>,
    pub y_max: Option<f64>,
    pub series: Vec<SeriesData>,
}

impl ChartConfig {
    fn new(slot: ChartSlot, kind: ChartKind, title: &str, labels: Vec<String>, series: Vec<SeriesData>) -> Self {
        Self {
            slot,
            kind,
            title: title.to_string(),
            labels,
            y_min: None,
            y_max: None,
            series,
        }
    }

    fn with_y_range(mut self, min: f64, max: f64) -> Self {
        self.y_min = Some(min);
        self.y_max = Some(max);
        self
    }
}

fn labels(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// One bar per battery, valued at its current health.
pub fn health_chart(batteries: &[Battery]) -> ChartConfig {
    ChartConfig::new(
        ChartSlot::Health,
        ChartKind::Bar,
        "Battery Health (%)",
        batteries.iter().map(|b| b.id.clone()).collect(),
        vec![SeriesData::new(
            "Health",
            Some("#10b981"),
            batteries.iter().map(|b| b.health).collect(),
        )],
    )
    .with_y_range(0.0, 100.0)
}

pub fn degradation_chart() -> ChartConfig {
    ChartConfig::new(
        ChartSlot::Degradation,
        ChartKind::Line,
        "Capacity Degradation",
        labels(&["Jan", "Feb", "Mar", "Apr", "May", "Jun"]),
        vec![SeriesData::new(
            "Capacity",
            Some("#3b82f6"),
            vec![98.0, 96.0, 94.0, 92.0, 89.0, 87.0],
        )],
    )
    .with_y_range(80.0, 100.0)
}

/// Reference profile for the Mumbai to Pune expressway.
pub fn elevation_chart() -> ChartConfig {
    ChartConfig::new(
        ChartSlot::Elevation,
        ChartKind::Line,
        "Elevation Profile (m)",
        labels(&["0 km", "20 km", "40 km", "60 km", "80 km", "100 km", "120 km", "148 km"]),
        vec![SeriesData::new(
            "Elevation",
            Some("#f59e0b"),
            vec![14.0, 45.0, 120.0, 610.0, 650.0, 590.0, 570.0, 560.0],
        )],
    )
}

/// Recovered versus target percentage per material, in `Material::ALL` order.
pub fn materials_chart(records: &[MaterialRecord]) -> ChartConfig {
    let value_of = |material: Material, pick: fn(&MaterialRecord) -> f64| {
        records
            .iter()
            .find(|r| r.material == material)
            .map(pick)
            .unwrap_or(0.0)
    };

    let recovered = Material::ALL.iter().map(|m| value_of(*m, |r| r.recovered)).collect();
    let target = Material::ALL.iter().map(|m| value_of(*m, |r| r.target)).collect();

    ChartConfig::new(
        ChartSlot::Materials,
        ChartKind::Bar,
        "Material Recovery (%)",
        Material::ALL.iter().map(|m| m.label().to_string()).collect(),
        vec![
            SeriesData::new("Recovered", Some("#10b981"), recovered),
            SeriesData::new("Target", Some("#6b7280"), target),
        ],
    )
    .with_y_range(0.0, 100.0)
}

pub fn demand_chart() -> ChartConfig {
    ChartConfig::new(
        ChartSlot::Demand,
        ChartKind::Radar,
        "Swap Demand by City",
        labels(&["Mumbai", "Pune", "Bangalore", "Chennai", "Delhi", "Hyderabad"]),
        vec![SeriesData::new(
            "Demand score",
            Some("#8b5cf6"),
            vec![92.0, 78.0, 88.0, 74.0, 85.0, 70.0],
        )],
    )
    .with_y_range(0.0, 100.0)
}

pub fn ml_chart() -> ChartConfig {
    ChartConfig::new(
        ChartSlot::Ml,
        ChartKind::Line,
        "Range Prediction Accuracy (%)",
        labels(&["Week 1", "Week 2", "Week 3", "Week 4", "Week 5", "Week 6"]),
        vec![
            SeriesData::new("ML enhanced", Some("#10b981"), vec![88.2, 89.5, 90.8, 91.6, 92.1, 92.5]),
            SeriesData::new("Standard", Some("#ef4444"), vec![70.1, 70.3, 70.0, 70.4, 70.2, 70.2]),
        ],
    )
    .with_y_range(60.0, 100.0)
}

pub fn accuracy_chart() -> ChartConfig {
    ChartConfig::new(
        ChartSlot::Accuracy,
        ChartKind::Bar,
        "Model Accuracy by Task (%)",
        labels(&["Range", "Battery health", "Demand", "Placement"]),
        vec![SeriesData::new(
            "Accuracy",
            Some("#3b82f6"),
            vec![92.5, 94.7, 87.3, 85.7],
        )],
    )
    .with_y_range(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::battery::BatteryStatus;
    use crate::domain::materials::Trend;

    #[test]
    fn test_health_chart_has_one_entry_per_battery() {
        let batteries = vec![
            Battery::new("BAT001", 95.0, 87.0, 245, 32.0, "Mumbai", BatteryStatus::Active),
            Battery::new("BAT002", 87.0, 72.0, 567, 28.0, "Pune", BatteryStatus::Active),
        ];
        let chart = health_chart(&batteries);
        assert_eq!(chart.labels, vec!["BAT001", "BAT002"]);
        assert_eq!(chart.series.len(), 1);
        assert_eq!(chart.series[0].values, vec![95.0, 87.0]);
    }

    #[test]
    fn test_static_series_shapes() {
        assert_eq!(degradation_chart().series[0].values, vec![98.0, 96.0, 94.0, 92.0, 89.0, 87.0]);
        assert_eq!(elevation_chart().labels.len(), 8);
        assert_eq!(elevation_chart().series[0].values.len(), 8);
        assert_eq!(demand_chart().labels.len(), 6);
        assert_eq!(demand_chart().kind, ChartKind::Radar);
    }

    #[test]
    fn test_materials_chart_orders_by_material_and_defaults_missing() {
        let records = vec![
            MaterialRecord::new(Material::Nickel, 89.0, 92.0, Trend::Up),
            MaterialRecord::new(Material::Lithium, 95.0, 98.0, Trend::Up),
        ];
        let chart = materials_chart(&records);
        assert_eq!(chart.labels, vec!["Lithium", "Cobalt", "Nickel"]);
        assert_eq!(chart.series[0].values, vec![95.0, 0.0, 89.0]);
        assert_eq!(chart.series[1].values, vec![98.0, 0.0, 92.0]);
    }
}
