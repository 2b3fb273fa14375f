// Fleet KPI aggregation
use super::battery::Battery;
use super::station::Station;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FleetSummary {
    pub total_batteries: usize,
    pub avg_health: i64,
    pub active_stations: usize,
    pub avg_utilization: i64,
}

impl FleetSummary {
    /// Aggregate the overview KPIs. Means over an empty list report 0.
    pub fn compute(batteries: &[Battery], stations: &[Station]) -> Self {
        Self {
            total_batteries: batteries.len(),
            avg_health: rounded_mean(batteries.iter().map(|b| b.health)),
            active_stations: stations.iter().filter(|s| s.is_active()).count(),
            avg_utilization: rounded_mean(stations.iter().map(|s| s.utilization)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthCategory {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl HealthCategory {
    pub const ALL: [HealthCategory; 4] = [
        HealthCategory::Excellent,
        HealthCategory::Good,
        HealthCategory::Fair,
        HealthCategory::Poor,
    ];

    pub fn of(health: f64) -> Self {
        if health >= 90.0 {
            HealthCategory::Excellent
        } else if health >= 75.0 {
            HealthCategory::Good
        } else if health >= 50.0 {
            HealthCategory::Fair
        } else {
            HealthCategory::Poor
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthBucket {
    pub category: HealthCategory,
    pub count: usize,
    pub percentage: f64,
    pub avg_health: f64,
}

/// Fleet split by state-of-health band, plus mean cycle count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthSummary {
    pub total_batteries: usize,
    pub categories: Vec<HealthBucket>,
    pub avg_cycles: i64,
}

impl HealthSummary {
    pub fn compute(batteries: &[Battery]) -> Self {
        let total = batteries.len();
        let categories = HealthCategory::ALL
            .into_iter()
            .map(|category| {
                let healths: Vec<f64> = batteries
                    .iter()
                    .map(|b| b.health)
                    .filter(|h| HealthCategory::of(*h) == category)
                    .collect();
                let count = healths.len();
                let percentage = if total == 0 {
                    0.0
                } else {
                    one_decimal(count as f64 * 100.0 / total as f64)
                };
                let avg_health = if count == 0 {
                    0.0
                } else {
                    one_decimal(healths.iter().sum::<f64>() / count as f64)
                };
                HealthBucket {
                    category,
                    count,
                    percentage,
                    avg_health,
                }
            })
            .collect();

        Self {
            total_batteries: total,
            categories,
            avg_cycles: rounded_mean(batteries.iter().map(|b| b.cycles as f64)),
        }
    }
}

fn one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn rounded_mean(values: impl Iterator<Item = f64>) -> i64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        return 0;
    }
    (sum / count as f64).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::battery::BatteryStatus;

    #[test]
    fn test_compute_matches_seed_fleet() {
        let batteries: Vec<Battery> = [95.0, 87.0, 92.0, 78.0]
            .iter()
            .enumerate()
            .map(|(i, h)| Battery::new(format!("BAT00{}", i + 1), *h, 50.0, 100, 30.0, "Mumbai", BatteryStatus::Active))
            .collect();
        let stations: Vec<Station> = [85.0, 72.0, 91.0]
            .iter()
            .enumerate()
            .map(|(i, u)| Station::new(format!("ST00{}", i + 1), "Station", 0.0, 0.0, 20, *u))
            .collect();

        let summary = FleetSummary::compute(&batteries, &stations);
        assert_eq!(
            summary,
            FleetSummary {
                total_batteries: 4,
                avg_health: 88,
                active_stations: 3,
                avg_utilization: 83,
            }
        );
    }

    #[test]
    fn test_compute_on_empty_fleet_reports_zero() {
        assert_eq!(FleetSummary::compute(&[], &[]), FleetSummary::default());
    }

    #[test]
    fn test_health_bands() {
        assert_eq!(HealthCategory::of(90.0), HealthCategory::Excellent);
        assert_eq!(HealthCategory::of(89.9), HealthCategory::Good);
        assert_eq!(HealthCategory::of(75.0), HealthCategory::Good);
        assert_eq!(HealthCategory::of(50.0), HealthCategory::Fair);
        assert_eq!(HealthCategory::of(49.9), HealthCategory::Poor);
    }

    #[test]
    fn test_health_summary_splits_fleet() {
        let batteries: Vec<Battery> = [(95.0, 100), (87.0, 200), (92.0, 300), (40.0, 401)]
            .iter()
            .enumerate()
            .map(|(i, (h, c))| Battery::new(format!("BAT00{}", i + 1), *h, 50.0, *c, 30.0, "Pune", BatteryStatus::Active))
            .collect();

        let summary = HealthSummary::compute(&batteries);
        assert_eq!(summary.total_batteries, 4);
        assert_eq!(summary.avg_cycles, 250);

        let [excellent, good, fair, poor] = &summary.categories[..] else {
            panic!("expected four bands, got {:?}", summary.categories);
        };
        assert_eq!(excellent.category, HealthCategory::Excellent);
        assert_eq!(excellent.count, 2);
        assert_eq!(excellent.percentage, 50.0);
        assert_eq!(excellent.avg_health, 93.5);

        assert_eq!(good.count, 1);
        assert_eq!(fair.avg_health, 0.0);
        assert_eq!(poor.category, HealthCategory::Poor);
        assert_eq!(poor.percentage, 25.0);
    }

    #[test]
    fn test_health_summary_of_empty_fleet() {
        let summary = HealthSummary::compute(&[]);
        assert_eq!(summary.total_batteries, 0);
        assert_eq!(summary.categories.len(), 4);
        assert!(summary.categories.iter().all(|b| b.count == 0 && b.percentage == 0.0));
    }
}
