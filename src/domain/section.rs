// Dashboard sections and the chart slots each one owns
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    Dashboard,
    BatteryHealth,
    RouteOptimizer,
    CircularEconomy,
    StationPlacement,
    Analytics,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Dashboard,
        Section::BatteryHealth,
        Section::RouteOptimizer,
        Section::CircularEconomy,
        Section::StationPlacement,
        Section::Analytics,
    ];

    /// Parse a section identifier. Unknown identifiers yield `None`.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.id() == id)
    }

    pub fn id(&self) -> &'static str {
        match self {
            Section::Dashboard => "dashboard",
            Section::BatteryHealth => "battery-health",
            Section::RouteOptimizer => "route-optimizer",
            Section::CircularEconomy => "circular-economy",
            Section::StationPlacement => "station-placement",
            Section::Analytics => "analytics",
        }
    }

    /// Canvases rendered while this section is active.
    pub fn chart_slots(&self) -> &'static [ChartSlot] {
        match self {
            Section::Dashboard => &[],
            Section::BatteryHealth => &[ChartSlot::Health, ChartSlot::Degradation],
            Section::RouteOptimizer => &[ChartSlot::Elevation],
            Section::CircularEconomy => &[ChartSlot::Materials],
            Section::StationPlacement => &[ChartSlot::Demand],
            Section::Analytics => &[ChartSlot::Ml, ChartSlot::Accuracy],
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartSlot {
    Health,
    Degradation,
    Elevation,
    Materials,
    Demand,
    Ml,
    Accuracy,
}

impl ChartSlot {
    /// DOM id of the canvas backing this slot.
    pub fn canvas_id(&self) -> &'static str {
        match self {
            ChartSlot::Health => "healthChart",
            ChartSlot::Degradation => "degradationChart",
            ChartSlot::Elevation => "elevationChart",
            ChartSlot::Materials => "materialsChart",
            ChartSlot::Demand => "demandChart",
            ChartSlot::Ml => "mlChart",
            ChartSlot::Accuracy => "accuracyChart",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_id_round_trips_known_sections() {
        for section in Section::ALL {
            assert_eq!(Section::from_id(section.id()), Some(section));
        }
        assert_eq!(Section::from_id("settings"), None);
        assert_eq!(Section::from_id("Dashboard"), None);
        assert_eq!(Section::from_id(""), None);
    }

    #[test]
    fn test_every_slot_belongs_to_exactly_one_section() {
        let mut seen = Vec::new();
        for section in Section::ALL {
            seen.extend_from_slice(section.chart_slots());
        }
        seen.sort();
        let before = seen.len();
        seen.dedup();
        assert_eq!(before, seen.len());
        assert_eq!(seen.len(), 7);
    }

    #[test]
    fn test_sections_order_by_nav_position() {
        let mut shuffled = vec![Section::Analytics, Section::Dashboard, Section::CircularEconomy];
        shuffled.sort();
        assert_eq!(
            shuffled,
            vec![Section::Dashboard, Section::CircularEconomy, Section::Analytics]
        );
        assert!(Section::ALL.windows(2).all(|w| w[0] < w[1]));
    }
}
