// Section payloads handed to the view when a section renders
use super::battery::Battery;
use super::fleet::FleetSummary;
use super::materials::MaterialRecord;
use super::route::Route;
use super::station::Station;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelPerformance {
    pub standard_prediction_accuracy: f64,
    pub ml_enhanced_accuracy: f64,
    pub energy_saving_percentage: f64,
    pub route_optimization_improvement: f64,
    pub user_satisfaction_score: f64,
}

impl Default for ModelPerformance {
    fn default() -> Self {
        Self {
            standard_prediction_accuracy: 70.2,
            ml_enhanced_accuracy: 92.5,
            energy_saving_percentage: 15.3,
            route_optimization_improvement: 23.7,
            user_satisfaction_score: 4.6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "section", rename_all = "kebab-case")]
pub enum SectionData {
    Dashboard {
        summary: FleetSummary,
        batteries: Vec<Battery>,
    },
    BatteryHealth {
        batteries: Vec<Battery>,
    },
    RouteOptimizer {
        route: Option<Route>,
    },
    CircularEconomy {
        materials: Vec<MaterialRecord>,
    },
    StationPlacement {
        stations: Vec<Station>,
    },
    Analytics {
        performance: ModelPerformance,
    },
}
