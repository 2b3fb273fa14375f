// Weather conditions reported for a location
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    pub location: String,
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub wind_direction: f64,
    pub condition: String,
    pub mock_data: bool,
}

impl Weather {
    /// Placeholder conditions used when no weather provider is configured.
    pub fn mock(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            temperature: 25.0,
            humidity: 60.0,
            wind_speed: 10.0,
            wind_direction: 180.0,
            condition: "clear".to_string(),
            mock_data: true,
        }
    }
}
