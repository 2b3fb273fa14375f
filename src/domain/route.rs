// Route domain model
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub origin: String,
    pub destination: String,
    pub distance: f64,
    pub elevation_gain: f64,
    pub predicted_range: f64,
    pub confidence: f64,
}

impl Route {
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        distance: f64,
        elevation_gain: f64,
        predicted_range: f64,
        confidence: f64,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            distance,
            elevation_gain,
            predicted_range,
            confidence,
        }
    }

    /// True when this record connects the two places, in either direction.
    pub fn connects(&self, a: &str, b: &str) -> bool {
        let same = |x: &str, y: &str| x.trim().eq_ignore_ascii_case(y.trim());
        (same(&self.origin, a) && same(&self.destination, b))
            || (same(&self.origin, b) && same(&self.destination, a))
    }

    /// The fixed estimate returned when no known route matches.
    pub fn fallback(origin: &str, destination: &str) -> Self {
        Self::new(origin, destination, 250.0, 300.0, 235.0, 88.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connects_ignores_direction_and_case() {
        let route = Route::new("Mumbai", "Pune", 148.0, 650.0, 142.0, 94.0);
        assert!(route.connects("Mumbai", "Pune"));
        assert!(route.connects("pune", " MUMBAI "));
        assert!(!route.connects("Mumbai", "Goa"));
    }
}
