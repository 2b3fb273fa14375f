// Route lookup over a fixed table of known corridors
use crate::domain::route::Route;

#[derive(Debug, Clone)]
pub struct RouteLookup {
    routes: Vec<Route>,
}

impl RouteLookup {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    pub fn with_known_routes() -> Self {
        Self::new(vec![
            Route::new("Mumbai", "Pune", 148.0, 650.0, 142.0, 94.0),
            Route::new("Bangalore", "Chennai", 346.0, 920.0, 331.0, 91.0),
            Route::new("Delhi", "Jaipur", 281.0, 410.0, 268.0, 92.0),
        ])
    }

    /// Look up a route in either direction. Unknown pairs get the fallback estimate.
    pub fn compute(&self, origin: &str, destination: &str) -> Route {
        match self.routes.iter().find(|r| r.connects(origin, destination)) {
            Some(route) => route.clone(),
            None => {
                tracing::debug!("No known route {} -> {}, using fallback", origin, destination);
                Route::fallback(origin, destination)
            }
        }
    }
}

impl Default for RouteLookup {
    fn default() -> Self {
        Self::with_known_routes()
    }
}
