// Domain layer - Core data shared by every other layer
pub mod battery;
pub mod dashboard;
pub mod fleet;
pub mod materials;
pub mod requests;
pub mod route;
pub mod section;
pub mod station;
pub mod telemetry;
pub mod weather;
