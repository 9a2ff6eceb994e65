pub mod config;
pub mod routes;
pub mod state;
pub mod telemetry;
