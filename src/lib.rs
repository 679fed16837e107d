pub mod config;
pub mod constants;
pub mod datasets;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod normalize;
pub mod pipeline;
pub mod server;
pub mod store;
pub mod types;

// Ports the pipeline depends on, and their adapters
pub mod app;
pub mod infra;
