// Public API exports
pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod prettyprint;
pub mod server;

// Re-export key types for easy access
pub use config::app_config::AppConfig;
pub use server::{create_router, AppState};
