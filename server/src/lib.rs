//! HTTP surface for the employee directory: configuration, router and
//! request handlers.

pub mod config;
pub mod employees;
pub mod http;

pub use config::AppConfig;
pub use http::{AppState, ServeConfig, build_router, serve};
