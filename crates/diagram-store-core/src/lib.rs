//! Core utilities shared across the diagram store crates

pub mod config;
pub mod problemdetails;

pub use config::ServerConfig;
pub use problemdetails::ProblemDetails;
