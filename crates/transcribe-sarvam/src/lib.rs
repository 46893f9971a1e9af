mod config;
mod normalize;
mod openapi;
mod routes;
mod upstream;

pub use config::*;
pub use normalize::*;
pub use openapi::openapi;
pub use routes::{HealthResponse, ServiceInfo, router};
pub use upstream::*;

pub const MODEL: &str = sarvam::DEFAULT_MODEL;
pub const UNKNOWN_LANGUAGE: &str = sarvam::AUTO_DETECT_LANGUAGE;
