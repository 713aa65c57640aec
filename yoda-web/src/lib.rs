pub mod api;
pub mod config;
pub mod controller;
pub mod logging;

#[cfg(target_arch = "wasm32")]
pub mod dom;

pub use api::{ApiClient, ApiError, HttpApiClient};
pub use config::{Config, ConfigError};
pub use controller::PageController;
