//! Core types, configuration, and utilities for the BreakerBot companion.

mod config;
mod error;
mod logging;
mod paths;
pub mod phone;
mod theme;

pub use config::{Config, DEFAULT_API_URL, DEFAULT_LOG_LEVEL};
pub use error::{CoreError, CoreResult};
pub use logging::{init_logging, parse_level};
pub use paths::Paths;
pub use theme::ThemeMode;
