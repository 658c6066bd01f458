/// Application settings loading from config.toml and the environment
pub mod settings;

/// Named, overridable alert tuning constants
pub mod thresholds;

pub use settings::{AppConfig, load_app_configuration};
pub use thresholds::AlertThresholds;
