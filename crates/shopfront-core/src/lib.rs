pub mod app_config;
pub mod config;
pub mod variations;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use variations::{
    color_options, distinct_colors, find_variation_by_color, ColorOption, StockStatus, Variation,
    VariationAttribute, COLOR_ATTRIBUTE,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
