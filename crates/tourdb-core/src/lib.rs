pub mod app_config;
pub mod config;
pub mod site;
pub mod tours;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use site::{load_site_config, SiteConfig};
pub use tours::{slugify, Category, CleanedTour, ExtractedTour, ItineraryDay};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read site config at {path}: {source}")]
    SiteFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse site config: {0}")]
    SiteFileParse(#[from] serde_yaml::Error),

    #[error("site config validation failed: {0}")]
    Validation(String),
}
