use std::path::PathBuf;

use scope_model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("cannot read config {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("invalid config value {key} = {value}")]
    ConfigValue { key: &'static str, value: f64 },

    #[error("cannot {action} from the {screen} screen")]
    InvalidTransition {
        action: &'static str,
        screen: &'static str,
    },

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}
