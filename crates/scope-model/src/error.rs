use thiserror::Error;

/// Errors raised by model lookups and roster loading.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("troop not found: {0}")]
    TroopNotFound(String),

    #[error("username must not be empty")]
    EmptyUsername,

    #[error("invalid coordinate for {id}: lat={lat}, lon={lon}")]
    InvalidCoordinate { id: String, lat: f64, lon: f64 },

    #[error("invalid heading for {id}: {heading} (expected 0-359)")]
    InvalidHeading { id: String, heading: u16 },

    #[error("duplicate entity id in roster: {0}")]
    DuplicateId(String),

    #[error("roster I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("roster parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
