//! Live feed and scope HUD text.

use scope_model::{ScopeMode, Theme, Troop, DEFAULT_ALTITUDE_METERS};

/// Placeholder azimuth for a troop that reports no heading.
const DEFAULT_AZIMUTH: u16 = 87;

/// Overlay tint painted over the feed for the current sensor mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedTint {
    Accent(Theme),
    Orange,
    Purple,
}

/// `None` for plain visible light.
pub fn mode_tint(mode: ScopeMode, theme: Theme) -> Option<FeedTint> {
    match mode {
        ScopeMode::Vis => None,
        ScopeMode::Thermal => Some(FeedTint::Accent(theme)),
        ScopeMode::Mwir => Some(FeedTint::Orange),
        ScopeMode::Fusion => Some(FeedTint::Purple),
    }
}

/// Rows of the dashboard feed HUD for `troop`.
pub fn feed_hud_rows(troop: &Troop, mode: ScopeMode) -> Vec<(&'static str, String)> {
    let altitude = troop.entity.altitude_meters.unwrap_or(DEFAULT_ALTITUDE_METERS);
    let azimuth = troop.entity.heading_degrees.unwrap_or(DEFAULT_AZIMUTH);
    vec![
        ("RANGE", "2,847m".to_string()),
        ("ALTITUDE", format!("{altitude}m")),
        ("AZIMUTH", format!("{azimuth:03}°")),
        ("ELEVATION", "+12°".to_string()),
        ("MODE", mode.label().to_string()),
    ]
}

/// Optics status block of the scope view.
pub fn scope_status_rows(mode: ScopeMode) -> Vec<(&'static str, String)> {
    vec![
        ("ZOOM", "8.5x".to_string()),
        ("FOV", "45°".to_string()),
        ("LRF", "ACTIVE".to_string()),
        ("STAB", "ON".to_string()),
        ("MODE", mode.label().to_string()),
    ]
}
