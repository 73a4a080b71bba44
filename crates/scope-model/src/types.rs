use serde::{Deserialize, Serialize};

/// Day/night visual mode. Passed explicitly to every style decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Day,
    Night,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Day => Theme::Night,
            Theme::Night => Theme::Day,
        }
    }

    pub fn is_night(self) -> bool {
        self == Theme::Night
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Day => "day",
            Self::Night => "night",
        };
        write!(f, "{s}")
    }
}

/// A point on the ground in signed decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferencePoint {
    pub lat: f64,
    pub lon: f64,
}

impl ReferencePoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl Default for ReferencePoint {
    fn default() -> Self {
        Self {
            lat: crate::DEFAULT_REFERENCE_LAT,
            lon: crate::DEFAULT_REFERENCE_LON,
        }
    }
}

/// Fields shared by every object drawn on the GPS overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoEntity {
    pub id: String,
    #[serde(rename = "name")]
    pub display_name: String,
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lon")]
    pub longitude: f64,
    #[serde(rename = "heading", default, skip_serializing_if = "Option::is_none")]
    pub heading_degrees: Option<u16>,
    #[serde(rename = "altitude", default, skip_serializing_if = "Option::is_none")]
    pub altitude_meters: Option<u32>,
}

impl GeoEntity {
    pub fn new(id: &str, display_name: &str, latitude: f64, longitude: f64) -> Self {
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
            latitude,
            longitude,
            heading_degrees: None,
            altitude_meters: None,
        }
    }

    pub fn with_heading(mut self, heading: u16) -> Self {
        self.heading_degrees = Some(heading % 360);
        self
    }

    pub fn with_altitude(mut self, altitude: u32) -> Self {
        self.altitude_meters = Some(altitude);
        self
    }

    pub fn position(&self) -> ReferencePoint {
        ReferencePoint::new(self.latitude, self.longitude)
    }

    /// Whether the coordinates are finite and inside the valid degree ranges.
    pub fn has_valid_coordinates(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Anything carrying a [`GeoEntity`].
pub trait Georeferenced {
    fn geo(&self) -> &GeoEntity;

    fn id(&self) -> &str {
        &self.geo().id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TroopStatus {
    Active,
    Standby,
    Offline,
    /// Any status string the roster source sends that we do not know.
    #[serde(other)]
    Unknown,
}

impl TroopStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Standby => "standby",
            Self::Offline => "offline",
            Self::Unknown => "unknown",
        }
    }
}

/// A field unit on the roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Troop {
    #[serde(flatten)]
    pub entity: GeoEntity,
    pub status: TroopStatus,
    #[serde(rename = "lastPing", default)]
    pub last_ping: String,
    #[serde(rename = "videoFeedUrl", default, skip_serializing_if = "Option::is_none")]
    pub video_feed_url: Option<String>,
    #[serde(rename = "thumbnailUrl", default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

impl Troop {
    pub fn new(entity: GeoEntity, status: TroopStatus, last_ping: &str) -> Self {
        Self {
            entity,
            status,
            last_ping: last_ping.to_string(),
            video_feed_url: None,
            thumbnail_url: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.entity.display_name
    }

    pub fn is_active(&self) -> bool {
        self.status == TroopStatus::Active
    }
}

impl Georeferenced for Troop {
    fn geo(&self) -> &GeoEntity {
        &self.entity
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    Objective,
    Threat,
    /// Point of interest.
    Poi,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetStatus {
    Active,
    Neutralized,
    Investigating,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
    #[serde(other)]
    Unknown,
}

/// An objective, threat or point of interest on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    #[serde(flatten)]
    pub entity: GeoEntity,
    #[serde(rename = "type")]
    pub target_type: TargetType,
    pub status: TargetStatus,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Target {
    pub fn new(
        entity: GeoEntity,
        target_type: TargetType,
        status: TargetStatus,
        priority: Priority,
    ) -> Self {
        Self {
            entity,
            target_type,
            status,
            priority,
            description: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.entity.display_name
    }

    pub fn is_active(&self) -> bool {
        self.status == TargetStatus::Active
    }
}

impl Georeferenced for Target {
    fn geo(&self) -> &GeoEntity {
        &self.entity
    }
}

/// Wearable telemetry for one troop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthData {
    pub heart_rate: u32,
    pub body_temp: f64,
    pub blood_oxygen: u32,
    pub stress: u32,
    pub battery: u32,
    pub armor_integrity: u32,
}

/// Sensor mode of the scope feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum ScopeMode {
    Vis,
    Mwir,
    #[default]
    Thermal,
    Fusion,
}

impl ScopeMode {
    pub const ALL: [ScopeMode; 4] = [
        ScopeMode::Vis,
        ScopeMode::Mwir,
        ScopeMode::Thermal,
        ScopeMode::Fusion,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Vis => "VIS",
            Self::Mwir => "MWIR",
            Self::Thermal => "THERMAL",
            Self::Fusion => "FUSION",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CommsMode {
    #[default]
    Individual,
    Broadcast,
}

impl CommsMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Individual => Self::Broadcast,
            Self::Broadcast => Self::Individual,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Individual => "INDIVIDUAL",
            Self::Broadcast => "BROADCAST",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_enum_values_degrade_instead_of_failing() {
        let status: TroopStatus = serde_json::from_str("\"missing\"").unwrap();
        assert_eq!(status, TroopStatus::Unknown);
        let kind: TargetType = serde_json::from_str("\"decoy\"").unwrap();
        assert_eq!(kind, TargetType::Unknown);
        let priority: Priority = serde_json::from_str("\"urgent\"").unwrap();
        assert_eq!(priority, Priority::Unknown);
    }

    #[test]
    fn troop_reads_roster_field_names() {
        let json = r#"{
            "id": "alpha-1", "name": "ALPHA-1", "status": "active",
            "lastPing": "00:02 ago", "lat": 34.05, "lon": -118.24, "heading": 87
        }"#;
        let troop: Troop = serde_json::from_str(json).unwrap();
        assert_eq!(troop.id(), "alpha-1");
        assert_eq!(troop.name(), "ALPHA-1");
        assert_eq!(troop.entity.heading_degrees, Some(87));
        assert_eq!(troop.entity.altitude_meters, None);
        assert!(troop.is_active());
    }

    #[test]
    fn scope_mode_cycles_through_all_modes() {
        let mut mode = ScopeMode::default();
        assert_eq!(mode, ScopeMode::Thermal);
        mode = mode.next();
        assert_eq!(mode, ScopeMode::Fusion);
        mode = mode.next();
        assert_eq!(mode, ScopeMode::Vis);
    }

    #[test]
    fn heading_is_normalized() {
        let e = GeoEntity::new("x", "X", 0.0, 0.0).with_heading(370);
        assert_eq!(e.heading_degrees, Some(10));
    }

    #[test]
    fn coordinate_validation() {
        assert!(GeoEntity::new("a", "A", 34.0, -118.0).has_valid_coordinates());
        assert!(!GeoEntity::new("b", "B", 91.0, 0.0).has_valid_coordinates());
        assert!(!GeoEntity::new("c", "C", f64::NAN, 0.0).has_valid_coordinates());
    }
}
