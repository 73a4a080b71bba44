//! Troop and target roster.
//!
//! The roster is replaced wholesale on every refresh. It is either the
//! built-in mock data set or a JSON document of the form
//! `{ "troops": [...], "targets": [...] }`.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    GeoEntity, Georeferenced, ModelError, Priority, Target, TargetStatus, TargetType, Troop,
    TroopStatus,
};

const FEED_BASE_URL: &str = "https://images.unsplash.com";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default)]
    pub troops: Vec<Troop>,
    #[serde(default)]
    pub targets: Vec<Target>,
}

impl Roster {
    pub fn new(troops: Vec<Troop>, targets: Vec<Target>) -> Result<Self, ModelError> {
        let roster = Self { troops, targets };
        roster.validate()?;
        Ok(roster)
    }

    /// Parse and validate a roster JSON document.
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let roster: Roster = serde_json::from_str(json)?;
        roster.validate()?;
        Ok(roster)
    }

    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let raw = std::fs::read_to_string(path)?;
        let roster = Self::from_json(&raw)?;
        tracing::info!(
            path = %path.display(),
            troops = roster.troops.len(),
            targets = roster.targets.len(),
            "Roster loaded"
        );
        Ok(roster)
    }

    /// Ids must be unique across troops and targets, coordinates in range.
    fn validate(&self) -> Result<(), ModelError> {
        let mut seen = HashSet::new();
        let entities = self
            .troops
            .iter()
            .map(Georeferenced::geo)
            .chain(self.targets.iter().map(Georeferenced::geo));
        for entity in entities {
            if !seen.insert(entity.id.as_str()) {
                return Err(ModelError::DuplicateId(entity.id.clone()));
            }
            if !entity.has_valid_coordinates() {
                return Err(ModelError::InvalidCoordinate {
                    id: entity.id.clone(),
                    lat: entity.latitude,
                    lon: entity.longitude,
                });
            }
            if let Some(heading) = entity.heading_degrees.filter(|h| *h >= 360) {
                return Err(ModelError::InvalidHeading {
                    id: entity.id.clone(),
                    heading,
                });
            }
        }
        Ok(())
    }

    pub fn find_troop(&self, id: &str) -> Result<&Troop, ModelError> {
        self.troops
            .iter()
            .find(|t| t.entity.id == id)
            .ok_or_else(|| ModelError::TroopNotFound(id.to_string()))
    }

    /// Troops with status active, in roster order.
    pub fn active_troops(&self) -> Vec<&Troop> {
        self.troops.iter().filter(|t| t.is_active()).collect()
    }

    pub fn active_target_count(&self) -> usize {
        self.targets.iter().filter(|t| t.is_active()).count()
    }

    /// The built-in demonstration roster around downtown Los Angeles.
    pub fn mock() -> Self {
        Self {
            troops: mock_troops(),
            targets: mock_targets(),
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn troop(
    id: &str,
    name: &str,
    status: TroopStatus,
    last_ping: &str,
    (lat, lon): (f64, f64),
    altitude: u32,
    heading: u16,
    photo: &str,
) -> Troop {
    let entity = GeoEntity::new(id, name, lat, lon)
        .with_altitude(altitude)
        .with_heading(heading);
    let mut t = Troop::new(entity, status, last_ping);
    t.video_feed_url = Some(format!("{FEED_BASE_URL}/{photo}?w=1080"));
    t.thumbnail_url = Some(format!("{FEED_BASE_URL}/{photo}?w=400"));
    t
}

fn mock_troops() -> Vec<Troop> {
    use TroopStatus::*;
    vec![
        troop("alpha-1", "ALPHA-1", Active, "00:02 ago", (34.052235, -118.243683), 1245, 87, "photo-1715098652741-3613654cd2b8"),
        troop("alpha-2", "ALPHA-2", Active, "00:05 ago", (34.062235, -118.253683), 1280, 120, "photo-1600461689921-6f67bb7233ae"),
        troop("alpha-3", "ALPHA-3", Standby, "01:24 ago", (34.042235, -118.233683), 1210, 45, "photo-1763092664939-fd5abc952387"),
        troop("bravo-1", "BRAVO-1", Active, "00:01 ago", (34.072235, -118.263683), 1320, 200, "photo-1688584177352-a40d4ba17561"),
        troop("bravo-2", "BRAVO-2", Offline, "12:45 ago", (34.032235, -118.223683), 1180, 315, "photo-1664292241455-de41d03c5897"),
        troop("bravo-3", "BRAVO-3", Active, "00:03 ago", (34.082235, -118.273683), 1350, 90, "photo-1715098652741-3613654cd2b8"),
        troop("charlie-1", "CHARLIE-1", Standby, "02:18 ago", (34.022235, -118.213683), 1150, 270, "photo-1600461689921-6f67bb7233ae"),
        troop("charlie-2", "CHARLIE-2", Active, "00:08 ago", (34.092235, -118.283683), 1380, 180, "photo-1763092664939-fd5abc952387"),
    ]
}

fn target(
    id: &str,
    name: &str,
    target_type: TargetType,
    (lat, lon): (f64, f64),
    status: TargetStatus,
    priority: Priority,
    description: &str,
) -> Target {
    let mut t = Target::new(GeoEntity::new(id, name, lat, lon), target_type, status, priority);
    t.description = Some(description.to_string());
    t
}

fn mock_targets() -> Vec<Target> {
    vec![
        target(
            "target-1",
            "OBJECTIVE ALPHA",
            TargetType::Objective,
            (34.065235, -118.255683),
            TargetStatus::Active,
            Priority::High,
            "Primary mission objective - Building Delta-7",
        ),
        target(
            "target-2",
            "THREAT BRAVO",
            TargetType::Threat,
            (34.048235, -118.238683),
            TargetStatus::Active,
            Priority::High,
            "Hostile activity detected",
        ),
        target(
            "target-3",
            "POI CHARLIE",
            TargetType::Poi,
            (34.078235, -118.268683),
            TargetStatus::Investigating,
            Priority::Medium,
            "Suspicious vehicle - Under surveillance",
        ),
        target(
            "target-4",
            "OBJECTIVE DELTA",
            TargetType::Objective,
            (34.038235, -118.228683),
            TargetStatus::Active,
            Priority::Medium,
            "Secondary extraction point",
        ),
    ]
}
