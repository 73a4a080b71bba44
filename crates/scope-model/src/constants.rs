/// System designation shown in the header and on the login screen.
pub const SYSTEM_DESIGNATION: &str = "NSG - 25196";

/// Reference point treated as the visual center of the GPS panel.
pub const DEFAULT_REFERENCE_LAT: f64 = 34.052235;
pub const DEFAULT_REFERENCE_LON: f64 = -118.243683;

/// Panel fractions per degree of latitude/longitude at the default zoom.
pub const DEFAULT_PROJECTION_SCALE: f64 = 20.0;

/// Default and bounds for the map zoom level (displayed as "12x").
pub const DEFAULT_ZOOM_LEVEL: u8 = 12;
pub const MIN_ZOOM_LEVEL: u8 = 1;
pub const MAX_ZOOM_LEVEL: u8 = 24;

/// Markers never render closer than 10% to a panel edge.
pub const MARKER_MIN_FRACTION: f64 = 0.10;
pub const MARKER_MAX_FRACTION: f64 = 0.90;

/// Altitude shown when an entity does not report one.
pub const DEFAULT_ALTITUDE_METERS: u32 = 1245;

pub const DEFAULT_AREA_NAME: &str = "LOS ANGELES";

pub const ROSTER_PAGE_SIZE: usize = 5;

/// Mission clock starting value in seconds (01:04:05).
pub const INITIAL_MISSION_SECS: u64 = 3845;
