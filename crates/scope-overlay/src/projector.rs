//! Flat local projection of geographic coordinates onto panel fractions.
//!
//! `x = 0.5 + dLon * scale`, `y = 0.5 - dLat * scale`. No geodesic
//! correction is applied, so results are only meaningful for a tactical area
//! a few kilometers across. Output is not clamped.

use scope_model::{GeoEntity, ReferencePoint, DEFAULT_PROJECTION_SCALE};
use serde::Serialize;

/// Position as fractions of panel width and height, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectedPosition {
    pub x: f64,
    pub y: f64,
}

impl ProjectedPosition {
    /// Clamp both axes into `[min, max]`. A NaN axis lands on `min`.
    pub fn clamped(self, min: f64, max: f64) -> Self {
        let clamp = |v: f64| if v.is_nan() { min } else { v.clamp(min, max) };
        Self {
            x: clamp(self.x),
            y: clamp(self.y),
        }
    }
}

/// Map `(lat, lon)` to panel fractions centered on `reference`.
pub fn project(lat: f64, lon: f64, reference: ReferencePoint, scale: f64) -> ProjectedPosition {
    let d_lat = lat - reference.lat;
    let d_lon = lon - reference.lon;
    ProjectedPosition {
        x: 0.5 + d_lon * scale,
        y: 0.5 - d_lat * scale,
    }
}

/// A reference point and scale bundled for repeated projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    pub reference: ReferencePoint,
    /// Panel fractions per degree.
    pub scale: f64,
}

impl Projector {
    pub fn new(reference: ReferencePoint, scale: f64) -> Self {
        Self { reference, scale }
    }

    pub fn project(&self, entity: &GeoEntity) -> ProjectedPosition {
        project(entity.latitude, entity.longitude, self.reference, self.scale)
    }
}

impl Default for Projector {
    fn default() -> Self {
        Self::new(ReferencePoint::default(), DEFAULT_PROJECTION_SCALE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn reference_point_projects_to_center() {
        let r = ReferencePoint::new(34.052235, -118.243683);
        let p = project(r.lat, r.lon, r, 20.0);
        assert!((p.x - 0.5).abs() < EPS);
        assert!((p.y - 0.5).abs() < EPS);
    }

    #[test]
    fn north_is_up_and_east_is_right() {
        let r = ReferencePoint::new(0.0, 0.0);
        let north_east = project(0.01, 0.01, r, 20.0);
        assert!((north_east.x - 0.7).abs() < EPS);
        assert!((north_east.y - 0.3).abs() < EPS);
    }

    #[test]
    fn output_is_not_clamped() {
        let r = ReferencePoint::new(0.0, 0.0);
        let far = project(-1.0, 1.0, r, 20.0);
        assert!((far.x - 20.5).abs() < EPS);
        assert!((far.y - 20.5).abs() < EPS);
        let c = far.clamped(0.1, 0.9);
        assert_eq!((c.x, c.y), (0.9, 0.9));
    }

    #[test]
    fn non_finite_projection_still_lands_in_box() {
        let r = ReferencePoint::new(0.0, 0.0);
        let c = project(f64::NAN, 0.0, r, 20.0).clamped(0.1, 0.9);
        assert_eq!((c.x, c.y), (0.5, 0.1));

        let c = project(1.0, 1.0, r, f64::NAN).clamped(0.1, 0.9);
        assert_eq!((c.x, c.y), (0.1, 0.1));

        let c = project(1.0, -1.0, r, f64::INFINITY).clamped(0.1, 0.9);
        assert_eq!((c.x, c.y), (0.1, 0.1));
    }

    #[test]
    fn matches_mock_roster_layout() {
        // ALPHA-2 sits 0.01 deg north-west of the default reference.
        let p = Projector::default().project(&GeoEntity::new("a2", "ALPHA-2", 34.062235, -118.253683));
        assert!((p.x - 0.3).abs() < 1e-6);
        assert!((p.y - 0.3).abs() < 1e-6);
    }
}
