//! Viewport shell around the overlay: zoom, coordinate readout and legend.

use scope_model::{
    GeoEntity, ReferencePoint, Target, Theme, Troop, DEFAULT_ALTITUDE_METERS, DEFAULT_AREA_NAME,
    DEFAULT_PROJECTION_SCALE, DEFAULT_ZOOM_LEVEL, MAX_ZOOM_LEVEL, MIN_ZOOM_LEVEL,
};
use serde::Serialize;

use crate::composer::{compose, Scene, VisibilityOptions};
use crate::marker::ColorClass;
use crate::projector::Projector;

/// Heading as three zero-padded digits and a degree sign; "000°" when absent.
pub fn format_heading(heading: Option<u16>) -> String {
    format!("{:03}°", heading.unwrap_or(0))
}

/// Text shown in the panel's coordinate readout.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Readout {
    /// Raw position of the selected entity.
    Selected {
        name: String,
        latitude: String,
        longitude: String,
        altitude: String,
        heading: String,
    },
    /// Aggregate view when nothing is selected.
    Summary {
        area: String,
        zoom: String,
        active_targets: usize,
    },
}

impl Readout {
    fn for_entity(entity: &GeoEntity) -> Self {
        Readout::Selected {
            name: entity.display_name.clone(),
            latitude: format!("{:.6}°", entity.latitude),
            longitude: format!("{:.6}°", entity.longitude),
            altitude: format!(
                "{}m",
                entity.altitude_meters.unwrap_or(DEFAULT_ALTITUDE_METERS)
            ),
            heading: format_heading(entity.heading_degrees),
        }
    }

    /// Label/value rows in display order.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        match self {
            Readout::Selected {
                latitude,
                longitude,
                altitude,
                heading,
                ..
            } => vec![
                ("LAT:", latitude.clone()),
                ("LON:", longitude.clone()),
                ("ALT:", altitude.clone()),
                ("HDG:", heading.clone()),
            ],
            Readout::Summary {
                area,
                zoom,
                active_targets,
            } => vec![
                ("AREA:", area.clone()),
                ("ZOOM:", zoom.clone()),
                ("TARGETS:", format!("{active_targets} ACTIVE")),
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub label: &'static str,
    pub color: ColorClass,
}

/// Map legend; only drawn while targets are visible.
pub fn legend_entries(options: VisibilityOptions) -> Vec<LegendEntry> {
    if !options.show_targets {
        return Vec::new();
    }
    vec![
        LegendEntry {
            label: "Active",
            color: ColorClass::Affirmative,
        },
        LegendEntry {
            label: "Threat",
            color: ColorClass::Alert,
        },
        LegendEntry {
            label: "POI",
            color: ColorClass::Caution,
        },
    ]
}

/// Everything the GPS panel paints for one render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewportFrame {
    pub scene: Scene,
    pub readout: Readout,
    pub legend: Vec<LegendEntry>,
    pub zoom_level: u8,
}

/// GPS panel state: what is centered, how far zoomed, and the area name.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    pub reference: ReferencePoint,
    /// Projection scale at the default zoom level.
    pub base_scale: f64,
    pub area_name: String,
    zoom_level: u8,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(
            ReferencePoint::default(),
            DEFAULT_PROJECTION_SCALE,
            DEFAULT_ZOOM_LEVEL,
            DEFAULT_AREA_NAME,
        )
    }
}

impl Viewport {
    pub fn new(reference: ReferencePoint, base_scale: f64, zoom_level: u8, area_name: &str) -> Self {
        Self {
            reference,
            base_scale,
            area_name: area_name.to_string(),
            zoom_level: zoom_level.clamp(MIN_ZOOM_LEVEL, MAX_ZOOM_LEVEL),
        }
    }

    /// Same zoom and area, recentered on `point`.
    pub fn centered_on(&self, point: ReferencePoint) -> Self {
        Self {
            reference: point,
            ..self.clone()
        }
    }

    pub fn zoom_level(&self) -> u8 {
        self.zoom_level
    }

    /// Returns `false` when already at the maximum.
    pub fn zoom_in(&mut self) -> bool {
        self.set_zoom(self.zoom_level.saturating_add(1))
    }

    /// Returns `false` when already at the minimum.
    pub fn zoom_out(&mut self) -> bool {
        self.set_zoom(self.zoom_level.saturating_sub(1))
    }

    fn set_zoom(&mut self, level: u8) -> bool {
        let level = level.clamp(MIN_ZOOM_LEVEL, MAX_ZOOM_LEVEL);
        if level == self.zoom_level {
            return false;
        }
        tracing::debug!(from = self.zoom_level, to = level, "Map zoom changed");
        self.zoom_level = level;
        true
    }

    /// Effective scale; linear in zoom level, `base_scale` at 12x.
    pub fn scale(&self) -> f64 {
        self.base_scale * f64::from(self.zoom_level) / f64::from(DEFAULT_ZOOM_LEVEL)
    }

    pub fn projector(&self) -> Projector {
        Projector::new(self.reference, self.scale())
    }

    /// Readout for the selection if it resolves, the area summary otherwise.
    pub fn readout(&self, troops: &[Troop], targets: &[Target], selected_id: Option<&str>) -> Readout {
        let selected = selected_id.and_then(|id| {
            troops
                .iter()
                .map(|t| &t.entity)
                .chain(targets.iter().map(|t| &t.entity))
                .find(|e| e.id == id)
        });

        match selected {
            Some(entity) => Readout::for_entity(entity),
            None => Readout::Summary {
                area: self.area_name.clone(),
                zoom: format!("{}x", self.zoom_level),
                active_targets: targets.iter().filter(|t| t.is_active()).count(),
            },
        }
    }

    /// Compose the scene at the current zoom and wrap it with readout and legend.
    pub fn frame(
        &self,
        troops: &[Troop],
        targets: &[Target],
        selected_id: Option<&str>,
        theme: Theme,
        options: VisibilityOptions,
    ) -> ViewportFrame {
        let scene = compose(troops, targets, selected_id, &self.projector(), theme, options);
        ViewportFrame {
            scene,
            readout: self.readout(troops, targets, selected_id),
            legend: legend_entries(options),
            zoom_level: self.zoom_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_padding() {
        assert_eq!(format_heading(Some(7)), "007°");
        assert_eq!(format_heading(Some(87)), "087°");
        assert_eq!(format_heading(Some(315)), "315°");
        assert_eq!(format_heading(None), "000°");
    }

    #[test]
    fn zoom_is_bounded() {
        let mut v = Viewport::new(ReferencePoint::default(), 20.0, MAX_ZOOM_LEVEL, "X");
        assert!(!v.zoom_in());
        assert!(v.zoom_out());
        assert_eq!(v.zoom_level(), MAX_ZOOM_LEVEL - 1);

        let mut v = Viewport::new(ReferencePoint::default(), 20.0, 0, "X");
        assert_eq!(v.zoom_level(), MIN_ZOOM_LEVEL);
        assert!(!v.zoom_out());
    }

    #[test]
    fn scale_tracks_zoom() {
        let mut v = Viewport::default();
        assert!((v.scale() - 20.0).abs() < 1e-12);
        v.zoom_in();
        assert!((v.scale() - 20.0 * 13.0 / 12.0).abs() < 1e-12);
    }

    #[test]
    fn legend_hidden_without_targets() {
        let none = legend_entries(VisibilityOptions {
            show_troops: true,
            show_targets: false,
        });
        assert!(none.is_empty());
        assert_eq!(legend_entries(VisibilityOptions::default()).len(), 3);
    }
}
