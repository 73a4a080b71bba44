//! Overlay composition: projected, clamped and styled markers in paint order.

use scope_model::{Target, Theme, Troop, MARKER_MAX_FRACTION, MARKER_MIN_FRACTION};
use serde::Serialize;

use crate::marker::{marker_style, EntityRef, MarkerStyle};
use crate::projector::Projector;

/// Which entity groups are drawn at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityOptions {
    pub show_troops: bool,
    pub show_targets: bool,
}

impl Default for VisibilityOptions {
    fn default() -> Self {
        Self {
            show_troops: true,
            show_targets: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Troop,
    Target,
}

/// One render-ready marker. The painter needs no further decisions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneMarker {
    pub id: String,
    pub kind: EntityKind,
    /// Clamped fraction of panel width.
    pub x: f64,
    /// Clamped fraction of panel height.
    pub y: f64,
    #[serde(flatten)]
    pub style: MarkerStyle,
    /// Direction indicator in degrees, when the entity reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<u16>,
    /// Name tag anchored above the marker; only the selection carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Draw the pulsing selection ring.
    pub selected: bool,
}

/// Markers in paint order; later entries paint over earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Scene {
    pub markers: Vec<SceneMarker>,
}

impl Scene {
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn selected(&self) -> Option<&SceneMarker> {
        self.markers.iter().find(|m| m.selected)
    }
}

fn place(
    entity: EntityRef<'_>,
    kind: EntityKind,
    selected_id: Option<&str>,
    projector: &Projector,
    theme: Theme,
) -> SceneMarker {
    let geo = entity.geo();
    let is_selected = selected_id == Some(geo.id.as_str());
    let pos = projector
        .project(geo)
        .clamped(MARKER_MIN_FRACTION, MARKER_MAX_FRACTION);

    SceneMarker {
        id: geo.id.clone(),
        kind,
        x: pos.x,
        y: pos.y,
        style: marker_style(entity, is_selected, theme),
        heading: geo.heading_degrees,
        label: is_selected.then(|| geo.display_name.clone()),
        selected: is_selected,
    }
}

/// Compose the overlay scene.
///
/// Troops are laid out first, then targets, each in slice order. Hidden
/// groups are skipped entirely. A `selected_id` that matches nothing simply
/// produces no highlight.
pub fn compose(
    troops: &[Troop],
    targets: &[Target],
    selected_id: Option<&str>,
    projector: &Projector,
    theme: Theme,
    options: VisibilityOptions,
) -> Scene {
    let mut markers = Vec::new();

    if options.show_troops {
        markers.extend(
            troops
                .iter()
                .map(|t| place(EntityRef::Troop(t), EntityKind::Troop, selected_id, projector, theme)),
        );
    }
    if options.show_targets {
        markers.extend(
            targets
                .iter()
                .map(|t| place(EntityRef::Target(t), EntityKind::Target, selected_id, projector, theme)),
        );
    }

    tracing::trace!(
        markers = markers.len(),
        selected = selected_id.unwrap_or("-"),
        "Overlay scene composed"
    );

    Scene { markers }
}
