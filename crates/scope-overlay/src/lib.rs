//! Geospatial overlay renderer for the GPS tracking panel.
//!
//! Pipeline, leaves first:
//! 1. `projector` maps (lat, lon) to panel fractions around a reference point
//! 2. `marker` derives color, icon and animation from entity enumerations
//! 3. `composer` merges both into an ordered, clamped [`Scene`]
//! 4. `viewport` wraps the scene with readout, legend and zoom state
//!
//! Every stage is a pure function of its inputs; the theme and the selection
//! are passed in, never read from shared state.

pub mod composer;
pub mod marker;
pub mod projector;
pub mod viewport;

pub use composer::{compose, EntityKind, Scene, SceneMarker, VisibilityOptions};
pub use marker::{marker_style, ColorClass, EntityRef, IconKind, MarkerStyle};
pub use projector::{project, ProjectedPosition, Projector};
pub use viewport::{format_heading, legend_entries, LegendEntry, Readout, Viewport, ViewportFrame};
