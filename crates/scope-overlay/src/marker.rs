//! Per-entity visual state: color class, icon and pulse animation.

use scope_model::{GeoEntity, Priority, Target, TargetType, Theme, Troop, TroopStatus};
use serde::Serialize;

/// Semantic marker color. The shell maps these to concrete terminal colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorClass {
    /// Green.
    Affirmative,
    /// Yellow.
    Caution,
    /// Red.
    Alert,
    /// Gray, used for anything we cannot classify.
    Neutral,
    /// Theme accent: cyan at night, green by day.
    Accent(Theme),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IconKind {
    /// Map pin, used for troops.
    Pin,
    /// Warning triangle, used for threats.
    Warning,
    /// Generic target reticle.
    Target,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MarkerStyle {
    pub color: ColorClass,
    pub animated: bool,
    pub icon: IconKind,
}

/// Borrowed view over either kind of overlay entity.
#[derive(Debug, Clone, Copy)]
pub enum EntityRef<'a> {
    Troop(&'a Troop),
    Target(&'a Target),
}

impl<'a> EntityRef<'a> {
    pub fn geo(&self) -> &'a GeoEntity {
        match *self {
            EntityRef::Troop(t) => &t.entity,
            EntityRef::Target(t) => &t.entity,
        }
    }
}

/// Troop status → color. Unknown statuses fall back to neutral.
pub fn troop_status_color(status: TroopStatus) -> ColorClass {
    match status {
        TroopStatus::Active => ColorClass::Affirmative,
        TroopStatus::Standby => ColorClass::Caution,
        TroopStatus::Offline => ColorClass::Alert,
        TroopStatus::Unknown => ColorClass::Neutral,
    }
}

/// Target type → color. Objectives follow the theme accent.
pub fn target_type_color(target_type: TargetType, theme: Theme) -> ColorClass {
    match target_type {
        TargetType::Threat => ColorClass::Alert,
        TargetType::Objective => ColorClass::Accent(theme),
        TargetType::Poi => ColorClass::Caution,
        TargetType::Unknown => ColorClass::Neutral,
    }
}

/// Derive the marker style for one entity.
///
/// Selection always wins over status/type color and uses the theme accent.
pub fn marker_style(entity: EntityRef<'_>, is_selected: bool, theme: Theme) -> MarkerStyle {
    let (base_color, animated, icon) = match entity {
        EntityRef::Troop(troop) => (troop_status_color(troop.status), is_selected, IconKind::Pin),
        EntityRef::Target(target) => {
            let icon = if target.target_type == TargetType::Threat {
                IconKind::Warning
            } else {
                IconKind::Target
            };
            (
                target_type_color(target.target_type, theme),
                target.priority == Priority::High,
                icon,
            )
        }
    };

    MarkerStyle {
        color: if is_selected {
            ColorClass::Accent(theme)
        } else {
            base_color
        },
        animated,
        icon,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scope_model::TargetStatus;

    fn troop(status: TroopStatus) -> Troop {
        Troop::new(GeoEntity::new("t", "T", 0.0, 0.0), status, "")
    }

    fn target(target_type: TargetType, priority: Priority) -> Target {
        Target::new(
            GeoEntity::new("g", "G", 0.0, 0.0),
            target_type,
            TargetStatus::Active,
            priority,
        )
    }

    #[test]
    fn troop_status_colors() {
        let cases = [
            (TroopStatus::Active, ColorClass::Affirmative),
            (TroopStatus::Standby, ColorClass::Caution),
            (TroopStatus::Offline, ColorClass::Alert),
            (TroopStatus::Unknown, ColorClass::Neutral),
        ];
        for (status, expected) in cases {
            let t = troop(status);
            let style = marker_style(EntityRef::Troop(&t), false, Theme::Day);
            assert_eq!(style.color, expected, "status {status:?}");
            assert_eq!(style.icon, IconKind::Pin);
            assert!(!style.animated);
        }
    }

    #[test]
    fn selection_overrides_color_with_theme_accent() {
        let t = troop(TroopStatus::Offline);
        let night = marker_style(EntityRef::Troop(&t), true, Theme::Night);
        assert_eq!(night.color, ColorClass::Accent(Theme::Night));
        assert!(night.animated);
        let day = marker_style(EntityRef::Troop(&t), true, Theme::Day);
        assert_eq!(day.color, ColorClass::Accent(Theme::Day));
    }

    #[test]
    fn only_high_priority_targets_pulse() {
        for (priority, expected) in [
            (Priority::High, true),
            (Priority::Medium, false),
            (Priority::Low, false),
            (Priority::Unknown, false),
        ] {
            let g = target(TargetType::Poi, priority);
            assert_eq!(marker_style(EntityRef::Target(&g), false, Theme::Day).animated, expected);
        }
    }

    #[test]
    fn target_icons_and_colors() {
        let threat = target(TargetType::Threat, Priority::Low);
        let s = marker_style(EntityRef::Target(&threat), false, Theme::Night);
        assert_eq!(s.icon, IconKind::Warning);
        assert_eq!(s.color, ColorClass::Alert);

        let objective = target(TargetType::Objective, Priority::Low);
        let s = marker_style(EntityRef::Target(&objective), false, Theme::Night);
        assert_eq!(s.icon, IconKind::Target);
        assert_eq!(s.color, ColorClass::Accent(Theme::Night));

        let odd = target(TargetType::Unknown, Priority::Low);
        let s = marker_style(EntityRef::Target(&odd), false, Theme::Day);
        assert_eq!(s.icon, IconKind::Target);
        assert_eq!(s.color, ColorClass::Neutral);
    }
}
