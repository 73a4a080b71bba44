//! Terminal colors for overlay color classes, vitals and feed tints.

use ratatui::style::Color;
use scope_model::Theme;
use scope_overlay::ColorClass;

use crate::feed::FeedTint;
use crate::vitals::VitalLevel;

pub fn accent(theme: Theme) -> Color {
    if theme.is_night() {
        Color::Cyan
    } else {
        Color::Green
    }
}

pub fn color_class(class: ColorClass) -> Color {
    match class {
        ColorClass::Affirmative => Color::Green,
        ColorClass::Caution => Color::Yellow,
        ColorClass::Alert => Color::Red,
        ColorClass::Neutral => Color::Gray,
        ColorClass::Accent(theme) => accent(theme),
    }
}

pub fn vital_level(level: VitalLevel) -> Color {
    match level {
        VitalLevel::Nominal => Color::Green,
        VitalLevel::Caution => Color::Yellow,
        VitalLevel::Critical => Color::Red,
    }
}

pub fn feed_tint(tint: FeedTint) -> Color {
    match tint {
        FeedTint::Accent(theme) => accent(theme),
        FeedTint::Orange => Color::Rgb(255, 140, 0),
        FeedTint::Purple => Color::Magenta,
    }
}

/// Nearest of eight arrows for a compass heading.
pub fn heading_arrow(degrees: u16) -> char {
    const ARROWS: [char; 8] = ['↑', '↗', '→', '↘', '↓', '↙', '←', '↖'];
    let sector = ((u32::from(degrees % 360) * 2 + 45) / 90) % 8;
    ARROWS[sector as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows() {
        assert_eq!(heading_arrow(0), '↑');
        assert_eq!(heading_arrow(22), '↑');
        assert_eq!(heading_arrow(23), '↗');
        assert_eq!(heading_arrow(90), '→');
        assert_eq!(heading_arrow(180), '↓');
        assert_eq!(heading_arrow(270), '←');
        assert_eq!(heading_arrow(330), '↖');
        assert_eq!(heading_arrow(350), '↑');
    }

    #[test]
    fn accent_follows_theme() {
        assert_eq!(color_class(ColorClass::Accent(Theme::Night)), Color::Cyan);
        assert_eq!(color_class(ColorClass::Accent(Theme::Day)), Color::Green);
    }
}
