//! GPS map panel: paints a composed [`Scene`] into a terminal buffer.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};
use scope_overlay::{IconKind, Scene, SceneMarker};

use crate::palette;

const GRID_COLS: u16 = 8;
const GRID_ROWS: u16 = 4;

/// Cell for a panel fraction; `None` when the area has no room.
pub fn cell_for(area: Rect, x: f64, y: f64) -> Option<(u16, u16)> {
    if area.width == 0 || area.height == 0 {
        return None;
    }
    let col = (x.clamp(0.0, 1.0) * f64::from(area.width - 1)).round() as u16;
    let row = (y.clamp(0.0, 1.0) * f64::from(area.height - 1)).round() as u16;
    Some((area.x + col, area.y + row))
}

fn glyph(icon: IconKind) -> char {
    match icon {
        IconKind::Pin => '●',
        IconKind::Warning => '▲',
        IconKind::Target => '◎',
    }
}

pub struct MapWidget<'a> {
    pub scene: &'a Scene,
    pub grid_color: Color,
}

impl MapWidget<'_> {
    fn in_area(area: Rect, x: u16, y: u16) -> bool {
        x >= area.x && x < area.right() && y >= area.y && y < area.bottom()
    }

    fn render_grid(&self, area: Rect, buf: &mut Buffer) {
        let style = Style::default().fg(self.grid_color);
        for y in (area.y..area.bottom()).step_by(GRID_ROWS as usize) {
            for x in (area.x..area.right()).step_by(GRID_COLS as usize) {
                buf[(x, y)].set_char('·').set_style(style);
            }
        }
    }

    fn render_marker(&self, marker: &SceneMarker, area: Rect, buf: &mut Buffer) {
        let Some((x, y)) = cell_for(area, marker.x, marker.y) else {
            return;
        };
        let mut style = Style::default().fg(palette::color_class(marker.style.color));
        if marker.style.animated {
            style = style.add_modifier(Modifier::SLOW_BLINK);
        }
        if marker.selected {
            style = style.add_modifier(Modifier::BOLD);
        }
        buf[(x, y)].set_char(glyph(marker.style.icon)).set_style(style);

        if let Some(heading) = marker.heading {
            if Self::in_area(area, x, y + 1) {
                buf[(x, y + 1)]
                    .set_char(palette::heading_arrow(heading))
                    .set_style(style.remove_modifier(Modifier::SLOW_BLINK));
            }
        }
    }

    /// Brackets and name tag around the selection, drawn over everything else.
    fn render_selection(&self, marker: &SceneMarker, area: Rect, buf: &mut Buffer) {
        let Some((x, y)) = cell_for(area, marker.x, marker.y) else {
            return;
        };
        let style = Style::default()
            .fg(palette::color_class(marker.style.color))
            .add_modifier(Modifier::BOLD);
        if x > area.x {
            buf[(x - 1, y)].set_char('[').set_style(style);
        }
        if x + 1 < area.right() {
            buf[(x + 1, y)].set_char(']').set_style(style);
        }
        if let Some(label) = &marker.label {
            if y > area.y {
                let len = label.chars().count() as u16;
                let start = x
                    .saturating_sub(len / 2)
                    .max(area.x)
                    .min(area.right().saturating_sub(len).max(area.x));
                buf.set_stringn(
                    start,
                    y - 1,
                    label,
                    usize::from(area.right() - start),
                    style,
                );
            }
        }
    }
}

impl Widget for MapWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.render_grid(area, buf);
        // Paint order: later markers draw over earlier ones.
        for marker in &self.scene.markers {
            self.render_marker(marker, area, buf);
        }
        if let Some(selected) = self.scene.selected() {
            self.render_selection(selected, area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scope_model::{Roster, Theme};
    use scope_overlay::{Viewport, VisibilityOptions};

    #[test]
    fn fractions_map_to_cells() {
        let area = Rect::new(2, 3, 41, 21);
        assert_eq!(cell_for(area, 0.5, 0.5), Some((22, 13)));
        assert_eq!(cell_for(area, 0.1, 0.9), Some((6, 21)));
        assert_eq!(cell_for(Rect::new(0, 0, 0, 5), 0.5, 0.5), None);
    }

    #[test]
    fn selected_marker_is_bracketed_and_labelled() {
        let roster = Roster::mock();
        let frame = Viewport::default().frame(
            &roster.troops,
            &[],
            Some("alpha-1"),
            Theme::Night,
            VisibilityOptions::default(),
        );
        let area = Rect::new(0, 0, 41, 21);
        let mut buf = Buffer::empty(area);
        MapWidget {
            scene: &frame.scene,
            grid_color: Color::DarkGray,
        }
        .render(area, &mut buf);

        // ALPHA-1 sits on the reference point.
        assert_eq!(buf[(20, 10)].symbol(), "●");
        assert_eq!(buf[(19, 10)].symbol(), "[");
        assert_eq!(buf[(21, 10)].symbol(), "]");
        assert_eq!(buf[(20, 10)].fg, Color::Cyan);
        let label: String = (17..24).map(|x| buf[(x, 9)].symbol().to_string()).collect();
        assert_eq!(label, "ALPHA-1");
    }

    #[test]
    fn tiny_area_does_not_panic() {
        let roster = Roster::mock();
        let frame = Viewport::default().frame(
            &roster.troops,
            &roster.targets,
            Some("target-1"),
            Theme::Day,
            VisibilityOptions::default(),
        );
        for (w, h) in [(1, 1), (2, 1), (1, 3), (3, 2)] {
            let area = Rect::new(0, 0, w, h);
            let mut buf = Buffer::empty(area);
            MapWidget {
                scene: &frame.scene,
                grid_color: Color::DarkGray,
            }
            .render(area, &mut buf);
        }
    }
}
