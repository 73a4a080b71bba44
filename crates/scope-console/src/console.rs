//! Interactive NSG Scope terminal: login, tactical dashboard and scope view.
//!
//! Launch with `scope-console`. Ctrl+C exits from any screen.

use std::io::{self, Stdout};
use std::time::Duration;

use chrono::{DateTime, Utc};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame, Terminal,
};
use scope_model::{
    CommsMode, HealthData, Roster, ScopeMode, Theme, Troop, INITIAL_MISSION_SECS,
    SYSTEM_DESIGNATION,
};
use scope_overlay::{marker_style, EntityRef, Viewport, ViewportFrame, VisibilityOptions};

use crate::config::ConsoleConfig;
use crate::feed::{feed_hud_rows, mode_tint, scope_status_rows};
use crate::map_widget::MapWidget;
use crate::palette;
use crate::roster_view::{FeedCycler, RosterPager};
use crate::session::{Screen, Session};
use crate::ticker::{HeaderClock, MissionClock, Ticker};
use crate::vitals::{simulate_health, vital_readings};

const MAX_MESSAGES: usize = 500;
const STATUS_GRID_TROOPS: usize = 4;
const VITAL_BAR_WIDTH: usize = 16;

/// Per-frame values that change outside of key handling.
struct ConsoleSnapshot {
    clock: String,
    mission_time: String,
    map: Option<ViewportFrame>,
}

pub struct ScopeConsole {
    roster: Roster,
    viewport: Viewport,
    session: Session,
    theme: Theme,
    tick_interval: Duration,
    /// Login input buffer; `cursor_pos` is a byte offset on a char boundary.
    input: String,
    cursor_pos: usize,
    pager: RosterPager,
    cycler: FeedCycler,
    /// Troop highlighted on the dashboard map.
    map_selection: Option<String>,
    mic_live: bool,
    comms: CommsMode,
    scope_mode: ScopeMode,
    show_targets: bool,
    health: Option<HealthData>,
    console_messages: Vec<(DateTime<Utc>, String, Color)>,
    header_clock: HeaderClock,
    header_ticker: Option<Ticker>,
    mission_clock: MissionClock,
    mission_ticker: Option<Ticker>,
}

impl ScopeConsole {
    pub fn new(config: &ConsoleConfig, roster: Roster) -> Self {
        let pager = RosterPager::new(roster.troops.len());
        let cycler = FeedCycler::new(roster.active_troops().len());
        Self {
            viewport: config.viewport(),
            session: Session::new(),
            theme: config.theme,
            tick_interval: config.tick_interval(),
            input: String::new(),
            cursor_pos: 0,
            pager,
            cycler,
            map_selection: None,
            mic_live: false,
            comms: CommsMode::default(),
            scope_mode: ScopeMode::default(),
            show_targets: true,
            health: None,
            console_messages: Vec::new(),
            header_clock: HeaderClock::new(),
            header_ticker: None,
            mission_clock: MissionClock::new(INITIAL_MISSION_SECS),
            mission_ticker: None,
            roster,
        }
    }

    pub fn screen(&self) -> &Screen {
        self.session.screen()
    }

    fn visibility(&self) -> VisibilityOptions {
        VisibilityOptions {
            show_troops: true,
            show_targets: self.show_targets,
        }
    }

    fn accent(&self) -> Color {
        palette::accent(self.theme)
    }

    /// Active troop currently shown in the live feed.
    fn feed_troop(&self) -> Option<&Troop> {
        let index = self.cycler.index()?;
        self.roster.active_troops().get(index).copied()
    }

    fn snapshot(&self) -> ConsoleSnapshot {
        let map = match self.session.screen() {
            Screen::LoggedOut => None,
            Screen::Dashboard => Some(self.viewport.frame(
                &self.roster.troops,
                &self.roster.targets,
                self.map_selection.as_deref(),
                self.theme,
                self.visibility(),
            )),
            Screen::Scope(id) => self.roster.find_troop(id).ok().map(|troop| {
                self.viewport.centered_on(troop.entity.position()).frame(
                    std::slice::from_ref(troop),
                    &self.roster.targets,
                    Some(id.as_str()),
                    self.theme,
                    self.visibility(),
                )
            }),
        };
        ConsoleSnapshot {
            clock: self.header_clock.formatted(),
            mission_time: self.mission_clock.formatted(),
            map,
        }
    }

    fn add_message(&mut self, msg: &str, color: Color) {
        self.console_messages.push((Utc::now(), msg.to_string(), color));
        if self.console_messages.len() > MAX_MESSAGES {
            self.console_messages.remove(0);
        }
    }

    // --- transitions -----------------------------------------------------

    fn submit_login(&mut self) {
        let username = std::mem::take(&mut self.input);
        self.cursor_pos = 0;
        match self.session.login(&username) {
            Ok(operator) => {
                let greeting = format!(
                    "Welcome, {} {} ({})",
                    operator.rank.as_deref().unwrap_or(""),
                    operator.designation,
                    operator.position
                );
                self.add_message(greeting.trim(), Color::Green);
                self.map_selection = self.roster.troops.first().map(|t| t.entity.id.clone());
                self.header_clock.refresh();
                self.header_ticker = Some(self.header_clock.start(self.tick_interval));
            }
            Err(e) => self.add_message(&format!("Login failed: {e}"), Color::Red),
        }
    }

    fn open_selected_scope(&mut self) {
        let Some(troop_id) = self
            .pager
            .selected_index()
            .and_then(|i| self.roster.troops.get(i))
            .map(|t| t.entity.id.clone())
        else {
            self.add_message("No troop selected", Color::Yellow);
            return;
        };
        self.open_scope(&troop_id);
    }

    fn open_scope(&mut self, troop_id: &str) {
        if let Err(e) = self.session.open_scope(troop_id) {
            self.add_message(&e.to_string(), Color::Red);
            return;
        }
        self.health = Some(simulate_health(&mut rand::thread_rng()));
        self.mission_clock = MissionClock::new(INITIAL_MISSION_SECS);
        self.mission_ticker = Some(self.mission_clock.start(self.tick_interval));
        self.add_message(&format!("Scope view: {troop_id}"), self.accent());
    }

    fn leave_scope(&mut self) {
        if let Err(e) = self.session.back_to_dashboard() {
            self.add_message(&e.to_string(), Color::Red);
            return;
        }
        if let Some(mut ticker) = self.mission_ticker.take() {
            ticker.cancel();
        }
        self.health = None;
    }

    fn logout(&mut self) {
        if let Err(e) = self.session.logout() {
            self.add_message(&e.to_string(), Color::Red);
            return;
        }
        // Dropping a ticker cancels it.
        self.mission_ticker = None;
        self.header_ticker = None;
        self.map_selection = None;
        self.health = None;
        self.pager = RosterPager::new(self.roster.troops.len());
        self.cycler = FeedCycler::new(self.roster.active_troops().len());
        self.add_message("Logged out", Color::Gray);
    }

    fn cycle_feed(&mut self, forward: bool) {
        if forward {
            self.cycler.next();
        } else {
            self.cycler.previous();
        }
        if let Some(id) = self.feed_troop().map(|t| t.entity.id.clone()) {
            self.map_selection = Some(id);
        }
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        tracing::debug!(theme = %self.theme, "Theme toggled");
    }

    fn zoom(&mut self, zoom_in: bool) {
        let changed = if zoom_in {
            self.viewport.zoom_in()
        } else {
            self.viewport.zoom_out()
        };
        if !changed {
            self.add_message(
                &format!("Zoom limit reached ({}x)", self.viewport.zoom_level()),
                Color::DarkGray,
            );
        }
    }

    /// Toggles shared by the dashboard and the scope view.
    fn handle_toggle(&mut self, c: char) {
        match c {
            'n' => self.toggle_theme(),
            'm' => self.mic_live = !self.mic_live,
            'c' => self.comms = self.comms.toggled(),
            'v' => self.scope_mode = self.scope_mode.next(),
            't' => self.show_targets = !self.show_targets,
            '+' | '=' => self.zoom(true),
            '-' => self.zoom(false),
            'l' => self.logout(),
            _ => {}
        }
    }

    // --- keys ------------------------------------------------------------

    fn handle_login_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter => self.submit_login(),
            KeyCode::Char(c) if !c.is_control() => {
                self.input.insert(self.cursor_pos, c);
                self.cursor_pos += c.len_utf8();
            }
            KeyCode::Backspace => {
                if let Some((idx, _)) = self.input[..self.cursor_pos].char_indices().next_back() {
                    self.input.remove(idx);
                    self.cursor_pos = idx;
                }
            }
            KeyCode::Left => {
                if let Some((idx, _)) = self.input[..self.cursor_pos].char_indices().next_back() {
                    self.cursor_pos = idx;
                }
            }
            KeyCode::Right => {
                if let Some(c) = self.input[self.cursor_pos..].chars().next() {
                    self.cursor_pos += c.len_utf8();
                }
            }
            KeyCode::Home => self.cursor_pos = 0,
            KeyCode::End => self.cursor_pos = self.input.len(),
            _ => {}
        }
    }

    fn handle_dashboard_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up => self.pager.cursor_up(),
            KeyCode::Down => self.pager.cursor_down(),
            KeyCode::PageUp => {
                self.pager.previous_page();
            }
            KeyCode::PageDown => {
                self.pager.next_page();
            }
            KeyCode::Left => self.cycle_feed(false),
            KeyCode::Right => self.cycle_feed(true),
            KeyCode::Enter => self.open_selected_scope(),
            KeyCode::Char(c) => self.handle_toggle(c),
            _ => {}
        }
    }

    fn handle_scope_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc | KeyCode::Backspace => self.leave_scope(),
            KeyCode::Char(c) => self.handle_toggle(c),
            _ => {}
        }
    }

    /// Handle keyboard input. Returns `true` if the console should exit.
    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }
        match self.session.screen() {
            Screen::LoggedOut => self.handle_login_key(code),
            Screen::Dashboard => self.handle_dashboard_key(code),
            Screen::Scope(_) => self.handle_scope_key(code),
        }
        false
    }

    // --- rendering -------------------------------------------------------

    fn render(&self, frame: &mut Frame, snap: &ConsoleSnapshot) {
        match self.session.screen() {
            Screen::LoggedOut => {
                let area = frame.area();
                self.render_login(frame, area);
            }
            Screen::Dashboard => self.render_dashboard(frame, snap),
            Screen::Scope(id) => self.render_scope(frame, snap, id),
        }
    }

    fn render_login(&self, frame: &mut Frame, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(9),
                Constraint::Length(6),
                Constraint::Min(1),
            ])
            .split(area);
        let column = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(52),
                Constraint::Min(1),
            ])
            .split(rows[1])[1];

        let block = Block::default()
            .title(format!(" {SYSTEM_DESIGNATION} "))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.accent()));

        let input_line = if self.input.is_empty() {
            Line::from(vec![
                Span::styled("  > ", Style::default().fg(self.accent())),
                Span::styled("username", Style::default().fg(Color::DarkGray)),
            ])
        } else {
            Line::from(vec![
                Span::styled("  > ", Style::default().fg(self.accent())),
                Span::styled(self.input.as_str(), Style::default().fg(Color::White)),
            ])
        };

        let lines = vec![
            Line::from(Span::styled(
                "  TACTICAL OPERATIONS SYSTEM",
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled("  OPERATOR LOGIN", Style::default().fg(Color::Gray))),
            Line::from(""),
            input_line,
            Line::from(""),
            Line::from(Span::styled(
                "  Enter to sign in  |  admin, officer  |  Ctrl+C to exit",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        frame.render_widget(Paragraph::new(lines).block(block), column);

        let cursor_x = column.x + 5 + self.input[..self.cursor_pos].chars().count() as u16;
        frame.set_cursor_position((cursor_x, column.y + 4));

        let log_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(52),
                Constraint::Min(1),
            ])
            .split(rows[2])[1];
        self.render_console_output(frame, log_area);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, snap: &ConsoleSnapshot, extra: Vec<Span>) {
        let block = Block::default()
            .title(format!(" {SYSTEM_DESIGNATION} "))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.accent()));

        let (name, rank) = match self.session.operator() {
            Some(op) => (op.designation.as_str(), op.rank.as_deref().unwrap_or("-")),
            None => ("-", "-"),
        };
        let mic = if self.mic_live { "MIC LIVE" } else { "MIC OFF" };
        let mic_color = if self.mic_live { Color::Red } else { Color::DarkGray };

        let mut spans = vec![
            Span::styled("  ", Style::default()),
            Span::styled(snap.clock.clone(), Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
            Span::styled("  |  ", Style::default().fg(Color::DarkGray)),
            Span::styled(format!("{rank} {name}"), Style::default().fg(self.accent())),
            Span::styled("  |  Comms: ", Style::default().fg(Color::Gray)),
            Span::styled(self.comms.label(), Style::default().fg(Color::White)),
            Span::styled("  |  ", Style::default().fg(Color::DarkGray)),
            Span::styled(mic, Style::default().fg(mic_color)),
            Span::styled("  |  Mode: ", Style::default().fg(Color::Gray)),
            Span::styled(self.theme.to_string(), Style::default().fg(self.accent())),
        ];
        spans.extend(extra);
        frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
    }

    fn render_dashboard(&self, frame: &mut Frame, snap: &ConsoleSnapshot) {
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(12),   // Roster | feed | map
                Constraint::Length(4), // Status grid
                Constraint::Length(6), // Console output
                Constraint::Length(1), // Key hints
            ])
            .split(frame.area());

        self.render_header(frame, outer[0], snap, Vec::new());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(30),
                Constraint::Percentage(35),
                Constraint::Percentage(35),
            ])
            .split(outer[1]);
        self.render_roster(frame, columns[0]);
        self.render_feed(frame, columns[1]);
        if let Some(map) = &snap.map {
            self.render_map(frame, columns[2], map, " GPS TRACKING ");
        }

        self.render_status_grid(frame, outer[2]);
        self.render_console_output(frame, outer[3]);
        self.render_hints(
            frame,
            outer[4],
            "↑↓ select  PgUp/PgDn page  ←→ feed  Enter scope  +/- zoom  t targets  v mode  c comms  m mic  n night  l logout",
        );
    }

    fn render_roster(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(format!(" TROOPS {} ", self.pager.label()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White));

        let selected = self.pager.selected_index();
        let rows: Vec<Row> = self.roster.troops[self.pager.visible_range()]
            .iter()
            .enumerate()
            .map(|(offset, troop)| {
                let index = self.pager.visible_range().start + offset;
                let status_color =
                    palette::color_class(marker_style(EntityRef::Troop(troop), false, self.theme).color);
                let mut row = Row::new(vec![
                    Span::styled(troop.name().to_string(), Style::default().fg(Color::White)),
                    Span::styled(troop.status.as_str().to_uppercase(), Style::default().fg(status_color)),
                    Span::styled(troop.last_ping.clone(), Style::default().fg(Color::DarkGray)),
                ]);
                if Some(index) == selected {
                    row = row.style(Style::default().add_modifier(Modifier::REVERSED));
                }
                row
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(10),
                Constraint::Length(8),
                Constraint::Min(6),
            ],
        )
        .header(
            Row::new(vec!["UNIT", "STATUS", "PING"])
                .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        )
        .block(block);
        frame.render_widget(table, area);
    }

    fn render_feed(&self, frame: &mut Frame, area: Rect) {
        let tint = mode_tint(self.scope_mode, self.theme).map(palette::feed_tint);
        let block = Block::default()
            .title(format!(" LIVE FEED | {} ", self.cycler.label()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(tint.unwrap_or(Color::White)));

        let Some(troop) = self.feed_troop() else {
            let text = Paragraph::new(Line::from(Span::styled(
                "  NO ACTIVE FEEDS",
                Style::default().fg(Color::DarkGray),
            )))
            .block(block);
            frame.render_widget(text, area);
            return;
        };

        let mut lines = vec![
            Line::from(vec![
                Span::styled("  ● REC ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
                Span::styled(troop.name().to_string(), Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
            ]),
            Line::from(Span::styled(
                format!("  {}", troop.video_feed_url.as_deref().unwrap_or("NO SIGNAL")),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(""),
        ];
        for (label, value) in feed_hud_rows(troop, self.scope_mode) {
            lines.push(Line::from(vec![
                Span::styled(format!("  {label:<10}"), Style::default().fg(Color::Gray)),
                Span::styled(value, Style::default().fg(tint.unwrap_or(Color::White))),
            ]));
        }
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_map(&self, frame: &mut Frame, area: Rect, map: &ViewportFrame, title: &str) {
        let block = Block::default()
            .title(format!("{title}| {}x [+][-] ", map.zoom_level))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.accent()));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let readout = map.readout.rows();
        let footer_height = readout.len() as u16 + u16::from(!map.legend.is_empty());
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(footer_height)])
            .split(inner);

        frame.render_widget(
            MapWidget {
                scene: &map.scene,
                grid_color: Color::DarkGray,
            },
            parts[0],
        );

        let mut lines: Vec<Line> = readout
            .into_iter()
            .map(|(label, value)| {
                Line::from(vec![
                    Span::styled(format!(" {label:<9}"), Style::default().fg(Color::Gray)),
                    Span::styled(value, Style::default().fg(self.accent())),
                ])
            })
            .collect();
        if !map.legend.is_empty() {
            let mut spans = vec![Span::raw(" ")];
            for entry in &map.legend {
                spans.push(Span::styled("● ", Style::default().fg(palette::color_class(entry.color))));
                spans.push(Span::styled(format!("{}  ", entry.label), Style::default().fg(Color::Gray)));
            }
            lines.push(Line::from(spans));
        }
        frame.render_widget(Paragraph::new(lines), parts[1]);
    }

    fn render_status_grid(&self, frame: &mut Frame, area: Rect) {
        let troops: Vec<&Troop> = self.roster.troops.iter().take(STATUS_GRID_TROOPS).collect();
        if troops.is_empty() {
            return;
        }
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, troops.len() as u32); troops.len()])
            .split(area);

        for (troop, cell) in troops.into_iter().zip(cells.iter()) {
            let color = palette::color_class(marker_style(EntityRef::Troop(troop), false, self.theme).color);
            let block = Block::default()
                .title(format!(" {} ", troop.name()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color));
            let line = Line::from(vec![
                Span::styled(format!(" {}", troop.status.as_str().to_uppercase()), Style::default().fg(color)),
                Span::styled(format!("  {}", troop.last_ping), Style::default().fg(Color::DarkGray)),
            ]);
            frame.render_widget(Paragraph::new(line).block(block), *cell);
        }
    }

    fn render_scope(&self, frame: &mut Frame, snap: &ConsoleSnapshot, troop_id: &str) {
        let Ok(troop) = self.roster.find_troop(troop_id) else {
            let area = frame.area();
            self.render_not_found(frame, area);
            return;
        };

        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(12),
                Constraint::Length(5),
                Constraint::Length(1),
            ])
            .split(frame.area());

        let extra = vec![
            Span::styled("  |  Mission: ", Style::default().fg(Color::Gray)),
            Span::styled(
                snap.mission_time.clone(),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ];
        self.render_header(frame, outer[0], snap, extra);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(35),
                Constraint::Percentage(35),
                Constraint::Percentage(30),
            ])
            .split(outer[1]);
        if let Some(map) = &snap.map {
            self.render_map(frame, columns[0], map, &format!(" {} ", troop.name()));
        }
        self.render_optics(frame, columns[1], troop);
        self.render_vitals(frame, columns[2]);
        self.render_console_output(frame, outer[2]);
        self.render_hints(
            frame,
            outer[3],
            "Esc dashboard  v mode  +/- zoom  t targets  c comms  m mic  n night  l logout",
        );
    }

    fn render_not_found(&self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "TROOP NOT FOUND",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled("Esc: back to dashboard", Style::default().fg(Color::DarkGray))),
        ];
        let block = Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Red));
        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center).block(block),
            area,
        );
    }

    fn render_optics(&self, frame: &mut Frame, area: Rect, troop: &Troop) {
        let tint = mode_tint(self.scope_mode, self.theme)
            .map(palette::feed_tint)
            .unwrap_or(Color::White);
        let block = Block::default()
            .title(format!(" SCOPE | {} ", self.scope_mode.label()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(tint));

        let reticle = Style::default().fg(tint);
        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled("│", reticle)),
            Line::from(Span::styled("──── ┼ ────", reticle)),
            Line::from(Span::styled("│", reticle)),
            Line::from(""),
        ];
        for (label, value) in feed_hud_rows(troop, self.scope_mode)
            .into_iter()
            .take(4)
            .chain(scope_status_rows(self.scope_mode))
        {
            lines.push(Line::from(vec![
                Span::styled(format!("{label:<10}"), Style::default().fg(Color::Gray)),
                Span::styled(format!("{value:>10}"), Style::default().fg(tint)),
            ]));
        }
        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center).block(block),
            area,
        );
    }

    fn render_vitals(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" VITALS ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White));

        let Some(health) = &self.health else {
            let text = Paragraph::new(Line::from(Span::styled(
                "  NO TELEMETRY",
                Style::default().fg(Color::DarkGray),
            )))
            .block(block);
            frame.render_widget(text, area);
            return;
        };

        let mut lines = Vec::new();
        for reading in vital_readings(health) {
            let color = palette::vital_level(reading.level);
            let mut value_style = Style::default().fg(color);
            if reading.critical {
                value_style = value_style.add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK);
            }
            let filled = usize::from(reading.percentage) * VITAL_BAR_WIDTH / 100;
            lines.push(Line::from(vec![
                Span::styled(format!(" {:<11}", reading.label), Style::default().fg(Color::Gray)),
                Span::styled(reading.value, value_style),
            ]));
            lines.push(Line::from(vec![
                Span::raw(" "),
                Span::styled("█".repeat(filled), Style::default().fg(color)),
                Span::styled("░".repeat(VITAL_BAR_WIDTH - filled), Style::default().fg(Color::DarkGray)),
            ]));
        }
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    /// Render the console output area (most recent messages that fit).
    fn render_console_output(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Console ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));

        let inner_height = area.height.saturating_sub(2) as usize;
        let start = self.console_messages.len().saturating_sub(inner_height);
        let lines: Vec<Line> = self.console_messages[start..]
            .iter()
            .map(|(ts, msg, color)| {
                Line::from(vec![
                    Span::styled(
                        format!(" [{}] ", ts.format("%H:%M:%S")),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(msg.as_str(), Style::default().fg(*color)),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_hints(&self, frame: &mut Frame, area: Rect, hints: &str) {
        let line = Line::from(Span::styled(format!(" {hints}"), Style::default().fg(Color::DarkGray)));
        frame.render_widget(Paragraph::new(line), area);
    }
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run the console event loop until Ctrl+C.
pub async fn run_console(config: ConsoleConfig, roster: Roster) -> Result<(), anyhow::Error> {
    use std::io::IsTerminal;
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        return Err(anyhow::anyhow!("Scope console requires a terminal (TTY)."));
    }

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let mut terminal = setup_terminal()?;
    let mut console = ScopeConsole::new(&config, roster);
    tracing::info!(troops = console.roster.troops.len(), "Scope console started");

    let tick_rate = Duration::from_millis(100); // ~10fps

    let result = loop {
        let snapshot = console.snapshot();
        if let Err(e) = terminal.draw(|frame| console.render(frame, &snapshot)) {
            break Err(e);
        }

        match event::poll(tick_rate) {
            Ok(true) => match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if console.handle_key(key.code, key.modifiers) {
                        break Ok(());
                    }
                }
                Ok(_) => {}
                Err(e) => break Err(e),
            },
            Ok(false) => {}
            Err(e) => break Err(e),
        }
        // Let the UI tickers run between frames.
        tokio::task::yield_now().await;
    };

    drop(console);
    restore_terminal(&mut terminal)?;
    tracing::info!("Scope console stopped");
    Ok(result?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn console() -> ScopeConsole {
        ScopeConsole::new(&ConsoleConfig::default(), Roster::mock())
    }

    fn type_text(c: &mut ScopeConsole, text: &str) {
        for ch in text.chars() {
            c.handle_key(KeyCode::Char(ch), KeyModifiers::NONE);
        }
    }

    fn press(c: &mut ScopeConsole, code: KeyCode) -> bool {
        c.handle_key(code, KeyModifiers::NONE)
    }

    fn logged_in() -> ScopeConsole {
        let mut c = console();
        type_text(&mut c, "admin");
        press(&mut c, KeyCode::Enter);
        c
    }

    fn rendered_text(c: &ScopeConsole) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 45)).unwrap();
        let snap = c.snapshot();
        terminal.draw(|f| c.render(f, &snap)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[tokio::test]
    async fn login_selects_first_troop_and_starts_clock() {
        let c = logged_in();
        assert_eq!(c.screen(), &Screen::Dashboard);
        assert_eq!(c.map_selection.as_deref(), Some("alpha-1"));
        assert!(c.header_ticker.as_ref().is_some_and(|t| t.is_running()));
        assert_eq!(c.session.operator().unwrap().designation, "Commander");
    }

    #[tokio::test]
    async fn blank_login_reports_error() {
        let mut c = console();
        type_text(&mut c, "   ");
        press(&mut c, KeyCode::Enter);
        assert_eq!(c.screen(), &Screen::LoggedOut);
        let (_, msg, color) = c.console_messages.last().unwrap();
        assert!(msg.starts_with("Login failed"));
        assert_eq!(*color, Color::Red);
        assert!(c.header_ticker.is_none());
    }

    #[test]
    fn login_input_editing() {
        let mut c = console();
        type_text(&mut c, "ofcer");
        press(&mut c, KeyCode::Left);
        press(&mut c, KeyCode::Left);
        press(&mut c, KeyCode::Left);
        type_text(&mut c, "fi");
        assert_eq!(c.input, "officer");
        press(&mut c, KeyCode::End);
        press(&mut c, KeyCode::Backspace);
        assert_eq!(c.input, "office");
        press(&mut c, KeyCode::Home);
        press(&mut c, KeyCode::Backspace);
        assert_eq!(c.input, "office");
    }

    #[test]
    fn ctrl_c_exits_from_login() {
        let mut c = console();
        assert!(c.handle_key(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!press(&mut c, KeyCode::Char('c')));
    }

    #[tokio::test]
    async fn map_selection_follows_feed_cycle() {
        let mut c = logged_in();
        assert_eq!(c.cycler.label(), "TROOP 1/5");
        press(&mut c, KeyCode::Right);
        assert_eq!(c.map_selection.as_deref(), Some("alpha-2"));
        press(&mut c, KeyCode::Right);
        assert_eq!(c.map_selection.as_deref(), Some("bravo-1"));
        press(&mut c, KeyCode::Left);
        press(&mut c, KeyCode::Left);
        press(&mut c, KeyCode::Left);
        assert_eq!(c.map_selection.as_deref(), Some("charlie-2"));
        assert_eq!(c.cycler.label(), "TROOP 5/5");
    }

    #[tokio::test]
    async fn scope_view_lifecycle() {
        let mut c = logged_in();
        press(&mut c, KeyCode::Down);
        press(&mut c, KeyCode::Enter);
        assert_eq!(c.screen(), &Screen::Scope("alpha-2".into()));
        assert!(c.health.is_some());
        assert_eq!(c.mission_clock.seconds(), INITIAL_MISSION_SECS);
        assert!(c.mission_ticker.as_ref().is_some_and(|t| t.is_running()));

        press(&mut c, KeyCode::Esc);
        assert_eq!(c.screen(), &Screen::Dashboard);
        assert!(c.mission_ticker.is_none());
        assert!(c.header_ticker.is_some());
    }

    #[tokio::test]
    async fn comms_toggles_inside_scope_view() {
        let mut c = logged_in();
        press(&mut c, KeyCode::Enter);
        assert!(matches!(c.screen(), Screen::Scope(_)));
        press(&mut c, KeyCode::Char('c'));
        assert_eq!(c.comms, CommsMode::Broadcast);
        let text = rendered_text(&c);
        assert!(text.contains("c comms"));
        press(&mut c, KeyCode::Char('c'));
        assert_eq!(c.comms, CommsMode::Individual);
        assert!(matches!(c.screen(), Screen::Scope(_)));
    }

    #[tokio::test]
    async fn logout_clears_selection_and_timers() {
        let mut c = logged_in();
        press(&mut c, KeyCode::Right);
        press(&mut c, KeyCode::Enter);
        press(&mut c, KeyCode::Char('l'));
        assert_eq!(c.screen(), &Screen::LoggedOut);
        assert!(c.map_selection.is_none());
        assert!(c.header_ticker.is_none() && c.mission_ticker.is_none());
        assert!(c.session.operator().is_none());
        assert_eq!(c.cycler.label(), "TROOP 1/5");
    }

    #[tokio::test]
    async fn toggles_and_zoom() {
        let mut c = logged_in();
        type_text(&mut c, "nmcvt+");
        assert_eq!(c.theme, Theme::Night);
        assert!(c.mic_live);
        assert_eq!(c.comms, CommsMode::Broadcast);
        assert_eq!(c.scope_mode, ScopeMode::Fusion);
        assert!(!c.show_targets);
        assert_eq!(c.viewport.zoom_level(), 13);

        let snap = c.snapshot();
        let map = snap.map.unwrap();
        assert!(map.legend.is_empty());
        assert_eq!(map.scene.markers.len(), 8);
    }

    #[tokio::test]
    async fn dashboard_renders_panels() {
        let c = logged_in();
        let text = rendered_text(&c);
        assert!(text.contains("TROOPS 1-5 of 8"));
        assert!(text.contains("LIVE FEED | TROOP 1/5"));
        assert!(text.contains("RANGE"));
        assert!(text.contains("2,847m"));
        assert!(text.contains("ALPHA-1"));
        assert!(text.contains("34.052235°"));
    }

    #[tokio::test]
    async fn unknown_troop_renders_not_found() {
        let mut c = logged_in();
        c.session.open_scope("ghost-9").unwrap();
        let text = rendered_text(&c);
        assert!(text.contains("TROOP NOT FOUND"));
        press(&mut c, KeyCode::Esc);
        assert_eq!(c.screen(), &Screen::Dashboard);
    }

    #[tokio::test]
    async fn scope_renders_mission_time_and_vitals() {
        let mut c = logged_in();
        press(&mut c, KeyCode::Enter);
        let text = rendered_text(&c);
        assert!(text.contains("01:04:05"));
        assert!(text.contains("HEART RATE"));
        assert!(text.contains("LRF"));
        assert!(text.contains("THERMAL"));
    }

    #[test]
    fn message_log_is_capped() {
        let mut c = console();
        for i in 0..(MAX_MESSAGES + 20) {
            c.add_message(&format!("msg {i}"), Color::White);
        }
        assert_eq!(c.console_messages.len(), MAX_MESSAGES);
        assert_eq!(c.console_messages[0].1, "msg 20");
    }
}
