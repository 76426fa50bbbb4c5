//! Main UI Application
//!
//! Coordinates rendering and input handling across all screens.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::catalog::SkillTree;
use crate::data::PlannerData;
use crate::planner::{share, Planner, SkillRef};
use crate::save::{self, BuildLibrary};

/// Truncate a string to fit within max_len characters, adding "…" if truncated
fn truncate_name(name: &str, max_len: usize) -> String {
    if name.chars().count() <= max_len {
        name.to_string()
    } else if max_len <= 1 {
        "…".to_string()
    } else {
        let truncated: String = name.chars().take(max_len - 1).collect();
        format!("{}…", truncated)
    }
}

/// Which screen has input focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Planner,
    Library,
    Help,
    /// Naming a build before it goes into the library
    SaveName,
}

/// Main UI application
pub struct App {
    planner: Planner<'static>,
    /// Tree with focus in the sidebar
    tree_cursor: usize,
    /// Selected skill row inside the focused tree
    skill_cursor: usize,
    screen: Screen,
    /// Saved builds, loaded once at startup
    library: BuildLibrary,
    library_cursor: usize,
    /// Name buffer while saving a build
    name_input: String,
    /// One-line feedback shown in the footer
    status: Option<String>,
}

impl App {
    pub fn new() -> Self {
        let data = PlannerData::shared();
        Self {
            planner: data.planner(),
            tree_cursor: 0,
            skill_cursor: 0,
            screen: Screen::Planner,
            library: save::load_library(),
            library_cursor: 0,
            name_input: String::new(),
            status: None,
        }
    }

    /// Start from a shared build: a full share query or a bare build string.
    pub fn with_query(raw: &str) -> Self {
        let mut app = Self::new();
        let is_query = raw.starts_with('?')
            || raw.contains(&format!("{}=", share::POINTS_PARAM))
            || raw.contains(&format!("{}=", share::COLLECTIONS_PARAM));
        let query = if is_query {
            raw.to_string()
        } else {
            format!("{}={}", share::POINTS_PARAM, raw)
        };
        app.planner.load_query(&query);
        log::info!(
            "Opened shared build: {} points",
            app.planner.total_points()
        );
        app
    }

    /// Handle keyboard input, returns true if should quit
    pub fn handle_input(&mut self, key: KeyEvent) -> Result<bool> {
        // Global quit shortcut
        if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(true);
        }

        match self.screen {
            Screen::Planner => self.handle_planner_input(key),
            Screen::Library => self.handle_library_input(key),
            Screen::Help => self.handle_help_input(key),
            Screen::SaveName => self.handle_save_name_input(key),
        }
    }

    fn handle_planner_input(&mut self, key: KeyEvent) -> Result<bool> {
        match key.code {
            KeyCode::Char('q') => return Ok(true),
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => self.next_tree(),
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => self.prev_tree(),
            KeyCode::Down | KeyCode::Char('j') => self.next_skill(),
            KeyCode::Up | KeyCode::Char('k') => self.prev_skill(),
            KeyCode::Enter | KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Char(' ') => {
                self.invest_selected()
            }
            KeyCode::Backspace | KeyCode::Char('-') => self.remove_selected(),
            KeyCode::Char(']') => {
                let c = self.planner.collections();
                self.planner.set_collections(c.saturating_add(1));
            }
            KeyCode::Char('[') => {
                let c = self.planner.collections();
                self.planner.set_collections(c.saturating_sub(1));
            }
            KeyCode::Char('r') => {
                self.planner.reset();
                self.status = Some("Build cleared".to_string());
            }
            KeyCode::Char('s') => {
                self.name_input.clear();
                self.screen = Screen::SaveName;
            }
            KeyCode::Char('b') => {
                self.library_cursor = 0;
                self.screen = Screen::Library;
            }
            KeyCode::Char('?') => self.screen = Screen::Help,
            _ => {}
        }
        Ok(false)
    }

    fn handle_library_input(&mut self, key: KeyEvent) -> Result<bool> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('q') => {
                self.screen = Screen::Planner;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.library_cursor + 1 < self.library.len() {
                    self.library_cursor += 1;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.library_cursor = self.library_cursor.saturating_sub(1);
            }
            KeyCode::Enter => {
                if let Some(build) = self.library.get(self.library_cursor) {
                    let name = build.name.clone();
                    let query = build.query.clone();
                    self.planner.load_query(&query);
                    self.status = Some(format!("Loaded '{}'", name));
                    self.screen = Screen::Planner;
                }
            }
            KeyCode::Char('d') => {
                if let Some(removed) = self.library.remove(self.library_cursor) {
                    self.persist_library();
                    self.status = Some(format!("Deleted '{}'", removed.name));
                    if self.library_cursor >= self.library.len() {
                        self.library_cursor = self.library.len().saturating_sub(1);
                    }
                }
            }
            _ => {}
        }
        Ok(false)
    }

    fn handle_help_input(&mut self, key: KeyEvent) -> Result<bool> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
                self.screen = Screen::Planner;
            }
            _ => {}
        }
        Ok(false)
    }

    fn handle_save_name_input(&mut self, key: KeyEvent) -> Result<bool> {
        match key.code {
            KeyCode::Esc => self.screen = Screen::Planner,
            KeyCode::Enter => {
                let name = self.name_input.trim().to_string();
                if !name.is_empty() {
                    let query = self.planner.share_query();
                    self.library.upsert(name.clone(), query);
                    self.persist_library();
                    self.status = Some(format!("Saved '{}'", name));
                    self.screen = Screen::Planner;
                }
            }
            KeyCode::Backspace => {
                self.name_input.pop();
            }
            KeyCode::Char(c) => {
                if self.name_input.chars().count() < 40 {
                    self.name_input.push(c);
                }
            }
            _ => {}
        }
        Ok(false)
    }

    fn persist_library(&mut self) {
        if let Err(e) = save::save_library(&self.library) {
            log::warn!("Failed to save build library: {}", e);
            self.status = Some(format!("Save failed: {}", e));
        }
    }

    // Cursor helpers

    fn tree_count(&self) -> usize {
        self.planner.catalog().trees().len()
    }

    fn selected_tree(&self) -> Option<&'static SkillTree> {
        self.planner.catalog().trees().get(self.tree_cursor)
    }

    fn selected_skill(&self) -> Option<SkillRef> {
        let tree = self.selected_tree()?;
        let skill = tree.skills.get(self.skill_cursor)?;
        Some(SkillRef::new(tree.id, skill.id))
    }

    fn next_tree(&mut self) {
        let count = self.tree_count();
        if count > 0 {
            self.tree_cursor = (self.tree_cursor + 1) % count;
            self.skill_cursor = 0;
        }
    }

    fn prev_tree(&mut self) {
        let count = self.tree_count();
        if count > 0 {
            self.tree_cursor = (self.tree_cursor + count - 1) % count;
            self.skill_cursor = 0;
        }
    }

    fn next_skill(&mut self) {
        if let Some(tree) = self.selected_tree() {
            if self.skill_cursor + 1 < tree.skills.len() {
                self.skill_cursor += 1;
            }
        }
    }

    fn prev_skill(&mut self) {
        self.skill_cursor = self.skill_cursor.saturating_sub(1);
    }

    fn invest_selected(&mut self) {
        if let Some(skill) = self.selected_skill() {
            if self.planner.invest(skill) {
                self.status = None;
            } else {
                self.status = Some("Nothing to add here".to_string());
            }
        }
    }

    fn remove_selected(&mut self) {
        if let Some(skill) = self.selected_skill() {
            if self.planner.remove(skill) {
                self.status = None;
            } else {
                self.status = Some("Nothing to take back".to_string());
            }
        }
    }

    // Rendering

    pub fn render(&self, frame: &mut Frame) {
        // Clear the entire screen first to prevent artifacts
        frame.render_widget(Clear, frame.area());

        match self.screen {
            Screen::Planner => self.render_planner(frame),
            Screen::Library => self.render_library(frame),
            Screen::Help => self.render_help(frame),
            Screen::SaveName => {
                self.render_planner(frame);
                self.render_save_popup(frame);
            }
        }
    }

    fn render_planner(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(10), Constraint::Length(6)])
            .split(frame.area());

        let main = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
            .split(chunks[0]);

        self.render_tree_list(frame, main[0]);
        self.render_skill_list(frame, main[1]);
        self.render_footer(frame, chunks[1]);
    }

    fn render_tree_list(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Trees ")
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = Vec::new();
        for (i, tree) in self.planner.catalog().trees().iter().enumerate() {
            let is_selected = i == self.tree_cursor;
            let prefix = if is_selected { "> " } else { "  " };
            let points = self.planner.tree_points(tree.id);

            let style = if is_selected {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else if points > 0 {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::Gray)
            };

            let mut spans = vec![Span::styled(
                format!("{}{}", prefix, truncate_name(tree.id.name(), 20)),
                style,
            )];
            if points > 0 {
                spans.push(Span::styled(
                    format!(" {}p", points),
                    Style::default().fg(Color::Yellow),
                ));
            }
            lines.push(Line::from(spans));
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_skill_list(&self, frame: &mut Frame, area: Rect) {
        let Some(tree) = self.selected_tree() else {
            let block = Block::default().borders(Borders::ALL).title(" Skills ");
            frame.render_widget(block, area);
            return;
        };

        let title = format!(
            " {} · {:.0}% complete ",
            tree.id.name(),
            self.planner.tree_progress(tree.id)
        );
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = Vec::new();
        for (i, skill) in tree.skills.iter().enumerate() {
            let is_selected = i == self.skill_cursor;
            let prefix = if is_selected { "> " } else { "  " };
            let skill_ref = SkillRef::new(tree.id, skill.id);
            let points = self.planner.get(skill_ref);

            let name_style = if is_selected {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else if points > 0 {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::Gray)
            };

            let mut spans = vec![
                Span::styled(
                    format!("{}{:<30}", prefix, truncate_name(&skill.name, 28)),
                    name_style,
                ),
                Span::styled(
                    format!("{:>3}%  ", skill.unlock_percent),
                    Style::default().fg(Color::DarkGray),
                ),
            ];

            if skill.investable() {
                let points_color = if points == skill.max_points {
                    Color::Green
                } else if points > 0 {
                    Color::Yellow
                } else {
                    Color::DarkGray
                };
                spans.push(Span::styled(
                    format!("{}/{}", points, skill.max_points),
                    Style::default().fg(points_color),
                ));
            } else {
                spans.push(Span::styled(
                    "passive",
                    Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
                ));
            }

            if self.planner.is_shared(skill_ref) {
                spans.push(Span::styled(" *", Style::default().fg(Color::Magenta)));
            }

            lines.push(Line::from(spans));
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Build ")
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let totals = Line::from(vec![
            Span::raw("Points: "),
            Span::styled(
                format!("{}", self.planner.total_points()),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::raw("   Required level: "),
            Span::styled(
                format!("{}", self.planner.required_level()),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw("   Collections: "),
            Span::styled(
                format!("{}", self.planner.collections()),
                Style::default().fg(Color::Green),
            ),
        ]);

        let share = Line::from(vec![
            Span::styled("Share: ", Style::default().fg(Color::Gray)),
            Span::styled(self.planner.share_query(), Style::default().fg(Color::Cyan)),
        ]);

        // Linked-skill detail for the selection, if any.
        let detail = match self.selected_skill() {
            Some(skill) if self.planner.is_shared(skill) => {
                let linked: Vec<String> = self
                    .planner
                    .linked(skill)
                    .iter()
                    .map(|m| self.describe_skill(*m))
                    .collect();
                Line::from(Span::styled(
                    format!("* moves with: {}", linked.join(", ")),
                    Style::default().fg(Color::Magenta),
                ))
            }
            _ => Line::from(""),
        };

        let last = match &self.status {
            Some(status) => Line::from(Span::styled(
                status.clone(),
                Style::default().fg(Color::Yellow),
            )),
            None => Line::from(Span::styled(
                "[+/-] points  [h/l] tree  [j/k] skill  [[/]] collections  [r] reset  [s] save  [b] builds  [?] help  [q] quit",
                Style::default().fg(Color::DarkGray),
            )),
        };

        frame.render_widget(Paragraph::new(vec![totals, share, detail, last]), inner);
    }

    /// "Tree - Skill" label for footer details.
    fn describe_skill(&self, skill: SkillRef) -> String {
        let name = self
            .planner
            .catalog()
            .skill(skill.tree, skill.skill)
            .map(|s| s.name.as_str())
            .unwrap_or("?");
        format!("{} - {}", skill.tree.name(), name)
    }

    fn render_library(&self, frame: &mut Frame) {
        let area = frame.area();
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Saved Builds ")
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = vec![Line::from("")];

        if self.library.is_empty() {
            lines.push(Line::from(Span::styled(
                "No saved builds yet. Press [s] in the planner to add one.",
                Style::default().fg(Color::Gray),
            )));
        } else {
            for (i, build) in self.library.builds.iter().enumerate() {
                let is_selected = i == self.library_cursor;
                let prefix = if is_selected { "> " } else { "  " };
                let style = if is_selected {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                lines.push(Line::from(vec![
                    Span::styled(format!("{}{:<24}", prefix, truncate_name(&build.name, 22)), style),
                    Span::styled(
                        truncate_name(&build.query, 50),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]));
            }
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "[Enter] Load  [d] Delete  [Esc] Back",
            Style::default().fg(Color::DarkGray),
        )));

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_help(&self, frame: &mut Frame) {
        let area = centered_rect(70, 80, frame.area());
        frame.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Help ")
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let key_style = Style::default().fg(Color::Yellow);
        let lines = vec![
            Line::from(Span::styled(
                "Keys",
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![Span::styled("  Tab / h / l      ", key_style), Span::raw("switch tree")]),
            Line::from(vec![Span::styled("  j / k            ", key_style), Span::raw("move between skills")]),
            Line::from(vec![Span::styled("  Enter / + / Space", key_style), Span::raw(" add a point")]),
            Line::from(vec![Span::styled("  Backspace / -    ", key_style), Span::raw("take a point back")]),
            Line::from(vec![Span::styled("  [ / ]            ", key_style), Span::raw("adjust completed collections")]),
            Line::from(vec![Span::styled("  r                ", key_style), Span::raw("clear the whole build")]),
            Line::from(vec![Span::styled("  s                ", key_style), Span::raw("save the build under a name")]),
            Line::from(vec![Span::styled("  b                ", key_style), Span::raw("open saved builds")]),
            Line::from(vec![Span::styled("  q / Ctrl+q       ", key_style), Span::raw("quit")]),
            Line::from(""),
            Line::from(Span::styled(
                "Notes",
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("  Skills marked * are shared: their points move together"),
            Line::from("  across every linked tree, each stopping at its own cap."),
            Line::from(""),
            Line::from("  Collections stand in for skill points when working out"),
            Line::from("  the required angler level."),
            Line::from(""),
            Line::from("  The share line is the build's URL form. Paste it after"),
            Line::from("  the planner address, or pass it as a launch argument."),
            Line::from(""),
            Line::from(Span::styled(
                "[Esc] Back",
                Style::default().fg(Color::DarkGray),
            )),
        ];

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_save_popup(&self, frame: &mut Frame) {
        let area = centered_rect(50, 20, frame.area());
        frame.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Save Build ")
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::raw("  Name: "),
                Span::styled(
                    format!("{}_", self.name_input),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "  [Enter] Save  [Esc] Cancel",
                Style::default().fg(Color::DarkGray),
            )),
        ];

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
