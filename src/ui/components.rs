//! Shared UI components (status bar, menus, help).
//!
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::keymap::KeyAction;
use crate::app::update::FILTER_OPTIONS;
use crate::app::{AppState, InputMode, ModalState};

/// Render the bottom status bar with mode, counts and active filters.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let mode = if app.roster.dialog.is_open() {
        "FORM"
    } else {
        match app.input_mode {
            InputMode::Normal => "NORMAL",
            InputMode::Search => "SEARCH",
            InputMode::Modal => "MENU",
        }
    };
    let mut chips = Vec::new();
    if !app.roster.filters.name_query.is_empty() {
        chips.push(format!("name~\"{}\"", app.roster.filters.name_query));
    }
    if let Some(s) = app.roster.filters.status {
        chips.push(format!("status={s}"));
    }
    let chips_str = if chips.is_empty() {
        String::new()
    } else {
        format!("  filters:[{}]", chips.join(","))
    };
    let msg = format!(
        "mode: {mode}  showing:{}  users:{}  rows/page:{}{}",
        app.roster.visible().len(),
        app.roster.users.len(),
        app.rows_per_page,
        chips_str
    );
    let p = Paragraph::new(msg).style(Style::default().fg(app.theme.status_fg).bg(app.theme.status_bg));
    f.render_widget(p, area);
}

/// Compute a rectangle centered within `area` with a maximum size.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Status filter menu: All Statuses / Active / Inactive.
pub fn render_filter_modal(f: &mut Frame, area: Rect, app: &AppState, state: &ModalState) {
    if let ModalState::FilterMenu { selected } = state {
        let width = 36u16.min(area.width.saturating_sub(4)).max(24);
        let rect = centered_rect(width, 7, area);
        let mut text = String::new();
        for (idx, option) in FILTER_OPTIONS.iter().enumerate() {
            let label = option.map(|s| s.as_str()).unwrap_or("All Statuses");
            let marker = if idx == *selected { "▶" } else { " " };
            let current = if *option == app.roster.filters.status { " (current)" } else { "" };
            text.push_str(&format!("{marker} {label}{current}\n"));
        }
        let p = Paragraph::new(text).block(
            Block::default()
                .title("Filter by status")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        );
        f.render_widget(Clear, rect);
        f.render_widget(p, rect);
    }
}

/// Render the help modal; key names come from the active keymap.
pub fn render_help_modal(f: &mut Frame, area: Rect, app: &AppState, scroll: u16) {
    let width = 64u16.min(area.width.saturating_sub(4)).max(40);
    let height = 20u16.min(area.height.saturating_sub(4)).max(10);
    let rect = centered_rect(width, height, area);

    let keys = |a: KeyAction| app.keymap.keys_for(a).join(", ");
    let entry = |label: &str, value: String| {
        Line::from(vec![
            Span::raw(format!("{label}: ")),
            Span::styled(value, Style::default().add_modifier(Modifier::ITALIC)),
        ])
    };
    let heading = |s: &'static str| Line::from(Span::styled(s, Style::default().add_modifier(Modifier::BOLD)));

    let lines = vec![
        heading("Users"),
        entry("Add user", keys(KeyAction::NewUser)),
        entry("Edit selected", keys(KeyAction::EditSelection)),
        entry("Delete selected", keys(KeyAction::DeleteSelection)),
        Line::raw(""),
        heading("Filters"),
        entry("Search by name", keys(KeyAction::StartSearch)),
        entry("Filter by status", keys(KeyAction::OpenFilterMenu)),
        entry("Clear filters", keys(KeyAction::ClearFilters)),
        Line::raw(""),
        heading("Navigation"),
        entry("Move", format!("{} / {}", keys(KeyAction::MoveUp), keys(KeyAction::MoveDown))),
        entry("Page", format!("{} / {}", keys(KeyAction::PageUp), keys(KeyAction::PageDown))),
        Line::raw(""),
        heading("Form"),
        entry("Next / previous field", "Tab, Down / BackTab, Up".to_string()),
        entry("Change status", "Space, Left, Right".to_string()),
        entry("Submit / cancel", "Enter / Esc".to_string()),
        Line::raw(""),
        entry("Quit", keys(KeyAction::Quit)),
        entry("Close help", "Esc / Enter".to_string()),
    ];

    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).scroll((scroll, 0)).block(
        Block::default()
            .title("Help")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}
