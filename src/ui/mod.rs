pub mod components;
pub mod users;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{AppState, InputMode, ModalState};
use crate::model::Status;

pub fn render(f: &mut Frame, app: &mut AppState) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5), Constraint::Length(1)].as_ref())
        .split(f.area());
    let area = f.area();

    render_toolbar(f, root[0], app);
    users::render_users_table(f, root[1], app);
    components::render_status_bar(f, root[2], app);

    if app.roster.dialog.is_open() {
        users::render_user_form(f, area, app);
    } else if let Some(state) = app.modal.clone() {
        match state {
            ModalState::FilterMenu { .. } => components::render_filter_modal(f, area, app, &state),
            ModalState::Help { scroll } => components::render_help_modal(f, area, app, scroll),
        }
    }
}

/// Header block: search prompt, status filter and the add hint.
fn render_toolbar(f: &mut Frame, area: ratatui::layout::Rect, app: &AppState) {
    let searching = app.input_mode == InputMode::Search;
    let query = &app.roster.filters.name_query;
    let query_span = if searching {
        Span::styled(
            format!("{query}_"),
            Style::default().fg(app.theme.highlight_fg).add_modifier(Modifier::BOLD),
        )
    } else if query.is_empty() {
        Span::styled("(any)", Style::default().fg(app.theme.muted))
    } else {
        Span::raw(query.clone())
    };
    let status = match app.roster.filters.status {
        None => "All Statuses",
        Some(s) => s.as_str(),
    };
    let line = Line::from(vec![
        Span::raw("Search by Name: "),
        query_span,
        Span::raw("   Status: "),
        Span::styled(status, status_style(app, app.roster.filters.status)),
        Span::styled("   n: Add User  /: search  f: filter  ?: help  q: quit", Style::default().fg(app.theme.muted)),
    ]);
    let p = Paragraph::new(line)
        .block(
            Block::default()
                .title("User Management")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .style(Style::default().fg(app.theme.header_fg).bg(app.theme.header_bg));
    f.render_widget(p, area);
}

/// Color for a status label.
pub fn status_style(app: &AppState, status: Option<Status>) -> Style {
    match status {
        Some(Status::Active) => Style::default().fg(app.theme.active),
        Some(Status::Inactive) => Style::default().fg(app.theme.inactive),
        None => Style::default().fg(app.theme.text),
    }
}
