use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table};

use crate::app::AppState;
use crate::model::{FormField, Status};

/// The users table: one row per visible record, paged around the row cursor.
pub fn render_users_table(f: &mut Frame, area: Rect, app: &mut AppState) {
    let body_height = area.height.saturating_sub(3) as usize;
    if body_height > 0 {
        app.rows_per_page = body_height;
    }
    app.clamp_selection();
    let app: &AppState = app;

    let visible = app.roster.visible();
    let total = app.roster.users.len();
    let per_page = app.rows_per_page.max(1);
    let start = (app.selected_index / per_page) * per_page;
    let end = (start + per_page).min(visible.len());
    let slice = &visible[start..end];

    let mut rows: Vec<Row> = slice
        .iter()
        .enumerate()
        .map(|(i, u)| {
            let style = if start + i == app.selected_index {
                Style::default().fg(app.theme.highlight_fg).bg(app.theme.highlight_bg).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(app.theme.text)
            };
            Row::new(vec![
                Cell::from(u.photo.clone()),
                Cell::from(u.name.clone()),
                Cell::from(u.email.clone()),
                Cell::from(Status::label(u.status)).style(super::status_style(app, u.status)),
                Cell::from(u.city.clone()),
            ])
            .style(style)
        })
        .collect();

    if rows.is_empty() {
        let msg = if total == 0 { "No users yet. Press n to add one." } else { "No users match the current filters." };
        rows.push(Row::new(vec![Cell::from(""), Cell::from(msg)]).style(Style::default().fg(app.theme.muted)));
    }

    let widths = [
        Constraint::Percentage(20),
        Constraint::Percentage(22),
        Constraint::Percentage(26),
        Constraint::Length(10),
        Constraint::Percentage(20),
    ];

    let header = Row::new(vec!["Photo", "Name", "Email", "Status", "City"])
        .style(Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD));

    let title = format!("Users ({}/{})", visible.len(), total);
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().title(title).borders(Borders::ALL).border_style(Style::default().fg(app.theme.border)))
        .column_spacing(1);

    f.render_widget(table, area);
}

/// The add/edit dialog bound to whichever draft is active.
pub fn render_user_form(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(draft) = app.roster.dialog.draft() else {
        return;
    };
    let width = 64u16.min(area.width.saturating_sub(4)).max(40);
    let rect = crate::ui::components::centered_rect(width, 11, area);

    let label_w = FormField::ALL.iter().map(|f| f.label().len()).max().unwrap_or(0);
    let mut lines: Vec<Line> = Vec::with_capacity(FormField::ALL.len() + 2);
    for field in FormField::ALL {
        let focused = field == app.form_field;
        let marker = if focused { "▶ " } else { "  " };
        let label = format!("{marker}{:<label_w$} : ", field.label());
        let value = match field {
            FormField::Status => match draft.status {
                None => Span::styled("Select Status", Style::default().fg(app.theme.muted)),
                Some(s) => Span::styled(s.as_str(), super::status_style(app, Some(s))),
            },
            _ => {
                let text = draft.text(field);
                if focused {
                    Span::styled(format!("{text}_"), Style::default().fg(app.theme.highlight_fg))
                } else {
                    Span::raw(text.to_string())
                }
            }
        };
        let mut spans = vec![Span::raw(label), value];
        if focused && field == FormField::Status {
            spans.push(Span::styled("  (Space/←/→ to change)", Style::default().fg(app.theme.muted)));
        }
        lines.push(Line::from(spans));
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled(
            format!("[Enter] {}", app.roster.dialog.submit_label()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("    [Esc] Cancel    [Tab] next field"),
    ]));

    let p = Paragraph::new(lines).style(Style::default().fg(app.theme.text)).block(
        Block::default()
            .title(app.roster.dialog.title())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}
