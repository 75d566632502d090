use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::time::Duration;

use crate::app::keymap::KeyAction;
use crate::app::state::{Action, DialogState};
use crate::app::{AppState, InputMode, ModalState};
use crate::model::{FieldUpdate, FormField, Status};
use crate::ui;

/// Status filter choices in menu order.
pub const FILTER_OPTIONS: [Option<Status>; 3] = [None, Some(Status::Active), Some(Status::Inactive)];

pub fn run_app(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, app: &mut AppState) -> Result<()> {
    tracing::info!("event loop started");
    while !app.should_quit {
        terminal.draw(|f| {
            ui::render(f, app);
        })?;

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
        {
            handle_key(app, key);
        }
    }
    tracing::info!(users = app.roster.users.len(), "event loop finished");
    Ok(())
}

/// Route one key press to the form, an open menu, search input or the keymap.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    if app.roster.dialog.is_open() {
        handle_form_key(app, key);
        return;
    }
    match app.input_mode {
        InputMode::Normal => handle_normal_key(app, key),
        InputMode::Search => handle_search_key(app, key),
        InputMode::Modal => handle_modal_key(app, key.code),
    }
}

fn handle_normal_key(app: &mut AppState, key: KeyEvent) {
    let Some(action) = app.keymap.resolve(&key) else {
        return;
    };
    let rpp = app.rows_per_page.max(1);
    let len = app.roster.visible().len();
    match action {
        KeyAction::Quit => app.should_quit = true,
        KeyAction::StartSearch => app.input_mode = InputMode::Search,
        KeyAction::OpenFilterMenu => {
            let selected = FILTER_OPTIONS
                .iter()
                .position(|s| *s == app.roster.filters.status)
                .unwrap_or(0);
            app.modal = Some(ModalState::FilterMenu { selected });
            app.input_mode = InputMode::Modal;
        }
        KeyAction::OpenHelp => {
            app.modal = Some(ModalState::Help { scroll: 0 });
            app.input_mode = InputMode::Modal;
        }
        KeyAction::ClearFilters => app.dispatch(Action::ClearFilters),
        KeyAction::NewUser => app.dispatch(Action::OpenCreate),
        KeyAction::EditSelection => {
            if let Some(id) = app.selected_user().map(|u| u.id) {
                app.dispatch(Action::OpenEdit(id));
            }
        }
        KeyAction::DeleteSelection => {
            if let Some(id) = app.selected_user().map(|u| u.id) {
                app.dispatch(Action::Delete(id));
            }
        }
        KeyAction::MoveUp => app.selected_index = app.selected_index.saturating_sub(1),
        KeyAction::MoveDown => {
            if app.selected_index + 1 < len {
                app.selected_index += 1;
            }
        }
        KeyAction::PageUp | KeyAction::MoveLeftPage => {
            app.selected_index = app.selected_index.saturating_sub(rpp);
        }
        KeyAction::PageDown | KeyAction::MoveRightPage => {
            app.selected_index = app.selected_index.saturating_add(rpp).min(len.saturating_sub(1));
        }
        KeyAction::Ignore => {}
    }
}

fn handle_search_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.input_mode = InputMode::Normal,
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.dispatch(Action::SetNameQuery(String::new()));
        }
        KeyCode::Backspace => {
            let mut q = app.roster.filters.name_query.clone();
            q.pop();
            app.dispatch(Action::SetNameQuery(q));
        }
        KeyCode::Char(c) if !is_command_chord(key.modifiers) => {
            let mut q = app.roster.filters.name_query.clone();
            q.push(c);
            app.dispatch(Action::SetNameQuery(q));
        }
        _ => {}
    }
}

fn handle_modal_key(app: &mut AppState, code: KeyCode) {
    match &mut app.modal {
        Some(ModalState::FilterMenu { selected }) => match code {
            KeyCode::Esc => close_modal(app),
            KeyCode::Up | KeyCode::Char('k') => *selected = selected.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                if *selected + 1 < FILTER_OPTIONS.len() {
                    *selected += 1;
                }
            }
            KeyCode::Enter => {
                let status = FILTER_OPTIONS.get(*selected).copied().flatten();
                close_modal(app);
                app.dispatch(Action::SetStatusFilter(status));
            }
            _ => {}
        },
        Some(ModalState::Help { scroll }) => match code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('?') => close_modal(app),
            KeyCode::Up | KeyCode::Char('k') => *scroll = scroll.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => *scroll = scroll.saturating_add(1),
            _ => {}
        },
        None => app.input_mode = InputMode::Normal,
    }
}

fn handle_form_key(app: &mut AppState, key: KeyEvent) {
    let field = app.form_field;
    match key.code {
        KeyCode::Esc => app.dispatch(Action::Cancel),
        KeyCode::Enter => app.dispatch(Action::Commit),
        KeyCode::Tab | KeyCode::Down => app.form_field = field.next(),
        KeyCode::BackTab | KeyCode::Up => app.form_field = field.prev(),
        code if field == FormField::Status => {
            let current = app.roster.dialog.draft().and_then(|d| d.status);
            let next = match code {
                KeyCode::Char(' ') | KeyCode::Right => Some(Status::cycle(current)),
                KeyCode::Left => Some(Status::cycle_back(current)),
                KeyCode::Backspace | KeyCode::Delete => Some(None),
                _ => None,
            };
            if let Some(status) = next {
                app.dispatch(Action::EditField(FieldUpdate::Status(status)));
            }
        }
        KeyCode::Backspace => {
            let mut value = current_text(&app.roster.dialog, field);
            value.pop();
            if let Some(update) = field.text_update(value) {
                app.dispatch(Action::EditField(update));
            }
        }
        KeyCode::Char(c) if !is_command_chord(key.modifiers) => {
            let mut value = current_text(&app.roster.dialog, field);
            value.push(c);
            if let Some(update) = field.text_update(value) {
                app.dispatch(Action::EditField(update));
            }
        }
        _ => {}
    }
}

fn current_text(dialog: &DialogState, field: FormField) -> String {
    dialog.draft().map(|d| d.text(field).to_string()).unwrap_or_default()
}

fn is_command_chord(mods: KeyModifiers) -> bool {
    mods.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

fn close_modal(app: &mut AppState) {
    app.modal = None;
    app.input_mode = InputMode::Normal;
}
