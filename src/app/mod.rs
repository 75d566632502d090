//! Application state types and entry glue.
//!
//! Wraps the serializable [`state::RosterState`] with the terminal-only bits
//! (selection, focus, theme, keymap, open menus) and re-exports the event
//! loop as `run`.
//!
pub mod keymap;
pub mod replay;
pub mod state;
pub mod update;

use ratatui::style::Color;
use std::path::{Path, PathBuf};

use crate::error::{Context, Result};
use crate::model::{FormField, User};
use crate::store::UserStore;
use keymap::Keymap;
use state::{Action, RosterState};

/// Current input mode for key handling outside the user form.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    Modal,
}

/// Color palette for theming the TUI.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub text: Color,
    pub muted: Color,
    pub title: Color,
    pub border: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    pub active: Color,
    pub inactive: Color,
}

impl Theme {
    /// Catppuccin Mocha theme defaults.
    pub fn mocha() -> Self {
        // Palette reference: https://github.com/catppuccin/catppuccin
        Self {
            text: Color::Rgb(0xcd, 0xd6, 0xf4),         // text
            muted: Color::Rgb(0x7f, 0x84, 0x9c),        // overlay1
            title: Color::Rgb(0xcb, 0xa6, 0xf7),        // mauve
            border: Color::Rgb(0x58, 0x5b, 0x70),       // surface2
            header_bg: Color::Rgb(0x31, 0x32, 0x44),    // surface0
            header_fg: Color::Rgb(0xb4, 0xbe, 0xfe),    // lavender
            status_bg: Color::Rgb(0x45, 0x47, 0x5a),    // surface1
            status_fg: Color::Rgb(0xcd, 0xd6, 0xf4),    // text
            highlight_fg: Color::Rgb(0xf9, 0xe2, 0xaf), // yellow
            highlight_bg: Color::Rgb(0x45, 0x47, 0x5a), // surface1
            active: Color::Rgb(0xa6, 0xe3, 0xa1),       // green
            inactive: Color::Rgb(0xf3, 0x8b, 0xa8),     // red
        }
    }

    /// Load theme from a simple key=value file. Unknown or missing keys fall back to `mocha`.
    pub fn from_file(path: impl AsRef<Path>) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        let mut theme = Self::mocha();

        for raw_line in contents.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.splitn(2, '=');
            let key = parts.next().map(|s| s.trim()).unwrap_or("");
            let val = parts.next().map(|s| s.trim()).unwrap_or("");
            if key.is_empty() || val.is_empty() {
                continue;
            }
            if let Some(color) = Self::parse_color(val) {
                match key {
                    "text" => theme.text = color,
                    "muted" => theme.muted = color,
                    "title" => theme.title = color,
                    "border" => theme.border = color,
                    "header_bg" => theme.header_bg = color,
                    "header_fg" => theme.header_fg = color,
                    "status_bg" => theme.status_bg = color,
                    "status_fg" => theme.status_fg = color,
                    "highlight_fg" => theme.highlight_fg = color,
                    "highlight_bg" => theme.highlight_bg = color,
                    "active" => theme.active = color,
                    "inactive" => theme.inactive = color,
                    _ => {}
                }
            }
        }

        Some(theme)
    }

    /// Parse a color from hex ("#RRGGBB" or "RRGGBB") or the special name "reset".
    fn parse_color(s: &str) -> Option<Color> {
        let lower = s.trim().to_ascii_lowercase();
        if lower == "reset" {
            return Some(Color::Reset);
        }
        let hex = lower.strip_prefix('#').unwrap_or(lower.as_str());
        if hex.len() == 6
            && hex.is_ascii()
            && let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            )
        {
            return Some(Color::Rgb(r, g, b));
        }
        None
    }

    /// Persist the theme to a config file in key=value format.
    pub fn write_file(&self, path: impl AsRef<Path>) -> Result<()> {
        use std::fmt::Write as _;
        let path = path.as_ref();
        let mut buf = String::new();
        buf.push_str("# user-manager theme configuration\n");
        buf.push_str("# Colors: hex as #RRGGBB or RRGGBB, or 'reset'\n\n");

        fn color_to_str(c: Color) -> String {
            match c {
                Color::Rgb(r, g, b) => format!("#{:02X}{:02X}{:02X}", r, g, b),
                Color::Reset => "reset".to_string(),
                // Named colors get a best-effort hex approximation
                Color::Black => "#000000".to_string(),
                Color::Red => "#FF0000".to_string(),
                Color::Green => "#00FF00".to_string(),
                Color::Yellow => "#FFFF00".to_string(),
                Color::Blue => "#0000FF".to_string(),
                Color::Magenta => "#FF00FF".to_string(),
                Color::Cyan => "#00FFFF".to_string(),
                Color::Gray => "#B3B3B3".to_string(),
                Color::DarkGray => "#4D4D4D".to_string(),
                Color::LightRed => "#FF6666".to_string(),
                Color::LightGreen => "#66FF66".to_string(),
                Color::LightYellow => "#FFFF66".to_string(),
                Color::LightBlue => "#6666FF".to_string(),
                Color::LightMagenta => "#FF66FF".to_string(),
                Color::LightCyan => "#66FFFF".to_string(),
                Color::White => "#FFFFFF".to_string(),
                Color::Indexed(i) => format!("index:{}", i),
            }
        }

        let mut kv = |k: &str, v: Color| {
            let _ = writeln!(&mut buf, "{} = {}", k, color_to_str(v));
        };

        kv("text", self.text);
        kv("muted", self.muted);
        kv("title", self.title);
        kv("border", self.border);
        kv("header_bg", self.header_bg);
        kv("header_fg", self.header_fg);
        kv("status_bg", self.status_bg);
        kv("status_fg", self.status_fg);
        kv("highlight_fg", self.highlight_fg);
        kv("highlight_bg", self.highlight_bg);
        kv("active", self.active);
        kv("inactive", self.inactive);

        std::fs::write(path, buf).with_file("write theme", path)
    }

    /// Load the theme at `path`; if missing, write the default there and return it.
    pub fn load_or_init(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if path.exists() {
            return Self::from_file(path).unwrap_or_else(Self::mocha);
        }
        let t = Self::mocha();
        if let Err(e) = t.write_file(path) {
            tracing::warn!("{e}");
        }
        t
    }
}

/// Interactive sessions number their users from the launch time in
/// milliseconds, so ids look like creation timestamps.
fn session_id_floor() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0)
}

/// Directory holding `theme.conf` and `keybinds.conf` unless overridden.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("user-manager")
}

/// Menus layered over the main screen. The user form is driven by
/// [`state::DialogState`] instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModalState {
    FilterMenu { selected: usize },
    Help { scroll: u16 },
}

pub struct AppState {
    pub roster: RosterState,
    pub selected_index: usize,
    pub rows_per_page: usize,
    pub input_mode: InputMode,
    pub form_field: FormField,
    pub modal: Option<ModalState>,
    pub theme: Theme,
    pub keymap: Keymap,
    pub should_quit: bool,
}

impl AppState {
    /// Create an empty roster with built-in theme and keymap.
    pub fn new() -> Self {
        Self::with_config(Theme::mocha(), Keymap::default())
    }

    pub fn with_config(theme: Theme, keymap: Keymap) -> Self {
        Self {
            roster: RosterState {
                users: UserStore::starting_after(session_id_floor()),
                ..RosterState::default()
            },
            selected_index: 0,
            rows_per_page: 10,
            input_mode: InputMode::Normal,
            form_field: FormField::Name,
            modal: None,
            theme,
            keymap,
            should_quit: false,
        }
    }

    /// Load `theme.conf` and `keybinds.conf` from `dir`, creating them with defaults.
    pub fn from_config_dir(dir: &Path) -> Self {
        if let Err(e) = std::fs::create_dir_all(dir).with_file("create", dir) {
            tracing::warn!("{e}");
        }
        let theme = Theme::load_or_init(dir.join("theme.conf"));
        let keymap = Keymap::load_or_init(dir.join("keybinds.conf"));
        tracing::info!(dir = %dir.display(), "configuration loaded");
        Self::with_config(theme, keymap)
    }

    /// Apply a roster action and keep the row cursor inside the visible view.
    pub fn dispatch(&mut self, action: Action) {
        let opens = matches!(action, Action::OpenCreate | Action::OpenEdit(_));
        self.roster.apply(action);
        if opens && self.roster.dialog.is_open() {
            self.form_field = FormField::Name;
        }
        self.clamp_selection();
    }

    pub fn clamp_selection(&mut self) {
        let len = self.roster.visible().len();
        self.selected_index = self.selected_index.min(len.saturating_sub(1));
    }

    /// The record under the row cursor, if the view is not empty.
    pub fn selected_user(&self) -> Option<&User> {
        self.roster.visible().get(self.selected_index).copied()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Re-export the application event loop entry function.
pub use update::run_app as run;
