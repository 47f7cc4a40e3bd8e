//! Application state and event handling
//!
//! This is the core of tempconv, managing:
//! - Form state (value buffer, unit selectors, latest result)
//! - Event handling (keyboard input)
//! - Conversion history and settings

use crate::config::Config;
use crate::convert;
use crate::history::History;
use crate::types::{Conversion, Focus, Tab, Unit};
use crate::ui::Theme;
use anyhow::Result;
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent};
use std::time::Instant;

/// Main application state
pub struct App {
    // Core state
    pub should_quit: bool,
    pub active_tab: Tab,
    pub config: Config,
    pub theme: Theme,

    // Convert tab state
    pub input: String,
    pub focus: Focus,
    pub from_unit: Unit,
    pub to_unit: Unit,
    pub last_conversion: Option<Conversion>,
    pub last_formula: Option<&'static str>,

    // History tab state
    pub history: History,
    pub history_cursor: usize,

    // Settings tab state
    pub settings_selected: usize,

    // Popup state
    pub popup: PopupState,

    // Flash message (temporary feedback)
    pub flash_message: Option<(String, bool, Instant)>, // (message, is_error, timestamp)
}

/// Popup overlay state
#[derive(Debug, Clone)]
pub enum PopupState {
    None,
    Confirm {
        title: String,
        message: String,
        action: ConfirmAction,
    },
    Error {
        title: String,
        message: String,
    },
}

/// Destructive action awaiting confirmation
#[derive(Debug, Clone)]
pub enum ConfirmAction {
    RemoveEntry(usize),
    ClearHistory,
}

/// Application state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    ValueInput,
    ConfirmAction,
    ShowError,
}

impl App {
    /// Create a new App instance
    pub fn new(config: Config) -> Self {
        let theme = Theme::from_name(config.theme);

        // A missing or corrupt history file degrades to an empty log
        let history = if config.history.enabled {
            History::load().unwrap_or_default()
        } else {
            History::default()
        };

        Self {
            should_quit: false,
            active_tab: Tab::Convert,
            from_unit: config.default_from,
            to_unit: config.default_to,
            theme,
            config,

            input: String::new(),
            focus: Focus::Value,
            last_conversion: None,
            last_formula: None,

            history,
            history_cursor: 0,

            settings_selected: 0,

            popup: PopupState::None,
            flash_message: None,
        }
    }

    /// Get current app state
    pub fn state(&self) -> AppState {
        match &self.popup {
            PopupState::None => {
                if self.active_tab == Tab::Convert && self.focus == Focus::Value {
                    AppState::ValueInput
                } else {
                    AppState::Normal
                }
            }
            PopupState::Confirm { .. } => AppState::ConfirmAction,
            PopupState::Error { .. } => AppState::ShowError,
        }
    }

    /// Clear expired flash messages; called once per event-loop iteration
    pub fn tick(&mut self) {
        if let Some((_, _, instant)) = &self.flash_message {
            if instant.elapsed().as_secs() >= 3 {
                self.flash_message = None;
            }
        }
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        match self.state() {
            AppState::ConfirmAction => self.handle_confirm_key(key),
            AppState::ShowError => self.handle_error_key(key),
            AppState::Normal | AppState::ValueInput => self.handle_normal_key(key),
        }
    }

    /// Handle key in normal state
    fn handle_normal_key(&mut self, key: KeyEvent) -> Result<()> {
        // The value field owns numeric keys while focused
        if self.state() == AppState::ValueInput && self.handle_value_edit(key) {
            return Ok(());
        }

        // Global keys (work in all tabs)
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return Ok(());
            }
            KeyCode::Char('1') => self.active_tab = Tab::Convert,
            KeyCode::Char('2') => self.active_tab = Tab::History,
            KeyCode::Char('3') => self.active_tab = Tab::Settings,
            _ => {}
        }

        // Tab-specific handling
        match self.active_tab {
            Tab::Convert => self.handle_convert_key(key),
            Tab::History => self.handle_history_key(key),
            Tab::Settings => self.handle_settings_key(key),
        }
    }

    /// Consume a key into the value buffer; returns false if not an edit key
    fn handle_value_edit(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) if matches!(c, '0'..='9' | '.' | '+' | '-' | 'e' | 'E') => {
                self.input.push(c);
                true
            }
            KeyCode::Backspace => {
                self.input.pop();
                true
            }
            _ => false,
        }
    }

    /// Handle keys in Convert tab
    fn handle_convert_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Tab => {
                self.focus = self.focus.next();
            }
            KeyCode::Enter | KeyCode::Char('c') => {
                self.perform_conversion();
            }
            KeyCode::Char('x') | KeyCode::Esc => {
                self.clear_form();
            }
            KeyCode::Char('h') | KeyCode::Char('k') | KeyCode::Left | KeyCode::Up => {
                self.cycle_focused_unit(false);
            }
            KeyCode::Char('l') | KeyCode::Char('j') | KeyCode::Right | KeyCode::Down => {
                self.cycle_focused_unit(true);
            }
            _ => {}
        }
        Ok(())
    }

    /// Handle keys in History tab
    fn handle_history_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if self.history_cursor < self.history.len().saturating_sub(1) {
                    self.history_cursor += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.history_cursor = self.history_cursor.saturating_sub(1);
            }
            KeyCode::Char('g') => {
                self.history_cursor = 0;
            }
            KeyCode::Char('G') => {
                self.history_cursor = self.history.len().saturating_sub(1);
            }
            KeyCode::Enter => {
                // Load the selected conversion back into the form
                if let Some(entry) = self.history.entries.get(self.history_cursor) {
                    let entry = entry.clone();
                    self.input = entry.value.to_string();
                    self.from_unit = entry.from;
                    self.to_unit = entry.to;
                    self.last_formula = Some(convert::formula(entry.from, entry.to));
                    self.last_conversion = Some(entry);
                    self.active_tab = Tab::Convert;
                    self.focus = Focus::Value;
                }
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                self.prompt_remove_entry();
            }
            KeyCode::Char('x') | KeyCode::Char('X') => {
                self.prompt_clear_history();
            }
            _ => {}
        }
        Ok(())
    }

    /// Handle keys in Settings tab
    fn handle_settings_key(&mut self, key: KeyEvent) -> Result<()> {
        let settings_count = 7; // Number of settings items

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if self.settings_selected < settings_count - 1 {
                    self.settings_selected += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.settings_selected = self.settings_selected.saturating_sub(1);
            }
            KeyCode::Enter => {
                // Toggle/cycle setting
                match self.settings_selected {
                    0 => { // Theme
                        self.config.theme = self.config.theme.next();
                        self.theme = Theme::from_name(self.config.theme);
                    }
                    1 => self.config.default_from = self.config.default_from.next(),
                    2 => self.config.default_to = self.config.default_to.next(),
                    3 => self.config.display.show_formula = !self.config.display.show_formula,
                    4 => {
                        self.config.display.show_recent_panel =
                            !self.config.display.show_recent_panel
                    }
                    5 => self.config.history.enabled = !self.config.history.enabled,
                    6 => self.config.history.max_entries = self.config.history.next_limit(),
                    _ => {}
                }
                // Save config
                if let Err(e) = self.config.save() {
                    self.show_error("Save Failed", &e.to_string());
                } else {
                    self.show_flash("Settings saved", false);
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Handle keys in confirm popup
    fn handle_confirm_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.execute_confirmed_action();
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.popup = PopupState::None;
            }
            _ => {}
        }
        Ok(())
    }

    /// Handle keys in error popup
    fn handle_error_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('o') | KeyCode::Enter | KeyCode::Esc => {
                self.popup = PopupState::None;
            }
            _ => {}
        }
        Ok(())
    }

    // === HELPER METHODS ===

    /// Cycle the unit under the focused selector
    fn cycle_focused_unit(&mut self, forward: bool) {
        let unit = match self.focus {
            Focus::From => &mut self.from_unit,
            Focus::To => &mut self.to_unit,
            Focus::Value => return,
        };
        *unit = if forward { unit.next() } else { unit.prev() };
    }

    /// Validate the value buffer and run the conversion
    fn perform_conversion(&mut self) {
        let raw = self.input.trim();

        if raw.is_empty() {
            self.show_error("Warning", "Please enter a value!");
            return;
        }

        // "NaN" and "inf" parse as f64 but violate the finite-input contract
        let value = match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            _ => {
                self.show_error("Error", "Invalid input!");
                return;
            }
        };

        let result = convert::convert(value, self.from_unit, self.to_unit);
        let conversion = Conversion {
            when: Local::now(),
            value,
            from: self.from_unit,
            to: self.to_unit,
            result,
        };

        self.last_formula = Some(convert::formula(self.from_unit, self.to_unit));
        self.last_conversion = Some(conversion.clone());

        if self.config.history.enabled {
            self.history
                .record(conversion, self.config.history.max_entries);
            self.history_cursor = 0;
            if let Err(e) = self.history.save() {
                self.show_flash(&format!("Failed to save history: {}", e), true);
            }
        }
    }

    /// Reset the form (input, result, formula)
    fn clear_form(&mut self) {
        self.input.clear();
        self.last_conversion = None;
        self.last_formula = None;
        self.focus = Focus::Value;
    }

    /// Prompt for deleting the history entry under the cursor
    fn prompt_remove_entry(&mut self) {
        let entry = match self.history.entries.get(self.history_cursor) {
            Some(e) => e,
            None => return,
        };

        self.popup = PopupState::Confirm {
            title: "Confirm Delete".into(),
            message: format!(
                "Delete this entry?\n\n{}  {} = {}",
                entry.formatted_time(),
                entry.formatted_input(),
                entry.formatted_result(),
            ),
            action: ConfirmAction::RemoveEntry(self.history_cursor),
        };
    }

    /// Prompt for clearing the whole history
    fn prompt_clear_history(&mut self) {
        if self.history.is_empty() {
            self.show_flash("History is already empty", false);
            return;
        }

        self.popup = PopupState::Confirm {
            title: "Confirm Clear".into(),
            message: format!("Clear all {} history entries?", self.history.len()),
            action: ConfirmAction::ClearHistory,
        };
    }

    /// Execute the pending confirmed action
    fn execute_confirmed_action(&mut self) {
        let action = match &self.popup {
            PopupState::Confirm { action, .. } => action.clone(),
            _ => return,
        };
        self.popup = PopupState::None;

        match action {
            ConfirmAction::RemoveEntry(index) => {
                self.history.remove(index);
                self.history_cursor = self
                    .history_cursor
                    .min(self.history.len().saturating_sub(1));
                self.persist_history("Entry deleted");
            }
            ConfirmAction::ClearHistory => {
                self.history.clear();
                self.history_cursor = 0;
                self.persist_history("History cleared");
            }
        }
    }

    /// Save history after a destructive action, flashing the outcome
    fn persist_history(&mut self, success_message: &str) {
        match self.history.save() {
            Ok(()) => self.show_flash(success_message, false),
            Err(e) => self.show_flash(&format!("Failed to save history: {}", e), true),
        }
    }

    /// Show an error popup
    fn show_error(&mut self, title: &str, message: &str) {
        self.popup = PopupState::Error {
            title: title.into(),
            message: message.into(),
        };
    }

    /// Show a flash message
    fn show_flash(&mut self, message: &str, is_error: bool) {
        self.flash_message = Some((message.into(), is_error, Instant::now()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    fn app() -> App {
        let mut config = Config::default();
        // Keep tests away from the real history file
        config.history.enabled = false;
        App::new(config)
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            app.handle_key(key(KeyCode::Char(c))).unwrap();
        }
    }

    #[test]
    fn test_typed_digits_go_to_value_field() {
        let mut app = app();
        type_str(&mut app, "100.5");
        assert_eq!(app.input, "100.5");
        // Digits must not switch tabs while the value field is focused
        assert_eq!(app.active_tab, Tab::Convert);
    }

    #[test]
    fn test_convert_happy_path() {
        let mut app = app();
        type_str(&mut app, "100");
        app.handle_key(key(KeyCode::Enter)).unwrap();

        let conversion = app.last_conversion.as_ref().unwrap();
        assert_eq!(conversion.result, 212.0);
        assert_eq!(app.last_formula, Some("(°C × 9/5) + 32 = °F"));
        assert!(matches!(app.popup, PopupState::None));
    }

    #[test]
    fn test_convert_empty_input_warns() {
        let mut app = app();
        app.handle_key(key(KeyCode::Enter)).unwrap();

        assert!(app.last_conversion.is_none());
        match &app.popup {
            PopupState::Error { title, message } => {
                assert_eq!(title, "Warning");
                assert_eq!(message, "Please enter a value!");
            }
            other => panic!("expected warning popup, got {:?}", other),
        }
    }

    #[test]
    fn test_convert_rejects_malformed_input() {
        for bad in ["1.2.3", "--5", "e", "1e", "5."] {
            let mut app = app();
            type_str(&mut app, bad);
            app.handle_key(key(KeyCode::Enter)).unwrap();

            if bad == "5." {
                // "5." parses as 5.0; it is valid input
                assert!(app.last_conversion.is_some());
                continue;
            }

            assert!(app.last_conversion.is_none(), "accepted {:?}", bad);
            assert!(
                matches!(&app.popup, PopupState::Error { title, .. } if title == "Error"),
                "no error popup for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_convert_rejects_non_finite_input() {
        // The char filter keeps letters like "NaN" out of the buffer, but the
        // finite check still guards values that arrive another way
        for bad in ["NaN", "inf", "-inf"] {
            let mut app = app();
            app.input = bad.to_string();
            app.handle_key(key(KeyCode::Enter)).unwrap();

            assert!(app.last_conversion.is_none(), "accepted {:?}", bad);
            assert!(
                matches!(&app.popup, PopupState::Error { title, .. } if title == "Error"),
                "no error popup for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_error_popup_dismisses() {
        let mut app = app();
        app.handle_key(key(KeyCode::Enter)).unwrap();
        assert_eq!(app.state(), AppState::ShowError);

        app.handle_key(key(KeyCode::Esc)).unwrap();
        assert_eq!(app.state(), AppState::ValueInput);
    }

    #[test]
    fn test_unit_selector_cycles() {
        let mut app = app();
        app.handle_key(key(KeyCode::Tab)).unwrap(); // focus From
        assert_eq!(app.focus, Focus::From);

        app.handle_key(key(KeyCode::Right)).unwrap();
        assert_eq!(app.from_unit, Unit::Fahrenheit);
        app.handle_key(key(KeyCode::Left)).unwrap();
        assert_eq!(app.from_unit, Unit::Celsius);

        app.handle_key(key(KeyCode::Tab)).unwrap(); // focus To
        app.handle_key(key(KeyCode::Right)).unwrap();
        assert_eq!(app.to_unit, Unit::Kelvin);
    }

    #[test]
    fn test_identity_conversion_formula() {
        let mut app = app();
        app.handle_key(key(KeyCode::Tab)).unwrap();
        app.handle_key(key(KeyCode::Right)).unwrap(); // from: Fahrenheit (to defaults to Fahrenheit)
        app.handle_key(key(KeyCode::Tab)).unwrap();
        app.handle_key(key(KeyCode::Tab)).unwrap(); // back to value field

        type_str(&mut app, "98.6");
        app.handle_key(key(KeyCode::Enter)).unwrap();

        let conversion = app.last_conversion.as_ref().unwrap();
        assert_eq!(conversion.result, 98.6);
        assert_eq!(app.last_formula, Some("No conversion needed."));
    }

    #[test]
    fn test_clear_form() {
        let mut app = app();
        type_str(&mut app, "42");
        app.handle_key(key(KeyCode::Enter)).unwrap();
        assert!(app.last_conversion.is_some());

        app.handle_key(key(KeyCode::Esc)).unwrap();
        assert!(app.input.is_empty());
        assert!(app.last_conversion.is_none());
        assert!(app.last_formula.is_none());
    }

    #[test]
    fn test_history_entry_loads_back_into_form() {
        let mut app = app();
        app.history.record(
            Conversion {
                when: Local::now(),
                value: 451.0,
                from: Unit::Fahrenheit,
                to: Unit::Celsius,
                result: convert::convert(451.0, Unit::Fahrenheit, Unit::Celsius),
            },
            10,
        );

        app.active_tab = Tab::History;
        app.handle_key(key(KeyCode::Enter)).unwrap();

        assert_eq!(app.active_tab, Tab::Convert);
        assert_eq!(app.input, "451");
        assert_eq!(app.from_unit, Unit::Fahrenheit);
        assert_eq!(app.to_unit, Unit::Celsius);
        assert_eq!(app.last_formula, Some("(°F − 32) × 5/9 = °C"));
    }

    #[test]
    fn test_confirm_clear_history() {
        let mut app = app();
        app.history.record(
            Conversion {
                when: Local::now(),
                value: 1.0,
                from: Unit::Celsius,
                to: Unit::Kelvin,
                result: 274.15,
            },
            10,
        );

        app.active_tab = Tab::History;
        app.handle_key(key(KeyCode::Char('x'))).unwrap();
        assert_eq!(app.state(), AppState::ConfirmAction);

        // Cancel leaves the history untouched
        app.handle_key(key(KeyCode::Char('n'))).unwrap();
        assert_eq!(app.history.len(), 1);
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('q'))).unwrap();
        assert!(app.should_quit);
    }
}
