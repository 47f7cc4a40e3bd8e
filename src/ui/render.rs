//! Main rendering module
//!
//! Handles rendering the complete UI including:
//! - Header with tab bar
//! - Active tab content (Convert form, History table, Settings list)
//! - Popups and overlays
//! - Status bar

use crate::app::{App, PopupState};
use crate::types::{format_temperature, Focus, Tab};
use crate::ui::widgets;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, Paragraph, Row, Table, Tabs},
    Frame,
};

/// Main render function - entry point for all UI rendering
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Main layout: header, content, status bar
    let layout = Layout::vertical([
        Constraint::Length(3),  // Header + tabs
        Constraint::Min(10),    // Content
        Constraint::Length(1),  // Status bar
    ])
    .split(area);

    // Render header with tabs
    render_header(frame, app, layout[0]);

    // Render active tab content
    render_tab_content(frame, app, layout[1]);

    // Render status bar
    render_status_bar(frame, app, layout[2]);

    // Render popup overlays (if any)
    render_popups(frame, app, area);
}

/// Render header with app title and tab bar
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let header_block = Block::default()
        .style(theme.block_style())
        .title(" tempconv · Temperature Converter ")
        .title_style(theme.title())
        .borders(Borders::BOTTOM)
        .border_style(theme.border());

    frame.render_widget(header_block, area);

    // Tab bar
    let tab_titles: Vec<Line> = Tab::all()
        .iter()
        .enumerate()
        .map(|(i, tab)| {
            let style = if app.active_tab == *tab {
                theme.tab_active()
            } else {
                theme.tab_inactive()
            };
            Line::styled(format!("[{}] {}", i + 1, tab.label()), style)
        })
        .collect();

    let tabs = Tabs::new(tab_titles)
        .select(app.active_tab.index())
        .divider(" │ ")
        .style(theme.text());

    let tabs_area = Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(4),
        height: 1,
    };
    frame.render_widget(tabs, tabs_area);
}

/// Render the active tab's content
fn render_tab_content(frame: &mut Frame, app: &App, area: Rect) {
    match app.active_tab {
        Tab::Convert => render_convert_tab(frame, app, area),
        Tab::History => render_history_tab(frame, app, area),
        Tab::Settings => render_settings_tab(frame, app, area),
    }
}

/// Render status bar with keybindings
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let hints = match app.active_tab {
        Tab::Convert => "[Tab] Focus  [◂/▸] Unit  [Enter] Convert  [x] Clear  [q] Quit",
        Tab::History => "[j/k] Navigate  [Enter] Load  [d] Delete  [x] Clear All  [q] Quit",
        Tab::Settings => "[j/k] Navigate  [Enter] Change  [q] Quit",
    };

    widgets::render_status_bar(frame, hints, "", theme, area);
}

/// Render popups if active
fn render_popups(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    match &app.popup {
        PopupState::None => {}

        PopupState::Confirm { title, message, .. } => {
            widgets::render_confirm_popup(frame, title, message, theme, area);
        }

        PopupState::Error { title, message } => {
            widgets::render_error_popup(frame, title, message, theme, area);
        }
    }

    // Flash message (success/error feedback)
    if let Some((msg, is_error, _)) = &app.flash_message {
        widgets::render_flash_message(frame, msg, *is_error, theme, area);
    }
}

// === TAB RENDERERS ===

/// Convert tab: the temperature conversion form
fn render_convert_tab(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let block = Block::default()
        .style(theme.block_style())
        .title(" Convert ")
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let form = Layout::vertical([
        Constraint::Length(3), // Value input
        Constraint::Length(3), // Unit selectors
        Constraint::Length(3), // Result
        Constraint::Length(1), // Formula
        Constraint::Min(0),    // Recent conversions
    ])
    .split(inner);

    // Value input field
    widgets::render_input_field(
        frame,
        "Value",
        &app.input,
        "Enter a value…",
        app.focus == Focus::Value,
        theme,
        form[0],
    );

    // From / To unit selectors side by side
    let selectors = Layout::horizontal([
        Constraint::Percentage(50),
        Constraint::Percentage(50),
    ])
    .split(form[1]);

    widgets::render_unit_selector(
        frame,
        "From",
        app.from_unit.label(),
        app.focus == Focus::From,
        theme,
        selectors[0],
    );
    widgets::render_unit_selector(
        frame,
        "To",
        app.to_unit.label(),
        app.focus == Focus::To,
        theme,
        selectors[1],
    );

    // Result box
    let result_block = Block::default()
        .style(theme.block_style())
        .title(" Result ")
        .title_style(theme.text_dim())
        .borders(Borders::ALL)
        .border_style(theme.border());

    let result_inner = result_block.inner(form[2]);
    frame.render_widget(result_block, form[2]);

    let result_line = match &app.last_conversion {
        Some(conversion) => Line::styled(
            format_temperature(conversion.result, conversion.to),
            theme.result(),
        ),
        None => Line::styled("—", theme.text_dim()),
    };
    let result_widget = Paragraph::new(result_line).alignment(Alignment::Center);
    frame.render_widget(result_widget, result_inner);

    // Formula line
    if app.config.display.show_formula {
        if let Some(formula) = app.last_formula {
            let formula_widget = Paragraph::new(Line::from(vec![
                Span::styled("Formula: ", theme.text_dim()),
                Span::styled(formula, theme.formula()),
            ]))
            .alignment(Alignment::Center);
            frame.render_widget(formula_widget, form[3]);
        }
    }

    // Recent conversions panel
    if app.config.display.show_recent_panel && !app.history.is_empty() {
        render_recent_panel(frame, app, form[4]);
    }
}

/// Short list of the most recent conversions under the form
fn render_recent_panel(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    if area.height < 3 {
        return;
    }

    let block = Block::default()
        .style(theme.block_style())
        .title(" Recent ")
        .title_style(theme.text_dim())
        .borders(Borders::TOP)
        .border_style(theme.border());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let items: Vec<ListItem> = app
        .history
        .entries
        .iter()
        .take(inner.height as usize)
        .map(|entry| {
            ListItem::new(Line::from(vec![
                Span::styled(entry.formatted_time(), theme.text_dim()),
                Span::raw("  "),
                Span::styled(entry.formatted_input(), theme.text()),
                Span::styled(" → ", theme.text_dim()),
                Span::styled(entry.formatted_result(), theme.text()),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items), inner);
}

/// History tab: table of all recorded conversions
fn render_history_tab(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let block = Block::default()
        .style(theme.block_style())
        .title(format!(" History ({}) ", app.history.len()))
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border_focused());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.history.is_empty() {
        let empty_msg = Paragraph::new("No conversions yet")
            .style(theme.text_dim())
            .alignment(Alignment::Center);
        frame.render_widget(empty_msg, inner);
        return;
    }

    let table_area = Rect {
        x: inner.x,
        y: inner.y,
        width: inner.width,
        height: inner.height.saturating_sub(1),
    };

    // Table header
    let header = Row::new(vec![
        Cell::from("TIME").style(theme.title()),
        Cell::from("INPUT").style(theme.title()),
        Cell::from("RESULT").style(theme.title()),
        Cell::from("FORMULA").style(theme.title()),
    ]);

    // Table rows
    let rows: Vec<Row> = app
        .history
        .entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let style = if i == app.history_cursor {
                theme.selected()
            } else {
                theme.text()
            };

            Row::new(vec![
                Cell::from(entry.formatted_time()),
                Cell::from(entry.formatted_input()),
                Cell::from(entry.formatted_result()),
                Cell::from(crate::convert::formula(entry.from, entry.to)),
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(16),
            Constraint::Length(14),
            Constraint::Length(14),
            Constraint::Min(20),
        ],
    )
    .header(header);

    frame.render_widget(table, table_area);

    // Show count at bottom
    let count_area = Rect {
        x: inner.x,
        y: inner.y + inner.height.saturating_sub(1),
        width: inner.width,
        height: 1,
    };
    let count_text = format!(
        "{} / {} entries",
        app.history_cursor.saturating_add(1).min(app.history.len()),
        app.history.len()
    );
    let count_widget = Paragraph::new(count_text)
        .style(theme.text_dim())
        .alignment(Alignment::Right);
    frame.render_widget(count_widget, count_area);
}

/// Settings tab
fn render_settings_tab(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let block = Block::default()
        .style(theme.block_style())
        .title(" Settings ")
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border_focused());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let limit = app.config.history.max_entries.to_string();
    let settings = [
        ("Theme", app.config.theme.as_str()),
        ("Default From Unit", app.config.default_from.label()),
        ("Default To Unit", app.config.default_to.label()),
        ("Show Formula", bool_str(app.config.display.show_formula)),
        ("Show Recent Panel", bool_str(app.config.display.show_recent_panel)),
        ("Save History", bool_str(app.config.history.enabled)),
        ("History Limit", limit.as_str()),
    ];

    let items: Vec<ListItem> = settings
        .iter()
        .enumerate()
        .map(|(i, (label, value))| {
            let style = if i == app.settings_selected {
                theme.selected()
            } else {
                theme.text()
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<24}", label), style),
                Span::styled(format!("[{}]", value), Style::default().fg(theme.accent)),
            ]))
        })
        .collect();

    let list = List::new(items);
    frame.render_widget(list, inner);

    // Config path at bottom
    let config_path = crate::config::Config::path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "Unknown".into());

    let path_area = Rect {
        x: inner.x,
        y: inner.y + inner.height.saturating_sub(1),
        width: inner.width,
        height: 1,
    };
    let path_widget = Paragraph::new(format!("Config: {}", config_path))
        .style(theme.text_dim());
    frame.render_widget(path_widget, path_area);
}

fn bool_str(b: bool) -> &'static str {
    if b { "✓" } else { " " }
}
