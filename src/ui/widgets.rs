//! Reusable UI widgets
//!
//! Contains common UI components used across the form:
//! - Popup dialogs (confirmation, error)
//! - Form controls (value input, unit selector)
//! - Flash message and status bar

use crate::ui::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render a centered popup dialog
pub fn render_popup(
    frame: &mut Frame,
    title: &str,
    content: Vec<Line>,
    buttons: &[(&str, char)], // (label, key)
    theme: &Theme,
    area: Rect,
) {
    // Calculate popup size
    let popup_width = 48.min(area.width.saturating_sub(4));
    let popup_height = (content.len() as u16 + 6).min(area.height.saturating_sub(4));

    let popup_area = centered_rect(popup_width, popup_height, area);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    // Render popup background and border
    let block = Block::default()
        .title(format!(" {} ", title))
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border_focused())
        .style(theme.text());

    frame.render_widget(block, popup_area);

    // Inner area for content
    let inner = Rect {
        x: popup_area.x + 2,
        y: popup_area.y + 1,
        width: popup_area.width.saturating_sub(4),
        height: popup_area.height.saturating_sub(4),
    };

    // Render content
    let content_widget = Paragraph::new(content)
        .style(theme.text())
        .wrap(Wrap { trim: false });
    frame.render_widget(content_widget, inner);

    // Render buttons at bottom
    if !buttons.is_empty() {
        let button_area = Rect {
            x: popup_area.x + 2,
            y: popup_area.y + popup_area.height.saturating_sub(2),
            width: popup_area.width.saturating_sub(4),
            height: 1,
        };

        let button_spans: Vec<Span> = buttons
            .iter()
            .enumerate()
            .flat_map(|(i, (label, key))| {
                let mut spans = vec![
                    Span::styled("[", theme.text_dim()),
                    Span::styled(
                        key.to_string(),
                        Style::default()
                            .fg(theme.accent)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled("] ", theme.text_dim()),
                    Span::styled(*label, theme.text()),
                ];
                if i < buttons.len() - 1 {
                    spans.push(Span::raw("    "));
                }
                spans
            })
            .collect();

        let buttons_widget = Paragraph::new(Line::from(button_spans))
            .alignment(Alignment::Center);
        frame.render_widget(buttons_widget, button_area);
    }
}

/// Render a confirmation popup with Yes/No buttons
pub fn render_confirm_popup(
    frame: &mut Frame,
    title: &str,
    message: &str,
    theme: &Theme,
    area: Rect,
) {
    let content = vec![
        Line::raw(""),
        Line::raw(message),
        Line::raw(""),
        Line::styled("⚠  This cannot be undone!", theme.warning()),
        Line::raw(""),
    ];

    render_popup(
        frame,
        title,
        content,
        &[("Yes", 'y'), ("Cancel", 'n')],
        theme,
        area,
    );
}

/// Render an error popup
pub fn render_error_popup(
    frame: &mut Frame,
    title: &str,
    message: &str,
    theme: &Theme,
    area: Rect,
) {
    let content = vec![
        Line::raw(""),
        Line::styled(message, theme.error()),
        Line::raw(""),
    ];

    render_popup(
        frame,
        title,
        content,
        &[("OK", 'o')],
        theme,
        area,
    );
}

/// Render a labeled input field with placeholder and cursor
pub fn render_input_field(
    frame: &mut Frame,
    label: &str,
    value: &str,
    placeholder: &str,
    is_focused: bool,
    theme: &Theme,
    area: Rect,
) {
    let border_style = if is_focused {
        theme.border_focused()
    } else {
        theme.border()
    };

    let block = Block::default()
        .style(theme.block_style())
        .title(format!(" {} ", label))
        .title_style(if is_focused { theme.title() } else { theme.text_dim() })
        .borders(Borders::ALL)
        .border_style(border_style);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let line = if value.is_empty() && !is_focused {
        Line::styled(placeholder.to_string(), theme.placeholder())
    } else {
        let mut spans = vec![Span::styled(value.to_string(), theme.input())];
        if is_focused {
            spans.push(Span::styled("_", theme.text_dim()));
        }
        Line::from(spans)
    };

    frame.render_widget(Paragraph::new(line), inner);
}

/// Render a unit selector showing the cycle arrows, e.g. "◂ Fahrenheit ▸"
pub fn render_unit_selector(
    frame: &mut Frame,
    label: &str,
    unit_label: &str,
    is_focused: bool,
    theme: &Theme,
    area: Rect,
) {
    let border_style = if is_focused {
        theme.border_focused()
    } else {
        theme.border()
    };

    let block = Block::default()
        .style(theme.block_style())
        .title(format!(" {} ", label))
        .title_style(if is_focused { theme.title() } else { theme.text_dim() })
        .borders(Borders::ALL)
        .border_style(border_style);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let arrow_style = if is_focused {
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
    } else {
        theme.text_dim()
    };

    let line = Line::from(vec![
        Span::styled("◂ ", arrow_style),
        Span::styled(
            unit_label.to_string(),
            if is_focused { theme.selected() } else { theme.text() },
        ),
        Span::styled(" ▸", arrow_style),
    ]);

    let selector = Paragraph::new(line).alignment(Alignment::Center);
    frame.render_widget(selector, inner);
}

/// Render a success/error flash message (bottom of screen)
pub fn render_flash_message(
    frame: &mut Frame,
    message: &str,
    is_error: bool,
    theme: &Theme,
    area: Rect,
) {
    let style = if is_error { theme.error() } else { theme.success() };
    let prefix = if is_error { "✗ " } else { "✓ " };

    let flash_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let flash = Paragraph::new(Line::from(vec![
        Span::styled(prefix, style),
        Span::styled(message, style),
    ]));

    frame.render_widget(flash, flash_area);
}

/// Render status bar at bottom
pub fn render_status_bar(
    frame: &mut Frame,
    left_content: &str,
    right_content: &str,
    theme: &Theme,
    area: Rect,
) {
    let status_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    // Clear the line first
    frame.render_widget(Clear, status_area);

    // Left side
    let left_widget = Paragraph::new(left_content)
        .style(theme.text_dim());

    // Right side
    let right_len = right_content.len() as u16;
    let right_area = Rect {
        x: status_area.x + status_area.width.saturating_sub(right_len + 1),
        y: status_area.y,
        width: right_len + 1,
        height: 1,
    };
    let right_widget = Paragraph::new(right_content)
        .style(theme.text_dim());

    frame.render_widget(left_widget, status_area);
    frame.render_widget(right_widget, right_area);
}

/// Helper: Create a centered rect of given size
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect { x, y, width, height }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(40, 20, area);

        assert_eq!(popup.x, 30);
        assert_eq!(popup.y, 15);
        assert_eq!(popup.width, 40);
        assert_eq!(popup.height, 20);
    }

    #[test]
    fn test_centered_rect_oversized() {
        let area = Rect::new(0, 0, 20, 10);
        let popup = centered_rect(40, 20, area);

        // Degrades to the area origin instead of underflowing
        assert_eq!(popup.x, 0);
        assert_eq!(popup.y, 0);
    }
}
