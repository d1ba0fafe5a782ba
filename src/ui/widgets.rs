//! Reusable UI widgets
//!
//! Contains the building blocks of the main screen:
//! - Popup dialogs (dropdown list, help)
//! - Buttons, dropdown fields and the checkbox
//! - Flash messages and the status bar

use crate::ui::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
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
    let popup_width = 56.min(area.width.saturating_sub(4));
    let popup_height = (content.len() as u16 + 6).min(area.height.saturating_sub(2));

    let popup_area = centered_rect(popup_width, popup_height, area);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(format!(" {} ", title))
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border_focused())
        .style(theme.text());

    frame.render_widget(block, popup_area);

    let inner = Rect {
        x: popup_area.x + 2,
        y: popup_area.y + 1,
        width: popup_area.width.saturating_sub(4),
        height: popup_area.height.saturating_sub(4),
    };

    let content_widget = Paragraph::new(content)
        .style(theme.text())
        .wrap(Wrap { trim: false });
    frame.render_widget(content_widget, inner);

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

/// Render the open list of a dropdown, anchored below its field
pub fn render_dropdown_popup(
    frame: &mut Frame,
    title: &str,
    values: &[u32],
    cursor: usize,
    anchor: Rect,
    theme: &Theme,
    area: Rect,
) {
    let height = (values.len() as u16 + 2)
        .min(12)
        .min(area.height.saturating_sub(anchor.y.saturating_sub(area.y) + 1));
    let width = anchor.width.max(14).min(area.width);
    let popup_area = Rect {
        x: anchor.x.min(area.right().saturating_sub(width)),
        y: (anchor.y + 1).min(area.bottom().saturating_sub(height)),
        width,
        height,
    };

    frame.render_widget(Clear, popup_area);

    let items: Vec<ListItem> = values
        .iter()
        .map(|v| ListItem::new(format!(" {:>4}", v)))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(format!(" {} ", title))
                .title_style(theme.title())
                .borders(Borders::ALL)
                .border_style(theme.border_focused())
                .style(theme.text()),
        )
        .style(theme.text())
        .highlight_style(theme.selected())
        .highlight_symbol("▶");

    let mut state = ListState::default().with_selected(Some(cursor));
    frame.render_stateful_widget(list, popup_area, &mut state);
}

/// Render the keybinding overview
pub fn render_help_popup(frame: &mut Frame, theme: &Theme, area: Rect) {
    let bindings = [
        ("Tab / Shift+Tab", "Move focus"),
        ("Enter / Space", "Press focused control"),
        ("j / k", "Change focused dropdown"),
        ("f / d", "Open Faces / Dice list"),
        ("r", "Roll continuously / stop"),
        ("o / 1", "Roll once"),
        ("s", "Store results in the log"),
        ("c", "Clear the log"),
        ("x", "Toggle sums in the log"),
        ("t", "Next theme"),
        ("q", "Quit"),
    ];

    let content: Vec<Line> = bindings
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!("{:<18}", key), Style::default().fg(theme.accent)),
                Span::styled(*action, theme.text()),
            ])
        })
        .collect();

    render_popup(frame, "Keys", content, &[("Close", '?')], theme, area);
}

/// A dropdown field: `[  20 ▼]` or `[Select ▼]`
pub fn dropdown_field<'a>(value: Option<u32>, focused: bool, theme: &Theme) -> Span<'a> {
    let text = match value {
        Some(v) => format!("[{:>6} ▼]", v),
        None => "[Select ▼]".to_string(),
    };
    let style = if focused { theme.selected() } else { theme.text() };
    Span::styled(text, style)
}

/// A push button: `< Store >`
pub fn button<'a>(label: &str, enabled: bool, focused: bool, theme: &Theme) -> Span<'a> {
    let style = match (enabled, focused) {
        (_, true) => theme.selected(),
        (true, false) => theme.button(),
        (false, false) => theme.button_disabled(),
    };
    Span::styled(format!("< {} >", label), style)
}

/// A checkbox: `[x] label`
pub fn checkbox<'a>(
    label: &str,
    checked: bool,
    enabled: bool,
    focused: bool,
    theme: &Theme,
) -> Span<'a> {
    let mark = if checked { "x" } else { " " };
    let style = match (enabled, focused) {
        (_, true) => theme.selected(),
        (true, false) => theme.text(),
        (false, false) => theme.button_disabled(),
    };
    Span::styled(format!("[{}] {}", mark, label), style)
}

/// Render a flash message (bottom of screen)
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

    frame.render_widget(Clear, flash_area);
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

    frame.render_widget(Clear, status_area);

    let left_widget = Paragraph::new(left_content).style(theme.text_dim());

    let right_len = right_content.chars().count() as u16;
    let right_area = Rect {
        x: status_area.x + status_area.width.saturating_sub(right_len + 1),
        y: status_area.y,
        width: (right_len + 1).min(status_area.width),
        height: 1,
    };
    let right_widget = Paragraph::new(right_content).style(theme.text_dim());

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
    fn test_dropdown_field_text() {
        let theme = Theme::gruvbox();
        assert_eq!(dropdown_field(None, false, &theme).content, "[Select ▼]");
        assert_eq!(dropdown_field(Some(20), false, &theme).content, "[    20 ▼]");
    }

    #[test]
    fn test_button_and_checkbox_text() {
        let theme = Theme::gruvbox();
        assert_eq!(button("Store", true, false, &theme).content, "< Store >");
        assert_eq!(button("Clear", false, false, &theme).style, theme.button_disabled());
        assert_eq!(checkbox("Sums", true, true, false, &theme).content, "[x] Sums");
        assert_eq!(checkbox("Sums", false, true, false, &theme).content, "[ ] Sums");
    }
}
