//! Main rendering module
//!
//! Handles rendering the complete UI including:
//! - Header
//! - Roll controls and results
//! - The log panel (once something was stored)
//! - Popups and overlays
//! - Status bar

use crate::app::{App, PopupState};
use crate::roll::RollResults;
use crate::types::{Control, Dropdown};
use crate::ui::widgets;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const FACES_LABEL: &str = "Faces: ";
const DICE_LABEL: &str = "Dice: ";
const FIELD_WIDTH: u16 = 10;
const FIELD_GAP: &str = "    ";

/// Main render function - entry point for all UI rendering
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let layout = Layout::vertical([
        Constraint::Length(2), // Header
        Constraint::Length(8), // Controls
        Constraint::Fill(1),   // Log, once visible
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    frame.render_widget(Block::default().style(app.theme.block_style()), area);

    render_header(frame, app, layout[0]);
    let anchors = render_controls(frame, app, layout[1]);
    if app.log_visible {
        render_log(frame, app, layout[2]);
    }
    render_status_bar(frame, app, layout[3]);
    render_popups(frame, app, anchors, area);
}

/// Screen positions of the two dropdown fields
#[derive(Debug, Clone, Copy)]
struct DropdownAnchors {
    faces: Rect,
    dice: Rect,
}

impl DropdownAnchors {
    fn get(&self, target: Dropdown) -> Rect {
        match target {
            Dropdown::Faces => self.faces,
            Dropdown::Dice => self.dice,
        }
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let header_block = Block::default()
        .style(theme.block_style())
        .title(format!(" dicebox · {} ", app.config.theme.as_str()))
        .title_style(theme.title())
        .borders(Borders::BOTTOM)
        .border_style(theme.border());

    frame.render_widget(header_block, area);
}

/// Render the dropdowns, results, buttons and checkbox
fn render_controls(frame: &mut Frame, app: &App, area: Rect) -> DropdownAnchors {
    let theme = &app.theme;

    let block = Block::default()
        .style(theme.block_style())
        .title(" Roll ")
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border_focused());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::vertical([
        Constraint::Length(1), // Selections
        Constraint::Length(1),
        Constraint::Length(1), // Results
        Constraint::Length(1),
        Constraint::Length(1), // Buttons
        Constraint::Length(1), // Checkbox
    ])
    .split(inner);

    // Selections
    let selection_line = Line::from(vec![
        Span::styled(FACES_LABEL, theme.text()),
        widgets::dropdown_field(app.selection.faces, app.focus == Control::Faces, theme),
        Span::raw(FIELD_GAP),
        Span::styled(DICE_LABEL, theme.text()),
        widgets::dropdown_field(app.selection.dice, app.focus == Control::Dice, theme),
    ]);
    frame.render_widget(Paragraph::new(selection_line), rows[0]);

    let faces_x = rows[0].x + FACES_LABEL.len() as u16;
    let dice_x = faces_x + FIELD_WIDTH + FIELD_GAP.len() as u16 + DICE_LABEL.len() as u16;
    let anchors = DropdownAnchors {
        faces: Rect::new(faces_x, rows[0].y, FIELD_WIDTH, 1),
        dice: Rect::new(dice_x, rows[0].y, FIELD_WIDTH, 1),
    };

    // Results
    frame.render_widget(
        Paragraph::new(results_line(app)).alignment(Alignment::Center),
        rows[2],
    );

    // Buttons
    let buttons = Line::from(vec![
        widgets::button("Store", true, app.focus == Control::Store, theme),
        Span::raw("  "),
        widgets::button("Clear", app.clear_enabled, app.focus == Control::Clear, theme),
        Span::raw("  "),
        widgets::button("Roll 1", true, app.focus == Control::RollOnce, theme),
        Span::raw("  "),
        widgets::button(app.roll_button_label(), true, app.focus == Control::Roll, theme),
    ]);
    frame.render_widget(Paragraph::new(buttons).alignment(Alignment::Center), rows[4]);

    // Checkbox
    let sums = widgets::checkbox(
        "Include sums in print out",
        app.show_sums,
        app.sums_enabled(),
        app.focus == Control::Sums,
        theme,
    );
    frame.render_widget(
        Paragraph::new(Line::from(sums)).alignment(Alignment::Center),
        rows[5],
    );

    anchors
}

/// The results row: values and their sum, or the warning
fn results_line(app: &App) -> Line<'static> {
    let theme = &app.theme;

    match &app.results {
        RollResults::Empty => Line::styled("Pick faces and dice, then roll", theme.text_dim()),
        RollResults::Warning(e) => {
            Line::styled(e.to_string(), theme.error().add_modifier(Modifier::BOLD))
        }
        RollResults::Values(values) => {
            let mut spans: Vec<Span> = Vec::with_capacity(values.len() * 2 + 1);
            for v in values {
                spans.push(Span::styled(v.to_string(), theme.die_face()));
                spans.push(Span::raw("  "));
            }
            if let Some(sum) = app.results.sum() {
                spans.push(Span::styled(format!("Sum: {}", sum), theme.sum()));
            }
            Line::from(spans)
        }
    }
}

/// Render the roll log, newest lines kept in view
fn render_log(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let stamp = app
        .history
        .last_stored()
        .map(|t| format!(" · last stored {}", t.format("%H:%M:%S")))
        .unwrap_or_default();

    let block = Block::default()
        .style(theme.block_style())
        .title(format!(" Log ({}){} ", app.history.len(), stamp))
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.history.is_empty() {
        let empty = Paragraph::new("Log is empty")
            .style(theme.text_dim())
            .alignment(Alignment::Center);
        frame.render_widget(empty, inner);
        return;
    }

    let lines: Vec<Line> = app
        .history
        .lines()
        .iter()
        .map(|l| Line::styled(l.as_str(), theme.text()))
        .collect();

    let log = Paragraph::new(lines).wrap(Wrap { trim: false });

    // Keep the newest wrapped row on the last line of the panel
    let rows = log.line_count(inner.width);
    let scroll = u16::try_from(rows.saturating_sub(usize::from(inner.height)))
        .unwrap_or(u16::MAX);
    frame.render_widget(log.scroll((scroll, 0)), inner);
}

/// Render status bar with keybindings
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let hints = "[Tab] Focus  [Enter] Press  [r] Roll  [o] Roll 1  [s] Store  [x] Sums  [?] Help  [q] Quit";
    let right = if app.is_rolling() { "rolling…" } else { "" };

    widgets::render_status_bar(frame, hints, right, &app.theme, area);
}

/// Render popups if active
fn render_popups(frame: &mut Frame, app: &App, anchors: DropdownAnchors, area: Rect) {
    let theme = &app.theme;

    match &app.popup {
        PopupState::None => {}
        PopupState::Dropdown { target, cursor } => {
            widgets::render_dropdown_popup(
                frame,
                target.label(),
                &app.dropdown_values(*target),
                *cursor,
                anchors.get(*target),
                theme,
                area,
            );
        }
        PopupState::Help => widgets::render_help_popup(frame, theme, area),
    }

    if let Some((msg, is_error, _)) = &app.flash_message {
        widgets::render_flash_message(frame, msg, *is_error, theme, area);
    }
}
