//! Form rendering: fields on the left, actions on the right

use super::field_renderer::{draw_field, field_height};
use crate::app::App;
use crate::state::{Focus, FormState};
use crate::ui::components::{render_action_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const ACTION_PANEL_WIDTH: u16 = 24;

/// Draw the mounted form with its action panel
pub fn draw_form(frame: &mut Frame, area: Rect, app: &App) {
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(40),                    // Form area
            Constraint::Length(ACTION_PANEL_WIDTH), // Action panel
        ])
        .split(area);

    draw_fields(frame, main_chunks[0], app);
    draw_action_panel(frame, main_chunks[1], &app.state.form);
}

fn draw_fields(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.state.form;
    let border_color = if form.is_actions_focused() {
        Color::DarkGray
    } else {
        Color::Cyan
    };

    let block = Block::default()
        .title(format!(" {} ", form.definition().title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let show_questions = form.definition().fetch_trigger.is_some()
        && (app.fetcher.is_pending() || !app.state.additional_questions.is_empty());
    let (fields_area, questions_area) = if show_questions {
        let question_rows = app.state.additional_questions.len().max(1) as u16 + 2;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),
                Constraint::Length(question_rows.min(inner.height / 2)),
            ])
            .split(inner);
        (chunks[0], Some(chunks[1]))
    } else {
        (inner, None)
    };

    let fields = form.visible_fields();
    let heights: Vec<u16> = fields
        .iter()
        .map(|f| field_height(f, form.error(f.name).is_some()))
        .collect();
    let focused = fields
        .iter()
        .position(|f| form.focus == Focus::Field(f.name));
    let first = first_visible(&heights, focused, fields_area.height);

    let mut y = fields_area.y;
    let bottom = fields_area.y + fields_area.height;
    for (field, height) in fields.iter().zip(&heights).skip(first) {
        if y >= bottom {
            break;
        }
        let field_area = Rect {
            x: fields_area.x,
            y,
            width: fields_area.width,
            height: (*height).min(bottom - y),
        };
        draw_field(
            frame,
            field_area,
            field,
            form.values.get(field.name),
            form.error(field.name),
            form.focus == Focus::Field(field.name),
            form.option_cursor,
        );
        y += height;
    }

    if let Some(questions_area) = questions_area {
        draw_additional_questions(frame, questions_area, app);
    }
}

/// Index of the first field to draw so the focused one fits on screen
fn first_visible(heights: &[u16], focused: Option<usize>, available: u16) -> usize {
    let Some(focused) = focused else {
        return 0;
    };
    let mut first = 0;
    let mut used: u16 = heights[..=focused].iter().sum();
    while used > available && first < focused {
        used -= heights[first];
        first += 1;
    }
    first
}

fn draw_additional_questions(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Additional Questions ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));

    let lines: Vec<Line> = if app.state.additional_questions.is_empty() {
        vec![Line::from(Span::styled(
            "Loading…",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        app.state
            .additional_questions
            .iter()
            .map(|q| Line::from(format!("• {q}")))
            .collect()
    };

    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }).block(block),
        area,
    );
}

fn draw_action_panel(frame: &mut Frame, area: Rect, form: &FormState) {
    let is_focused = form.is_actions_focused();
    let border_color = if is_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .title(" Actions ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(BUTTON_HEIGHT), // Submit
            Constraint::Length(1),             // Spacer
            Constraint::Min(0),                // Status
        ])
        .split(inner_area);

    render_action_button(frame, chunks[0], "Submit", is_focused, Some(Color::Green));

    let mut status = Vec::new();
    if form.submitting {
        status.push(Line::from(Span::styled(
            "✓ Submitted",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )));
    }
    match form.errors.len() {
        0 => {}
        1 => status.push(Line::from(Span::styled(
            "1 error",
            Style::default().fg(Color::Red),
        ))),
        n => status.push(Line::from(Span::styled(
            format!("{n} errors"),
            Style::default().fg(Color::Red),
        ))),
    }
    frame.render_widget(Paragraph::new(status), chunks[2]);
}
