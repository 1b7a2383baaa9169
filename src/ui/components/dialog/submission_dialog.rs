//! Confirmation shown after a form passes validation

use super::base::{render_dialog, DialogConfig};
use crate::platform::COPY_SHORTCUT;
use crate::state::Submission;
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    Frame,
};

pub fn render_submission_dialog(frame: &mut Frame, submission: &Submission) {
    let key = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let hint = vec![
        Span::styled("Enter", key),
        Span::raw("/"),
        Span::styled("Esc", key),
        Span::raw(" close  "),
        Span::styled(COPY_SHORTCUT, key),
        Span::raw(" copy JSON"),
    ];

    let summary = submission.summary();
    render_dialog(
        frame,
        DialogConfig {
            title: submission.form,
            title_color: Color::Green,
            border_color: Color::Green,
            message: &summary,
            hint: Some(hint),
            max_width: 72,
        },
    );
}
