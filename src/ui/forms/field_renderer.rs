//! Field rendering utilities for forms

use crate::state::{FieldKind, FieldSpec, FieldValue};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const MULTILINE_HEIGHT: u16 = 5;

/// Rows a field occupies, including its error line
pub fn field_height(spec: &FieldSpec, has_error: bool) -> u16 {
    let boxed = match spec.kind {
        FieldKind::Multiline => MULTILINE_HEIGHT,
        FieldKind::MultiSelect { options } => options.len() as u16 + 2,
        _ => 3,
    };
    boxed + u16::from(has_error)
}

/// Draw one field: a bordered input plus a red error line when invalid
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    spec: &FieldSpec,
    value: Option<&FieldValue>,
    error: Option<&str>,
    is_active: bool,
    option_cursor: usize,
) {
    let border_color = match (is_active, error.is_some()) {
        (true, _) => Color::Cyan,
        (false, true) => Color::Red,
        (false, false) => Color::DarkGray,
    };

    let input_area = Rect {
        height: area.height.saturating_sub(u16::from(error.is_some())),
        ..area
    };

    let title = if spec.is_required() {
        format!(" {} * ", spec.label)
    } else {
        format!(" {} ", spec.label)
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let lines = field_lines(spec, value, is_active, option_cursor);
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(block),
        input_area,
    );

    if let Some(message) = error {
        let error_area = Rect {
            y: input_area.y + input_area.height,
            height: 1,
            ..area
        };
        frame.render_widget(
            Paragraph::new(format!(" {message}")).style(Style::default().fg(Color::Red)),
            error_area,
        );
    }
}

/// Content lines inside the field's border
fn field_lines(
    spec: &FieldSpec,
    value: Option<&FieldValue>,
    is_active: bool,
    option_cursor: usize,
) -> Vec<Line<'static>> {
    let dim = Style::default().fg(Color::DarkGray);
    let text = value.map(FieldValue::as_text).unwrap_or_default();
    let cursor = || Span::styled("▌", Style::default().fg(Color::Cyan));

    match spec.kind {
        FieldKind::Text | FieldKind::Number | FieldKind::Multiline => {
            let mut lines: Vec<Line> = if text.is_empty() {
                let hint = spec.hint.unwrap_or_default();
                vec![Line::from(Span::styled(hint.to_string(), dim))]
            } else {
                text.split('\n')
                    .map(|l| Line::from(l.to_string()))
                    .collect()
            };
            if is_active {
                if let Some(last) = lines.last_mut() {
                    if text.is_empty() {
                        last.spans.insert(0, cursor());
                    } else {
                        last.spans.push(cursor());
                    }
                }
            }
            lines
        }
        FieldKind::Select { placeholder, .. } => {
            let shown = if text.is_empty() {
                Span::styled(placeholder.unwrap_or("(none)").to_string(), dim)
            } else {
                Span::raw(text.to_string())
            };
            let line = if is_active {
                let arrow = Style::default().fg(Color::Cyan);
                Line::from(vec![
                    Span::styled("‹ ", arrow),
                    shown,
                    Span::styled(" ›", arrow),
                ])
            } else {
                Line::from(shown)
            };
            vec![line]
        }
        FieldKind::MultiSelect { options } => {
            let selected = value.map(FieldValue::as_items).unwrap_or_default();
            options
                .iter()
                .enumerate()
                .map(|(idx, option)| {
                    let mark = if selected.iter().any(|s| s == option) {
                        "x"
                    } else {
                        " "
                    };
                    let style = if is_active && idx == option_cursor {
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                    };
                    Line::from(Span::styled(format!("[{mark}] {option}"), style))
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rendered(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    fn skills() -> FieldSpec {
        FieldSpec::multi_select("skills", "Skills", &["JavaScript", "CSS", "Python"])
    }

    #[test]
    fn test_heights() {
        assert_eq!(field_height(&FieldSpec::text("name", "Name"), false), 3);
        assert_eq!(field_height(&FieldSpec::text("name", "Name"), true), 4);
        assert_eq!(field_height(&FieldSpec::multiline("notes", "Notes"), false), 5);
        assert_eq!(field_height(&skills(), true), 6);
    }

    #[test]
    fn test_empty_text_shows_hint() {
        let spec = FieldSpec::text("when", "When").hint("YYYY-MM-DD");
        let value = FieldValue::Text(String::new());
        assert_eq!(
            rendered(&field_lines(&spec, Some(&value), false, 0)),
            vec!["YYYY-MM-DD"]
        );
        assert_eq!(
            rendered(&field_lines(&spec, Some(&value), true, 0)),
            vec!["▌YYYY-MM-DD"]
        );
    }

    #[test]
    fn test_multiline_splits_lines() {
        let spec = FieldSpec::multiline("notes", "Notes");
        let value = FieldValue::Text("one\ntwo".to_string());
        assert_eq!(
            rendered(&field_lines(&spec, Some(&value), true, 0)),
            vec!["one", "two▌"]
        );
    }

    #[test]
    fn test_select_shows_placeholder_then_choice() {
        let spec = FieldSpec::select("topic", "Topic", &["Health"], Some("Select Topic"));
        let empty = FieldValue::Choice(String::new());
        assert_eq!(
            rendered(&field_lines(&spec, Some(&empty), false, 0)),
            vec!["Select Topic"]
        );

        let picked = FieldValue::Choice("Health".to_string());
        assert_eq!(
            rendered(&field_lines(&spec, Some(&picked), true, 0)),
            vec!["‹ Health ›"]
        );
    }

    #[test]
    fn test_checkboxes_mark_selected_items() {
        let value = FieldValue::Multi(vec!["CSS".to_string()]);
        assert_eq!(
            rendered(&field_lines(&skills(), Some(&value), true, 2)),
            vec!["[ ] JavaScript", "[x] CSS", "[ ] Python"]
        );
    }
}
