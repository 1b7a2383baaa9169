//! Form state container
//!
//! Holds the values, error map and submitting flag of one mounted form and
//! implements the change/submit transitions shared by every form.

use super::definitions::{FieldSpec, FormDefinition};
use super::field::{FieldKind, FieldValue, FormValues};
use super::rules::{validate, ErrorMap};

/// When the validator runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Re-validate after every change
    #[default]
    OnChange,
    /// Validate only when submitting
    OnSubmit,
}

/// Which row of the form has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(&'static str),
    /// The submit button row below the last field
    Actions,
}

/// Result of a submit attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; values were kept
    Rejected { error_count: usize },
    /// Validation passed; the callback ran and values were reset
    Accepted,
}

/// State of one mounted form
#[derive(Debug, Clone)]
pub struct FormState {
    definition: FormDefinition,
    mode: ValidationMode,
    pub values: FormValues,
    pub errors: ErrorMap,
    pub submitting: bool,
    pub focus: Focus,
    /// Highlighted option inside a focused checkbox list
    pub option_cursor: usize,
}

impl FormState {
    pub fn new(definition: FormDefinition, mode: ValidationMode) -> Self {
        let values = definition.initial_values();
        let focus = first_focus(&definition, &values);
        Self {
            definition,
            mode,
            values,
            errors: ErrorMap::new(),
            submitting: false,
            focus,
            option_cursor: 0,
        }
    }

    pub fn definition(&self) -> &FormDefinition {
        &self.definition
    }

    #[cfg(test)]
    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// Fields shown for the current values
    pub fn visible_fields(&self) -> Vec<&FieldSpec> {
        self.definition.visible_fields(&self.values)
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    /// Store a raw value for a field.
    ///
    /// Checkbox lists toggle `raw` in or out of the selection; every other
    /// kind replaces its value. Returns false for unknown fields.
    pub fn handle_change(&mut self, name: &str, raw: &str) -> bool {
        let Some(field) = self.definition.field(name) else {
            tracing::debug!(field = name, "ignoring change to unknown field");
            return false;
        };

        let next = match field.kind {
            FieldKind::MultiSelect { options } => {
                if !options.contains(&raw) {
                    tracing::debug!(field = name, option = raw, "ignoring unknown option");
                    return false;
                }
                let mut selected = self
                    .values
                    .get(name)
                    .map(|v| v.as_items().to_vec())
                    .unwrap_or_default();
                if let Some(pos) = selected.iter().position(|s| s == raw) {
                    selected.remove(pos);
                } else {
                    selected.push(raw.to_string());
                    selected.sort_by_key(|s| options.iter().position(|o| o == s));
                }
                FieldValue::Multi(selected)
            }
            FieldKind::Select { .. } => FieldValue::Choice(raw.to_string()),
            _ => FieldValue::Text(raw.to_string()),
        };

        self.values.set(name, next);
        self.submitting = false;
        self.clamp_focus();

        if self.mode == ValidationMode::OnChange {
            self.errors = validate(&self.definition, &self.values);
        }
        true
    }

    /// Validate and, when clean, hand a snapshot of the values to `on_success`
    /// before resetting the form to its initial values.
    pub fn handle_submit<F>(&mut self, on_success: F) -> SubmitOutcome
    where
        F: FnOnce(FormValues),
    {
        let errors = validate(&self.definition, &self.values);
        if !errors.is_empty() {
            let error_count = errors.len();
            self.errors = errors;
            self.submitting = false;
            return SubmitOutcome::Rejected { error_count };
        }

        self.errors.clear();
        self.submitting = true;
        on_success(self.values.clone());
        self.reset();
        SubmitOutcome::Accepted
    }

    /// Restore initial values and focus, keeping the submitting flag
    fn reset(&mut self) {
        self.values = self.definition.initial_values();
        self.focus = first_focus(&self.definition, &self.values);
        self.option_cursor = 0;
    }

    /// Definition of the focused field, `None` on the actions row
    pub fn focused_field(&self) -> Option<&FieldSpec> {
        match self.focus {
            Focus::Field(name) => self.definition.field(name),
            Focus::Actions => None,
        }
    }

    pub fn is_actions_focused(&self) -> bool {
        self.focus == Focus::Actions
    }

    /// Focus slots: every visible field, then the actions row
    fn focus_slots(&self) -> Vec<Focus> {
        let mut slots: Vec<Focus> = self
            .visible_fields()
            .into_iter()
            .map(|f| Focus::Field(f.name))
            .collect();
        slots.push(Focus::Actions);
        slots
    }

    pub fn next_field(&mut self) {
        let slots = self.focus_slots();
        let current = slots.iter().position(|s| *s == self.focus).unwrap_or(0);
        self.focus = slots[(current + 1) % slots.len()];
        self.option_cursor = 0;
    }

    pub fn prev_field(&mut self) {
        let slots = self.focus_slots();
        let current = slots.iter().position(|s| *s == self.focus).unwrap_or(0);
        self.focus = if current == 0 {
            slots[slots.len() - 1]
        } else {
            slots[current - 1]
        };
        self.option_cursor = 0;
    }

    /// Move focus to the first visible field if the focused one was hidden
    fn clamp_focus(&mut self) {
        if !self.focus_slots().contains(&self.focus) {
            self.focus = first_focus(&self.definition, &self.values);
            self.option_cursor = 0;
        }
    }

    /// Type a character into the focused text field
    pub fn input_char(&mut self, c: char) {
        let Some(field) = self.focused_field() else {
            return;
        };
        if !field.kind.accepts_char(c) {
            return;
        }
        let name = field.name;
        let mut text = self.values.text(name).to_string();
        text.push(c);
        self.handle_change(name, &text);
    }

    /// Insert a line break into the focused multiline field
    pub fn input_newline(&mut self) {
        let Some(field) = self.focused_field() else {
            return;
        };
        if !field.kind.is_multiline() {
            return;
        }
        let name = field.name;
        let mut text = self.values.text(name).to_string();
        text.push('\n');
        self.handle_change(name, &text);
    }

    /// Delete the last character of the focused text field
    pub fn backspace(&mut self) {
        let Some(field) = self.focused_field() else {
            return;
        };
        if !field.kind.accepts_typing() {
            return;
        }
        let name = field.name;
        let mut text = self.values.text(name).to_string();
        if text.pop().is_some() {
            self.handle_change(name, &text);
        }
    }

    /// Step the focused select box to its next (or previous) option
    pub fn cycle_choice(&mut self, forward: bool) {
        let Some(field) = self.focused_field() else {
            return;
        };
        if !matches!(field.kind, FieldKind::Select { .. }) {
            return;
        }
        let options = field.kind.cycle_options();
        if options.is_empty() {
            return;
        }
        let name = field.name;
        let current = self.values.text(name);
        let index = options.iter().position(|o| *o == current).unwrap_or(0);
        let next = if forward {
            (index + 1) % options.len()
        } else if index == 0 {
            options.len() - 1
        } else {
            index - 1
        };
        let choice = options[next];
        self.handle_change(name, choice);
    }

    /// Move the checkbox cursor of the focused checkbox list
    pub fn move_option_cursor(&mut self, forward: bool) {
        let Some(FieldKind::MultiSelect { options }) = self.focused_field().map(|f| f.kind)
        else {
            return;
        };
        if options.is_empty() {
            return;
        }
        self.option_cursor = if forward {
            (self.option_cursor + 1) % options.len()
        } else if self.option_cursor == 0 {
            options.len() - 1
        } else {
            self.option_cursor - 1
        };
    }

    /// Toggle the highlighted checkbox of the focused checkbox list
    pub fn toggle_option(&mut self) {
        let Some(field) = self.focused_field() else {
            return;
        };
        let FieldKind::MultiSelect { options } = field.kind else {
            return;
        };
        let name = field.name;
        if let Some(option) = options.get(self.option_cursor) {
            self.handle_change(name, option);
        }
    }
}

fn first_focus(definition: &FormDefinition, values: &FormValues) -> Focus {
    definition
        .visible_fields(values)
        .first()
        .map(|f| Focus::Field(f.name))
        .unwrap_or(Focus::Actions)
}
