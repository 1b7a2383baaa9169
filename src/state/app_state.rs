//! Application state definitions

use super::forms::{FormDefinition, FormState, ValidationMode};
use super::submission::Submission;
use std::collections::VecDeque;

/// Current view in the application; one per form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    EventRegistration,
    JobApplication,
    Survey,
}

impl View {
    /// Navigation order
    pub const ALL: [View; 3] = [View::EventRegistration, View::JobApplication, View::Survey];

    pub fn title(&self) -> &'static str {
        match self {
            Self::EventRegistration => "Event Registration Form",
            Self::JobApplication => "Job Application Form",
            Self::Survey => "Survey Form",
        }
    }

    /// Short label for the navigation sidebar
    pub fn nav_label(&self) -> &'static str {
        match self {
            Self::EventRegistration => "Event",
            Self::JobApplication => "Job",
            Self::Survey => "Survey",
        }
    }

    /// Function key that opens this view
    pub fn shortcut(&self) -> u8 {
        match self {
            Self::EventRegistration => 1,
            Self::JobApplication => 2,
            Self::Survey => 3,
        }
    }

    pub fn from_shortcut(key: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.shortcut() == key)
    }
}

/// Main application state
#[derive(Debug)]
pub struct AppState {
    // Navigation
    pub current_view: View,

    // Mounted form
    pub form: FormState,
    pub validation_mode: ValidationMode,

    // Questions fetched for the survey topic
    pub additional_questions: Vec<String>,

    // Modal overlays
    pub submission: Option<Submission>,
    errors: VecDeque<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ValidationMode::default())
    }
}

impl AppState {
    pub fn new(validation_mode: ValidationMode) -> Self {
        let current_view = View::default();
        Self {
            current_view,
            form: FormState::new(FormDefinition::for_view(current_view), validation_mode),
            validation_mode,
            additional_questions: Vec::new(),
            submission: None,
            errors: VecDeque::new(),
        }
    }

    /// Mount a fresh form for `view`, discarding the previous one
    pub fn mount(&mut self, view: View) {
        self.current_view = view;
        self.form = FormState::new(FormDefinition::for_view(view), self.validation_mode);
        self.additional_questions.clear();
    }

    /// Current value of the mounted form's fetch trigger, if it has one
    pub fn fetch_trigger_value(&self) -> Option<String> {
        self.form
            .definition()
            .fetch_trigger
            .map(|name| self.form.values.text(name).to_string())
    }

    pub fn push_error(&mut self, message: String) {
        self.errors.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Oldest error still waiting to be dismissed
    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }
}
