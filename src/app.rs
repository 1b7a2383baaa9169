//! Application state and core logic

use crate::config::TuiConfig;
use crate::questions::{HttpQuestionSource, QuestionFetcher, QuestionSource, QuestionUpdate};
use crate::state::{AppState, FieldKind, Submission, SubmitOutcome, ValidationMode, View};
use crate::ui::{BUTTON_HEIGHT, SIDEBAR_WIDTH};
use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Second Ctrl+C must land within this window to quit
const QUIT_WINDOW: Duration = Duration::from_secs(1);

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Background fetcher for survey questions
    pub fetcher: QuestionFetcher,
    /// Whether the app should quit
    quit: bool,
    /// Feedback shown in the status bar
    pub status_message: Option<String>,
    /// Terminal size for click calculations (height, width)
    pub terminal_size: Option<(u16, u16)>,
    /// Timestamp of last Ctrl+C press for double-tap quit
    pub last_ctrl_c: Option<Instant>,
}

impl App {
    /// Create a new App talking to the configured question service
    pub fn new(config: &TuiConfig) -> Result<Self> {
        let endpoint = config.questions_endpoint();
        let source = HttpQuestionSource::new(&endpoint, config.request_timeout())
            .context("configuring question service")?;
        tracing::info!(%endpoint, "question service configured");
        Ok(Self::with_source(config.validation_mode(), Arc::new(source)))
    }

    /// Create an App with an explicit question source
    pub fn with_source(mode: ValidationMode, source: Arc<dyn QuestionSource>) -> Self {
        Self {
            state: AppState::new(mode),
            fetcher: QuestionFetcher::new(source),
            quit: false,
            status_message: None,
            terminal_size: None,
            last_ctrl_c: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Apply finished background fetches
    pub fn poll_background(&mut self) {
        match self.fetcher.drain() {
            Some(QuestionUpdate::Loaded(questions)) => {
                self.state.additional_questions = questions;
            }
            Some(QuestionUpdate::Failed) => self.state.additional_questions.clear(),
            None => {}
        }
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return;
        }

        // Submission dialog (modal)
        if self.state.submission.is_some() {
            self.handle_submission_key(key);
            return;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.handle_ctrl_c();
            return;
        }

        // Clear any status messages on key press
        self.status_message = None;

        if let KeyCode::F(n) = key.code {
            if let Some(view) = View::from_shortcut(n) {
                self.switch_view(view);
            }
            return;
        }

        let before = self.state.fetch_trigger_value();
        if self.is_submit_key(&key) {
            self.submit();
        } else {
            self.handle_form_key(key);
        }
        self.sync_fetch_trigger(before);
    }

    fn handle_ctrl_c(&mut self) {
        let now = Instant::now();
        if self
            .last_ctrl_c
            .is_some_and(|last| now.duration_since(last) < QUIT_WINDOW)
        {
            self.quit = true;
        } else {
            self.last_ctrl_c = Some(now);
            self.status_message = Some("Press Ctrl+C again to quit".to_string());
        }
    }

    fn is_submit_key(&self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('s') => key.modifiers.contains(KeyModifiers::CONTROL),
            KeyCode::Enter => self.state.form.is_actions_focused(),
            _ => false,
        }
    }

    /// Mount a different form, dropping the current one
    pub fn switch_view(&mut self, view: View) {
        if self.state.current_view == view {
            return;
        }
        tracing::debug!(from = ?self.state.current_view, to = ?view, "switching form");
        self.fetcher.invalidate();
        self.state.mount(view);
    }

    /// Handle keys editing the mounted form
    fn handle_form_key(&mut self, key: KeyEvent) {
        let form = &mut self.state.form;
        let kind = form.focused_field().map(|f| f.kind);
        let plain = !key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);

        match (key.code, kind) {
            (KeyCode::Tab | KeyCode::Down, _) => form.next_field(),
            (KeyCode::BackTab | KeyCode::Up, _) => form.prev_field(),
            // Select boxes
            (KeyCode::Left, Some(FieldKind::Select { .. })) => form.cycle_choice(false),
            (KeyCode::Right | KeyCode::Char(' '), Some(FieldKind::Select { .. })) => {
                form.cycle_choice(true)
            }
            (KeyCode::Enter, Some(FieldKind::Select { .. })) => form.next_field(),
            // Checkbox lists
            (KeyCode::Left, Some(FieldKind::MultiSelect { .. })) => {
                form.move_option_cursor(false)
            }
            (KeyCode::Right, Some(FieldKind::MultiSelect { .. })) => form.move_option_cursor(true),
            (KeyCode::Char(' ') | KeyCode::Enter, Some(FieldKind::MultiSelect { .. })) => {
                form.toggle_option()
            }
            // Text inputs
            (KeyCode::Enter, Some(FieldKind::Multiline)) => form.input_newline(),
            (KeyCode::Enter, Some(_)) => form.next_field(),
            (KeyCode::Char(c), Some(_)) if plain => form.input_char(c),
            (KeyCode::Backspace, Some(_)) => form.backspace(),
            _ => {}
        }
    }

    /// Request questions when the fetch trigger field changed
    fn sync_fetch_trigger(&mut self, before: Option<String>) {
        let after = self.state.fetch_trigger_value();
        if before == after {
            return;
        }
        if let Some(topic) = after {
            self.state.additional_questions.clear();
            self.fetcher.request(&topic);
        }
    }

    /// Validate and submit the mounted form
    fn submit(&mut self) {
        let view = self.state.current_view;
        let questions = self
            .state
            .form
            .definition()
            .fetch_trigger
            .map(|_| self.state.additional_questions.clone());

        let mut submitted = None;
        let outcome = self.state.form.handle_submit(|values| {
            submitted = Some(Submission::new(view, values, questions));
        });

        match (outcome, submitted) {
            (SubmitOutcome::Rejected { error_count }, _) => {
                tracing::debug!(form = view.title(), error_count, "submission rejected");
                let noun = if error_count == 1 { "field needs" } else { "fields need" };
                self.status_message = Some(format!("{error_count} {noun} attention"));
            }
            (SubmitOutcome::Accepted, Some(submission)) => {
                match submission.to_json() {
                    Ok(record) => tracing::info!(
                        form = submission.form,
                        id = %submission.id,
                        %record,
                        "form submitted"
                    ),
                    Err(err) => tracing::warn!(error = %err, "could not serialize submission"),
                }
                self.status_message = Some("Form submitted".to_string());
                self.state.submission = Some(submission);
            }
            (SubmitOutcome::Accepted, None) => {}
        }
    }

    /// Handle keys while the submission dialog is open
    fn handle_submission_key(&mut self, key: KeyEvent) {
        let copy = match key.code {
            KeyCode::Char('y') => true,
            KeyCode::Char('c') => key.modifiers.contains(crate::platform::COPY_MODIFIER),
            _ => false,
        };

        if copy {
            let record = self.state.submission.as_ref().map(Submission::to_json);
            match record {
                Some(Ok(json)) => match self.copy_to_clipboard(&json) {
                    Ok(()) => {
                        self.status_message = Some(format!("Copied {} chars", json.len()));
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "clipboard unavailable");
                        self.push_error(format!("Could not copy to clipboard: {err}"));
                    }
                },
                Some(Err(err)) => self.push_error(format!("Could not serialize submission: {err}")),
                None => {}
            }
            return;
        }

        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            self.state.submission = None;
        }
    }

    fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        use arboard::Clipboard;
        let mut clipboard = Clipboard::new()?;
        clipboard.set_text(text)?;
        Ok(())
    }

    /// Handle a mouse event; only sidebar clicks do anything
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.state.has_errors() || self.state.submission.is_some() {
            return;
        }
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) || mouse.column >= SIDEBAR_WIDTH
        {
            return;
        }
        if let Some(index) = self.calculate_sidebar_item_from_click(mouse.row) {
            self.status_message = None;
            self.switch_view(View::ALL[index]);
        }
    }

    /// Map a clicked row to a sidebar entry.
    ///
    /// Buttons are vertically centered in the sidebar, which spans the
    /// terminal height minus the status bar.
    fn calculate_sidebar_item_from_click(&self, mouse_row: u16) -> Option<usize> {
        let item_count = View::ALL.len();
        let sidebar_height = self
            .terminal_size
            .map(|(h, _)| h.saturating_sub(1))
            .unwrap_or(24);
        let content_height = (item_count as u16) * BUTTON_HEIGHT;
        let top_padding = sidebar_height.saturating_sub(content_height) / 2;

        if mouse_row < top_padding || mouse_row >= sidebar_height {
            return None;
        }

        let index = ((mouse_row - top_padding) / BUTTON_HEIGHT) as usize;
        (index < item_count).then_some(index)
    }
}
