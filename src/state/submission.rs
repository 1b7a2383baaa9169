//! Snapshot of a successfully submitted form

use super::{FormValues, View};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Values captured at the moment a form passed validation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: Uuid,
    pub form: &'static str,
    pub submitted_at: DateTime<Utc>,
    pub values: FormValues,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_questions: Option<Vec<String>>,
}

impl Submission {
    pub fn new(view: View, values: FormValues, additional_questions: Option<Vec<String>>) -> Self {
        Self {
            id: Uuid::new_v4(),
            form: view.title(),
            submitted_at: Utc::now(),
            values,
            additional_questions,
        }
    }

    /// Text shown in the confirmation dialog
    pub fn summary(&self) -> String {
        let mut text = format!(
            "Form submitted successfully:\n{}",
            pretty_json(&self.values)
        );
        if let Some(questions) = &self.additional_questions {
            text.push_str("\nAdditional Questions: ");
            text.push_str(&pretty_json(questions));
        }
        text
    }

    /// Full record as pretty JSON, used for logging and the clipboard
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn pretty_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|err| format!("<unprintable: {err}>"))
}
