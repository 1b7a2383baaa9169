//! Field tables for the three forms

use super::field::{FieldKind, FieldValue, FormValues};
use super::rules::{is_active, Condition, Rule};
use crate::state::View;

const ATTENDING_OPTIONS: &[&str] = &["No", "Yes"];
const POSITION_OPTIONS: &[&str] = &["Developer", "Designer", "Manager"];
const SKILL_OPTIONS: &[&str] = &["JavaScript", "CSS", "Python"];
const TOPIC_OPTIONS: &[&str] = &["Technology", "Health", "Education"];
const LANGUAGE_OPTIONS: &[&str] = &["JavaScript", "Python", "Java", "C#"];
const FREQUENCY_OPTIONS: &[&str] = &["Daily", "Weekly", "Monthly", "Rarely"];
const DIET_OPTIONS: &[&str] = &["Vegetarian", "Vegan", "Non-Vegetarian"];
const QUALIFICATION_OPTIONS: &[&str] = &["High School", "Bachelor's", "Master's", "PhD"];

/// Static description of one form field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    /// Key in [`FormValues`] and the error map
    pub name: &'static str,
    /// Label shown above the input
    pub label: &'static str,
    /// Name used inside validation messages
    pub subject: &'static str,
    pub kind: FieldKind,
    pub rule: Option<Rule>,
    pub condition: Option<Condition>,
    /// Initial value; `None` means the kind's empty value
    pub default: Option<&'static str>,
    /// Dim helper text shown while the field is empty
    pub hint: Option<&'static str>,
}

impl FieldSpec {
    fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            subject: label,
            kind,
            rule: None,
            condition: None,
            default: None,
            hint: None,
        }
    }

    pub fn text(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub fn number(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Number)
    }

    pub fn multiline(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Multiline)
    }

    pub fn select(
        name: &'static str,
        label: &'static str,
        options: &'static [&'static str],
        placeholder: Option<&'static str>,
    ) -> Self {
        Self::new(
            name,
            label,
            FieldKind::Select {
                options,
                placeholder,
            },
        )
    }

    pub fn multi_select(
        name: &'static str,
        label: &'static str,
        options: &'static [&'static str],
    ) -> Self {
        Self::new(name, label, FieldKind::MultiSelect { options })
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rule = Some(rule);
        self
    }

    /// Override the name used in validation messages
    pub fn subject(mut self, subject: &'static str) -> Self {
        self.subject = subject;
        self
    }

    pub fn when(mut self, discriminator: &'static str, any_of: &'static [&'static str]) -> Self {
        self.condition = Some(Condition {
            discriminator,
            any_of,
        });
        self
    }

    pub fn default_value(mut self, value: &'static str) -> Self {
        self.default = Some(value);
        self
    }

    pub fn hint(mut self, hint: &'static str) -> Self {
        self.hint = Some(hint);
        self
    }

    pub fn initial_value(&self) -> FieldValue {
        match (self.default, &self.kind) {
            (Some(value), FieldKind::Select { .. }) => FieldValue::Choice(value.to_string()),
            (Some(value), _) => FieldValue::Text(value.to_string()),
            (None, kind) => kind.empty_value(),
        }
    }

    pub fn is_required(&self) -> bool {
        self.rule.is_some()
    }
}

/// A complete form: its title, fields and the field that triggers a question fetch
#[derive(Debug, Clone, PartialEq)]
pub struct FormDefinition {
    pub title: &'static str,
    pub fields: Vec<FieldSpec>,
    /// Field whose changes request supplementary questions
    pub fetch_trigger: Option<&'static str>,
}

impl FormDefinition {
    /// Build the definition behind a view
    pub fn for_view(view: View) -> Self {
        match view {
            View::EventRegistration => event_registration(),
            View::JobApplication => job_application(),
            View::Survey => survey(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Values every field starts with
    pub fn initial_values(&self) -> FormValues {
        FormValues::new(
            self.fields
                .iter()
                .map(|f| (f.name, f.initial_value()))
                .collect(),
        )
    }

    /// Fields shown for the current values, in declaration order
    pub fn visible_fields(&self, values: &FormValues) -> Vec<&FieldSpec> {
        self.fields.iter().filter(|f| is_active(f, values)).collect()
    }
}

fn event_registration() -> FormDefinition {
    FormDefinition {
        title: "Event Registration Form",
        fields: vec![
            FieldSpec::text("name", "Name").rule(Rule::Required),
            FieldSpec::text("email", "Email").rule(Rule::Email),
            FieldSpec::number("age", "Age").rule(Rule::PositiveNumber),
            FieldSpec::select(
                "attendingWithGuest",
                "Are you attending with a guest?",
                ATTENDING_OPTIONS,
                None,
            )
            .default_value("No"),
            FieldSpec::text("guestName", "Guest Name")
                .rule(Rule::Required)
                .when("attendingWithGuest", &["Yes"]),
        ],
        fetch_trigger: None,
    }
}

fn job_application() -> FormDefinition {
    FormDefinition {
        title: "Job Application Form",
        fields: vec![
            FieldSpec::text("fullName", "Full Name").rule(Rule::Required),
            FieldSpec::text("email", "Email").rule(Rule::Email),
            FieldSpec::text("phoneNumber", "Phone Number").rule(Rule::Numeric),
            FieldSpec::select(
                "position",
                "Applying for Position",
                POSITION_OPTIONS,
                Some("Select Position"),
            ),
            FieldSpec::number("relevantExperience", "Relevant Experience (Years)")
                .subject("Relevant Experience")
                .rule(Rule::PositiveNumber)
                .when("position", &["Developer", "Designer"]),
            FieldSpec::text("portfolioUrl", "Portfolio URL")
                .rule(Rule::Url)
                .when("position", &["Designer"])
                .hint("https://..."),
            FieldSpec::multiline("managementExperience", "Management Experience")
                .rule(Rule::Required)
                .when("position", &["Manager"]),
            FieldSpec::multi_select("additionalSkills", "Additional Skills", SKILL_OPTIONS)
                .rule(Rule::NonEmptySet { item: "skill" }),
            FieldSpec::text("preferredInterviewTime", "Preferred Interview Time")
                .rule(Rule::Required)
                .hint("YYYY-MM-DDTHH:MM"),
        ],
        fetch_trigger: None,
    }
}

fn survey() -> FormDefinition {
    FormDefinition {
        title: "Survey Form",
        fields: vec![
            FieldSpec::text("fullName", "Full Name").rule(Rule::Required),
            FieldSpec::text("email", "Email").rule(Rule::Email),
            FieldSpec::select(
                "surveyTopic",
                "Survey Topic",
                TOPIC_OPTIONS,
                Some("Select Topic"),
            )
            .rule(Rule::Required),
            FieldSpec::select(
                "favoriteLanguage",
                "Favorite Programming Language",
                LANGUAGE_OPTIONS,
                Some("Select Language"),
            )
            .rule(Rule::Required)
            .when("surveyTopic", &["Technology"]),
            FieldSpec::number("experienceYears", "Years of Experience")
                .rule(Rule::PositiveNumber)
                .when("surveyTopic", &["Technology"]),
            FieldSpec::select(
                "exerciseFrequency",
                "Exercise Frequency",
                FREQUENCY_OPTIONS,
                Some("Select Frequency"),
            )
            .rule(Rule::Required)
            .when("surveyTopic", &["Health"]),
            FieldSpec::select(
                "dietPreference",
                "Diet Preference",
                DIET_OPTIONS,
                Some("Select Preference"),
            )
            .rule(Rule::Required)
            .when("surveyTopic", &["Health"]),
            FieldSpec::select(
                "highestQualification",
                "Highest Qualification",
                QUALIFICATION_OPTIONS,
                Some("Select Qualification"),
            )
            .rule(Rule::Required)
            .when("surveyTopic", &["Education"]),
            FieldSpec::text("fieldOfStudy", "Field of Study")
                .rule(Rule::Required)
                .when("surveyTopic", &["Education"]),
            FieldSpec::multiline("feedback", "Feedback").rule(Rule::MinLength(50)),
        ],
        fetch_trigger: Some("surveyTopic"),
    }
}
