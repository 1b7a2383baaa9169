//! Validation rule table
//!
//! Every field carries at most one [`Rule`] and an optional [`Condition`].
//! A conditional rule only runs while its discriminator holds one of the
//! listed values, so hidden branches never produce errors.

use super::definitions::{FieldSpec, FormDefinition};
use super::field::{FieldValue, FormValues};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Field name -> human readable failure message
pub type ErrorMap = BTreeMap<String, String>;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email regex is valid"));

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(ftp|http|https)://[^ "]+$"#).expect("url regex is valid")
});

/// Rule descriptor applied to a single field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Value must be present
    Required,
    /// Present and shaped like `a@b.c`
    Email,
    /// Present and a number strictly greater than zero
    PositiveNumber,
    /// Present and a number
    Numeric,
    /// Present and an ftp/http/https URL
    Url,
    /// Present and at least this many characters long
    MinLength(usize),
    /// At least one option checked; `item` names a single option in the message
    NonEmptySet { item: &'static str },
}

impl Rule {
    /// Check a value, returning the failure message if it does not pass
    pub fn check(&self, subject: &str, value: &FieldValue) -> Option<String> {
        match self {
            Rule::Required => value
                .is_empty()
                .then(|| format!("{subject} is required.")),
            Rule::Email => {
                if value.is_empty() {
                    Some(format!("{subject} is required."))
                } else if !EMAIL_PATTERN.is_match(value.as_text()) {
                    Some(format!("{subject} is invalid."))
                } else {
                    None
                }
            }
            Rule::PositiveNumber => match parse_number(value.as_text()) {
                Some(n) if n > 0.0 => None,
                _ => Some(format!("{subject} must be greater than 0.")),
            },
            Rule::Numeric => {
                if value.is_empty() {
                    Some(format!("{subject} is required."))
                } else if parse_number(value.as_text()).is_none() {
                    Some(format!("{subject} must be a valid number."))
                } else {
                    None
                }
            }
            Rule::Url => {
                if value.is_empty() {
                    Some(format!("{subject} is required."))
                } else if !URL_PATTERN.is_match(value.as_text()) {
                    Some(format!("{subject} must be a valid URL."))
                } else {
                    None
                }
            }
            Rule::MinLength(min) => (value.as_text().chars().count() < *min)
                .then(|| format!("{subject} must be at least {min} characters.")),
            Rule::NonEmptySet { item } => value
                .is_empty()
                .then(|| format!("At least one {item} must be selected.")),
        }
    }
}

/// Makes a field visible and its rule active only for some discriminator values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Condition {
    pub discriminator: &'static str,
    pub any_of: &'static [&'static str],
}

impl Condition {
    pub fn holds(&self, values: &FormValues) -> bool {
        let current = values.text(self.discriminator);
        self.any_of.contains(&current)
    }
}

/// Decimal parse: surrounding whitespace ignored, finite values only
fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Whether a field is shown (and its rule active) for the given values
pub fn is_active(field: &FieldSpec, values: &FormValues) -> bool {
    field.condition.is_none_or(|condition| condition.holds(values))
}

/// Run every active rule of a form against its values
pub fn validate(definition: &FormDefinition, values: &FormValues) -> ErrorMap {
    let mut errors = ErrorMap::new();
    for field in &definition.fields {
        let Some(rule) = field.rule else {
            continue;
        };
        if !is_active(field, values) {
            continue;
        }
        let value = values.get(field.name).cloned().unwrap_or_default();
        if let Some(message) = rule.check(field.subject, &value) {
            errors.insert(field.name.to_string(), message);
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> FieldValue {
        FieldValue::Text(s.to_string())
    }

    mod rule_checks {
        use super::*;

        #[test]
        fn test_required() {
            assert_eq!(
                Rule::Required.check("Name", &text("")),
                Some("Name is required.".to_string())
            );
            // No trimming: whitespace counts as present
            assert_eq!(Rule::Required.check("Name", &text(" ")), None);
        }

        #[test]
        fn test_email() {
            let rule = Rule::Email;
            assert_eq!(
                rule.check("Email", &text("")),
                Some("Email is required.".to_string())
            );
            for bad in ["plain", "a@b", "@.", "a@.b c"] {
                assert_eq!(
                    rule.check("Email", &text(bad)),
                    Some("Email is invalid.".to_string()),
                    "{bad}"
                );
            }
            assert_eq!(rule.check("Email", &text("ada@example.com")), None);
            // Pattern is unanchored
            assert_eq!(rule.check("Email", &text("a b@c.d")), None);
        }

        #[test]
        fn test_positive_number() {
            let rule = Rule::PositiveNumber;
            let msg = Some("Age must be greater than 0.".to_string());
            assert_eq!(rule.check("Age", &text("")), msg);
            assert_eq!(rule.check("Age", &text("0")), msg);
            assert_eq!(rule.check("Age", &text("-3")), msg);
            assert_eq!(rule.check("Age", &text("abc")), msg);
            assert_eq!(rule.check("Age", &text("5")), None);
            assert_eq!(rule.check("Age", &text("0.5")), None);
            assert_eq!(rule.check("Age", &text(" 7 ")), None);
        }

        #[test]
        fn test_numeric() {
            let rule = Rule::Numeric;
            assert_eq!(
                rule.check("Phone Number", &text("")),
                Some("Phone Number is required.".to_string())
            );
            assert_eq!(
                rule.check("Phone Number", &text("555-CALL")),
                Some("Phone Number must be a valid number.".to_string())
            );
            assert_eq!(rule.check("Phone Number", &text("5550100")), None);
        }

        #[test]
        fn test_numbers_are_plain_finite_decimals() {
            let rule = Rule::Numeric;
            let invalid = Some("Phone Number must be a valid number.".to_string());
            for bad in [" ", "Infinity", "-inf", "NaN", "0x1F"] {
                assert_eq!(rule.check("Phone Number", &text(bad)), invalid, "{bad}");
            }
            for good in ["1e3", " 42 ", "-7", "3.5"] {
                assert_eq!(rule.check("Phone Number", &text(good)), None, "{good}");
            }
        }

        #[test]
        fn test_url() {
            let rule = Rule::Url;
            assert_eq!(
                rule.check("Portfolio URL", &text("")),
                Some("Portfolio URL is required.".to_string())
            );
            assert_eq!(rule.check("Portfolio URL", &text("ftp://x")), None);
            assert_eq!(
                rule.check("Portfolio URL", &text("https://ada.dev/work")),
                None
            );
            for bad in ["not-a-url", "https://has space", "mailto://x", "http://"] {
                assert_eq!(
                    rule.check("Portfolio URL", &text(bad)),
                    Some("Portfolio URL must be a valid URL.".to_string()),
                    "{bad}"
                );
            }
        }

        #[test]
        fn test_min_length_counts_chars() {
            let rule = Rule::MinLength(50);
            let msg = Some("Feedback must be at least 50 characters.".to_string());
            assert_eq!(rule.check("Feedback", &text("")), msg);
            assert_eq!(rule.check("Feedback", &text(&"a".repeat(49))), msg);
            assert_eq!(rule.check("Feedback", &text(&"a".repeat(50))), None);
            assert_eq!(rule.check("Feedback", &text(&"é".repeat(50))), None);
            // Counted in characters, not UTF-16 units
            assert_eq!(rule.check("Feedback", &text(&"😀".repeat(25))), msg);
            assert_eq!(rule.check("Feedback", &text(&"😀".repeat(50))), None);
        }

        #[test]
        fn test_non_empty_set() {
            let rule = Rule::NonEmptySet { item: "skill" };
            assert_eq!(
                rule.check("Additional Skills", &FieldValue::Multi(vec![])),
                Some("At least one skill must be selected.".to_string())
            );
            assert_eq!(
                rule.check(
                    "Additional Skills",
                    &FieldValue::Multi(vec!["CSS".to_string()])
                ),
                None
            );
        }
    }

    mod conditions {
        use super::*;

        #[test]
        fn test_condition_matches_any_listed_value() {
            let values = FormValues::new(vec![(
                "position",
                FieldValue::Choice("Designer".to_string()),
            )]);
            let condition = Condition {
                discriminator: "position",
                any_of: &["Developer", "Designer"],
            };
            assert!(condition.holds(&values));

            let manager_only = Condition {
                discriminator: "position",
                any_of: &["Manager"],
            };
            assert!(!manager_only.holds(&values));
        }

        #[test]
        fn test_condition_on_unknown_discriminator_is_false() {
            let condition = Condition {
                discriminator: "missing",
                any_of: &["Yes"],
            };
            assert!(!condition.holds(&FormValues::default()));
        }
    }
}
