//! Input validation and user-facing message formatting.
//!
//! Validation runs in two stages: the checker functions below inspect a
//! request field and record a [`ValidationIssue`] describing *why* it failed,
//! and a [`MessageCatalog`] turns each issue into the string the dashboard
//! shows next to the field. Keeping the two apart means the wording lives in
//! one injectable object instead of being scattered through the services.

use chrono::NaiveDate;
use thiserror::Error;

/// What the checker actually received for a field.
#[derive(Debug, Clone, PartialEq)]
pub enum Received {
    /// The field was absent entirely.
    Missing,
    /// The field was present but of the wrong type.
    Type(&'static str),
}

/// Whether a minimum applies to a string length or a numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeKind {
    Chars,
    Value,
}

/// Sub-kind of a string format failure.
#[derive(Debug, Clone, PartialEq)]
pub enum StringFormat {
    Email,
    Other(&'static str),
}

/// Why a field failed validation. Closed set; anything that does not fit the
/// first three shapes carries its own message through `Custom`.
#[derive(Debug, Clone, PartialEq)]
pub enum IssueKind {
    WrongType {
        expected: &'static str,
        received: Received,
    },
    TooSmall {
        minimum: f64,
        kind: SizeKind,
    },
    InvalidFormat(StringFormat),
    Custom(String),
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    pub field: String,
    pub kind: IssueKind,
}

impl ValidationIssue {
    pub fn new(field: &str, kind: IssueKind) -> Self {
        Self {
            field: field.to_string(),
            kind,
        }
    }
}

/// Error returned by services when a request fails validation. Carries the
/// raw issues; the REST layer formats them through the catalog.
#[derive(Debug, Clone, Error)]
#[error("Validation failed for {} field(s)", .issues.len())]
pub struct ValidationFailed {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationFailed {
    pub fn new(issues: Vec<ValidationIssue>) -> Self {
        Self { issues }
    }
}

/// The wording used for validation messages.
///
/// Passed in wherever issues are formatted rather than installed as a global
/// override, so tests and alternative frontends can swap it wholesale.
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    pub required: String,
    pub invalid_email: String,
    pub invalid_format: String,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self {
            required: "This field is required".to_string(),
            invalid_email: "Invalid email address".to_string(),
            invalid_format: "Invalid format".to_string(),
        }
    }
}

impl MessageCatalog {
    /// Map one issue to its user-facing message.
    ///
    /// A missing value and an empty string with a minimum length of 1 both
    /// read as "required" - the dashboard treats them identically.
    pub fn format(&self, issue: &ValidationIssue) -> String {
        match &issue.kind {
            IssueKind::WrongType {
                received: Received::Missing,
                ..
            } => self.required.clone(),
            IssueKind::WrongType {
                expected,
                received: Received::Type(received),
            } => format!("Expected {}, received {}", expected, received),
            IssueKind::TooSmall {
                minimum,
                kind: SizeKind::Chars,
            } => {
                if *minimum == 1.0 {
                    self.required.clone()
                } else {
                    format!("Must be at least {} characters", minimum)
                }
            }
            IssueKind::TooSmall {
                minimum,
                kind: SizeKind::Value,
            } => format!("Must be at least {}", minimum),
            IssueKind::InvalidFormat(StringFormat::Email) => self.invalid_email.clone(),
            IssueKind::InvalidFormat(StringFormat::Other(_)) => self.invalid_format.clone(),
            IssueKind::Custom(message) => message.clone(),
        }
    }
}

/// Longest description/name the dashboard accepts.
pub const MAX_TEXT_LENGTH: usize = 256;

/// Smallest accepted amount.
pub const MIN_AMOUNT: f64 = 0.01;

/// Check a required free-text field (description, name, category).
pub fn check_required_text(issues: &mut Vec<ValidationIssue>, field: &str, value: &str) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        issues.push(ValidationIssue::new(
            field,
            IssueKind::TooSmall {
                minimum: 1.0,
                kind: SizeKind::Chars,
            },
        ));
    } else if trimmed.len() > MAX_TEXT_LENGTH {
        issues.push(ValidationIssue::new(
            field,
            IssueKind::Custom(format!(
                "Must be at most {} characters",
                MAX_TEXT_LENGTH
            )),
        ));
    }
}

/// Check a monetary amount: positive, at least [`MIN_AMOUNT`].
pub fn check_amount(issues: &mut Vec<ValidationIssue>, field: &str, amount: f64) {
    if !amount.is_finite() {
        issues.push(ValidationIssue::new(
            field,
            IssueKind::WrongType {
                expected: "number",
                received: Received::Type("nan"),
            },
        ));
    } else if amount < MIN_AMOUNT {
        issues.push(ValidationIssue::new(
            field,
            IssueKind::TooSmall {
                minimum: MIN_AMOUNT,
                kind: SizeKind::Value,
            },
        ));
    }
}

/// Check a quantity: at least 1.
pub fn check_quantity(issues: &mut Vec<ValidationIssue>, field: &str, quantity: u32) {
    if quantity < 1 {
        issues.push(ValidationIssue::new(
            field,
            IssueKind::TooSmall {
                minimum: 1.0,
                kind: SizeKind::Value,
            },
        ));
    }
}

/// Parse an optional YYYY-MM-DD date field. `None` means "use today";
/// a present but unparseable value records a format issue.
pub fn check_date(
    issues: &mut Vec<ValidationIssue>,
    field: &str,
    value: Option<&str>,
) -> Option<NaiveDate> {
    match value {
        None => None,
        Some(raw) => match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                issues.push(ValidationIssue::new(
                    field,
                    IssueKind::InvalidFormat(StringFormat::Other("date")),
                ));
                None
            }
        },
    }
}

/// Structural e-mail check: one '@', non-empty local part, dotted domain.
pub fn check_email(issues: &mut Vec<ValidationIssue>, field: &str, value: &str) {
    let trimmed = value.trim();
    let mut parts = trimmed.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");
    let valid = !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.');
    if !valid {
        issues.push(ValidationIssue::new(
            field,
            IssueKind::InvalidFormat(StringFormat::Email),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format_one(kind: IssueKind) -> String {
        MessageCatalog::default().format(&ValidationIssue::new("field", kind))
    }

    #[test]
    fn test_missing_value_reads_as_required() {
        let message = format_one(IssueKind::WrongType {
            expected: "string",
            received: Received::Missing,
        });
        assert_eq!(message, "This field is required");
    }

    #[test]
    fn test_wrong_type_names_both_types() {
        let message = format_one(IssueKind::WrongType {
            expected: "number",
            received: Received::Type("string"),
        });
        assert_eq!(message, "Expected number, received string");
    }

    #[test]
    fn test_min_length_one_reads_as_required() {
        // Empty string is treated the same as a missing field, regardless of
        // which field produced the issue.
        for field in ["description", "name", "category"] {
            let message = MessageCatalog::default().format(&ValidationIssue::new(
                field,
                IssueKind::TooSmall {
                    minimum: 1.0,
                    kind: SizeKind::Chars,
                },
            ));
            assert_eq!(message, "This field is required");
        }
    }

    #[test]
    fn test_longer_minimum_states_the_count() {
        let message = format_one(IssueKind::TooSmall {
            minimum: 3.0,
            kind: SizeKind::Chars,
        });
        assert_eq!(message, "Must be at least 3 characters");
    }

    #[test]
    fn test_numeric_minimum_states_the_value() {
        let message = format_one(IssueKind::TooSmall {
            minimum: 0.01,
            kind: SizeKind::Value,
        });
        assert_eq!(message, "Must be at least 0.01");
    }

    #[test]
    fn test_email_format_gets_dedicated_message() {
        assert_eq!(
            format_one(IssueKind::InvalidFormat(StringFormat::Email)),
            "Invalid email address"
        );
        assert_eq!(
            format_one(IssueKind::InvalidFormat(StringFormat::Other("date"))),
            "Invalid format"
        );
    }

    #[test]
    fn test_custom_message_passes_through() {
        assert_eq!(
            format_one(IssueKind::Custom("Already exists".to_string())),
            "Already exists"
        );
    }

    #[test]
    fn test_check_required_text() {
        let mut issues = Vec::new();
        check_required_text(&mut issues, "description", "Lunch");
        assert!(issues.is_empty());

        check_required_text(&mut issues, "description", "   ");
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].kind,
            IssueKind::TooSmall {
                minimum: 1.0,
                kind: SizeKind::Chars
            }
        );

        issues.clear();
        check_required_text(&mut issues, "description", &"x".repeat(300));
        assert_eq!(issues.len(), 1);
        assert!(matches!(issues[0].kind, IssueKind::Custom(_)));
    }

    #[test]
    fn test_check_amount() {
        let mut issues = Vec::new();
        check_amount(&mut issues, "amount", 12.5);
        assert!(issues.is_empty());

        check_amount(&mut issues, "amount", 0.0);
        check_amount(&mut issues, "amount", -3.0);
        assert_eq!(issues.len(), 2);

        issues.clear();
        check_amount(&mut issues, "amount", f64::NAN);
        assert!(matches!(issues[0].kind, IssueKind::WrongType { .. }));
    }

    #[test]
    fn test_check_date() {
        let mut issues = Vec::new();
        assert_eq!(check_date(&mut issues, "date", None), None);
        assert!(issues.is_empty());

        let parsed = check_date(&mut issues, "date", Some("2024-01-05"));
        assert_eq!(parsed, Some(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()));
        assert!(issues.is_empty());

        assert_eq!(check_date(&mut issues, "date", Some("05/01/2024")), None);
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].kind,
            IssueKind::InvalidFormat(StringFormat::Other("date"))
        );
    }

    #[test]
    fn test_check_email() {
        let mut issues = Vec::new();
        check_email(&mut issues, "contact_email", "user@example.com");
        assert!(issues.is_empty());

        for bad in ["", "plainaddress", "@example.com", "user@", "user@nodot"] {
            let mut issues = Vec::new();
            check_email(&mut issues, "contact_email", bad);
            assert_eq!(issues.len(), 1, "expected {:?} to be rejected", bad);
        }
    }
}
