//! Form Validation Rules
//!
//! Declarative per-field constraints for the login, signup and todo forms.
//!
//! Every field has an ordered list of rules; the first failing rule produces
//! the message shown next to that field. Form-level validation collects the
//! first failure of each field so the whole form can be marked at once.
//!
//! ```ignore
//! use todo_client::validation::{SignupForm, Validate, Field};
//!
//! let form = SignupForm {
//!     email: "jane@example.com".into(),
//!     password: "Secret1!".into(),
//!     repeat_password: "Secret2!".into(),
//! };
//! let errors = form.validate().unwrap_err();
//! assert_eq!(errors.message(Field::RepeatPassword), Some("The passwords did not match"));
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::models::date_part;

/// Form fields that carry validation rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Email,
    Username,
    Password,
    RepeatPassword,
    Title,
    Description,
    DueDate,
    IsCompleted,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Field::Email => "email",
            Field::Username => "username",
            Field::Password => "password",
            Field::RepeatPassword => "repeat password",
            Field::Title => "title",
            Field::Description => "description",
            Field::DueDate => "due date",
            Field::IsCompleted => "completed",
        }
    }
}

/// Error codes for programmatic handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorCode {
    Required,
    TooShort,
    TooLong,
    InvalidFormat,
    MissingCharacterClass,
    Mismatch,
    OutOfRange,
}

/// A single failed rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: Field,
    pub code: ValidationErrorCode,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: Field, code: ValidationErrorCode, message: impl Into<String>) -> Self {
        Self {
            field,
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field.label(), self.message)
    }
}

impl std::error::Error for ValidationError {}

/// First failure of every invalid field in a form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, ValidationError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure; an earlier failure for the same field wins
    pub fn push(&mut self, error: ValidationError) {
        self.0.entry(error.field).or_insert(error);
    }

    /// Record the outcome of a field check
    pub fn check(&mut self, result: Result<(), ValidationError>) {
        if let Err(error) = result {
            self.push(error);
        }
    }

    pub fn get(&self, field: Field) -> Option<&ValidationError> {
        self.0.get(&field)
    }

    pub fn message(&self, field: Field) -> Option<&str> {
        self.get(field).map(|e| e.message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.values()
    }

    fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for FieldErrors {}

/// Types whose fields can be checked before submission
pub trait Validate {
    fn validate(&self) -> Result<(), FieldErrors>;

    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

// ========================
// Field Rules
// ========================

const REQUIRED: &str = "This field is required";
const EMAIL_FORMAT: &str = "Email wrong format";
const PASSWORD_LENGTH: &str = "Should be between 8 and 20 characters";

/// Characters accepted as the password's special character
pub const PASSWORD_SPECIAL_CHARS: &str = r#"!@#$?*()[]{}'";:\/<>,_.-"#;

/// Maximum title length, in characters
pub const TITLE_MAX_LEN: usize = 50;
pub const DESCRIPTION_MAX_LEN: usize = 150;

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern compiles")
    })
}

fn doubled_symbol_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[+~]{2}").expect("doubled symbol pattern compiles"))
}

/// Length bounds in characters, inclusive on both ends
fn check_length(
    value: &str,
    min: usize,
    max: usize,
    field: Field,
    too_short: &str,
    too_long: &str,
) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len < min {
        let code = if len == 0 {
            ValidationErrorCode::Required
        } else {
            ValidationErrorCode::TooShort
        };
        return Err(ValidationError::new(field, code, too_short));
    }
    if len > max {
        return Err(ValidationError::new(field, ValidationErrorCode::TooLong, too_long));
    }
    Ok(())
}

/// Email rules, applied to `field` (the login form checks its username with them)
pub fn validate_email(value: &str, field: Field) -> Result<(), ValidationError> {
    let format_error = |message: &str| {
        ValidationError::new(field, ValidationErrorCode::InvalidFormat, message)
    };

    check_length(value, 5, 50, field, EMAIL_FORMAT, EMAIL_FORMAT)?;
    if !value.contains('@') {
        return Err(format_error("Email wrong format. Try adding a '@' symbol"));
    }
    if !value.contains('.') {
        return Err(format_error("Email wrong format. Try adding a '.' symbol"));
    }
    if !email_pattern().is_match(value) {
        return Err(format_error(EMAIL_FORMAT));
    }
    if doubled_symbol_pattern().is_match(value) {
        return Err(format_error(EMAIL_FORMAT));
    }
    Ok(())
}

pub fn validate_password(value: &str) -> Result<(), ValidationError> {
    let field = Field::Password;
    check_length(value, 8, 20, field, PASSWORD_LENGTH, PASSWORD_LENGTH)?;

    let classes: [(fn(char) -> bool, &str); 4] = [
        (|c| c.is_ascii_lowercase(), "Should have at least 1 lowercase Latin letter"),
        (|c| c.is_ascii_uppercase(), "Should have at least 1 uppercase Latin letter"),
        (|c| c.is_ascii_digit(), "Should have at least 1 number from 0 to 9"),
        (|c| PASSWORD_SPECIAL_CHARS.contains(c), "Should have at least 1 special character"),
    ];
    for (matches, message) in classes {
        if !value.chars().any(matches) {
            return Err(ValidationError::new(
                field,
                ValidationErrorCode::MissingCharacterClass,
                message,
            ));
        }
    }
    Ok(())
}

/// Repeat-password rules; `password` is the password field's current value
pub fn validate_repeat_password(value: &str, password: &str) -> Result<(), ValidationError> {
    let field = Field::RepeatPassword;
    check_length(
        value,
        3,
        20,
        field,
        "Password must be at least 3 characters long",
        "Password must be at most 20 characters long",
    )?;
    if value != password {
        return Err(ValidationError::new(
            field,
            ValidationErrorCode::Mismatch,
            "The passwords did not match",
        ));
    }
    Ok(())
}

pub fn validate_title(value: &str) -> Result<(), ValidationError> {
    check_length(
        value,
        1,
        TITLE_MAX_LEN,
        Field::Title,
        REQUIRED,
        &format!("Title must be at most {} characters long", TITLE_MAX_LEN),
    )
}

pub fn validate_description(value: &str) -> Result<(), ValidationError> {
    check_length(
        value,
        1,
        DESCRIPTION_MAX_LEN,
        Field::Description,
        REQUIRED,
        &format!("Description must be at most {} characters long", DESCRIPTION_MAX_LEN),
    )
}

/// Parse a `YYYY-MM-DD` date or the date part of an ISO timestamp
pub fn parse_due_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date_part(value.trim()), "%Y-%m-%d").ok()
}

/// Inclusive window a due date must fall into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueDateRule {
    pub earliest: NaiveDate,
    pub latest: NaiveDate,
}

impl Default for DueDateRule {
    /// Fixed origin 1899-12-31 up to 2099-12-31
    fn default() -> Self {
        Self {
            earliest: NaiveDate::from_ymd_opt(1899, 12, 31).unwrap_or(NaiveDate::MIN),
            latest: Self::latest_date(),
        }
    }
}

impl DueDateRule {
    fn latest_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2099, 12, 31).unwrap_or(NaiveDate::MAX)
    }

    /// Reject dates before `today`
    pub fn not_before(today: NaiveDate) -> Self {
        Self {
            earliest: today,
            latest: Self::latest_date(),
        }
    }

    pub fn check(&self, value: &str) -> Result<NaiveDate, ValidationError> {
        let field = Field::DueDate;
        if value.trim().is_empty() {
            return Err(ValidationError::new(field, ValidationErrorCode::Required, REQUIRED));
        }
        let date = parse_due_date(value).ok_or_else(|| {
            ValidationError::new(field, ValidationErrorCode::InvalidFormat, "Invalid date")
        })?;
        if date < self.earliest {
            return Err(ValidationError::new(
                field,
                ValidationErrorCode::OutOfRange,
                "Due date must not be in the past",
            ));
        }
        if date > self.latest {
            return Err(ValidationError::new(
                field,
                ValidationErrorCode::OutOfRange,
                "Due date must be until 31.12.2099",
            ));
        }
        Ok(date)
    }
}

// ========================
// Forms
// ========================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl Validate for LoginForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check(validate_email(&self.username, Field::Username));
        errors.check(validate_password(&self.password));
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub email: String,
    pub password: String,
    pub repeat_password: String,
}

impl Validate for SignupForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check(validate_email(&self.email, Field::Email));
        errors.check(validate_password(&self.password));
        errors.check(validate_repeat_password(&self.repeat_password, &self.password));
        errors.into_result()
    }
}

/// Whether a form's submit control is disabled
///
/// Blocked while a request is in flight, and while the form is invalid once
/// the user has tried to submit it.
pub fn submit_disabled(attempted: bool, in_flight: bool, errors: Option<&FieldErrors>) -> bool {
    in_flight || (attempted && errors.is_some())
}

/// Values of the todo popup form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoForm {
    pub title: String,
    pub description: String,
    /// Raw value of the date input
    pub due_date: String,
    /// Only offered while editing
    pub is_completed: Option<bool>,
}

impl TodoForm {
    pub fn validate_with(&self, due_date_rule: &DueDateRule) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check(validate_title(&self.title));
        errors.check(validate_description(&self.description));
        errors.check(due_date_rule.check(&self.due_date).map(|_| ()));
        errors.into_result()
    }
}

impl Validate for TodoForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        self.validate_with(&DueDateRule::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD_PASSWORD: &str = "Abcdef1!";

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_email_accepts_plain_address() {
        assert!(validate_email("jane.doe@example.com", Field::Email).is_ok());
        assert!(validate_email("a_b-c@mail.co.uk", Field::Email).is_ok());
    }

    #[test]
    fn test_email_rule_order() {
        let msg = |v: &str| validate_email(v, Field::Email).unwrap_err().message;

        assert_eq!(msg("a@b."), "Email wrong format");
        assert_eq!(msg("janedoe.com"), "Email wrong format. Try adding a '@' symbol");
        assert_eq!(msg("jane@doecom"), "Email wrong format. Try adding a '.' symbol");
        assert_eq!(msg("jane@doe.c"), "Email wrong format");
        assert_eq!(msg("ja++ne@doe.com"), "Email wrong format");
        assert_eq!(msg(&format!("{}@example.com", "a".repeat(40))), "Email wrong format");
    }

    #[test]
    fn test_email_rejects_non_ascii_digits() {
        assert!(validate_email("jane\u{0661}@example.com", Field::Email).is_err());
        assert!(validate_email("jane\u{FF11}@example.com", Field::Email).is_err());
        assert!(validate_email("jane@ex\u{0661}ample.com", Field::Email).is_err());
        assert!(validate_email("jane1@example2.com", Field::Email).is_ok());
    }

    #[test]
    fn test_submit_disabled() {
        let errors = SignupForm {
            email: "jane@example.com".to_string(),
            password: GOOD_PASSWORD.to_string(),
            repeat_password: "Abcdef1?".to_string(),
        }
        .validate()
        .err();
        assert_eq!(
            errors.as_ref().and_then(|e| e.message(Field::RepeatPassword)),
            Some("The passwords did not match")
        );

        assert!(!submit_disabled(false, false, errors.as_ref()));
        assert!(submit_disabled(true, false, errors.as_ref()));
        assert!(!submit_disabled(true, false, None));
        assert!(submit_disabled(false, true, None));
    }

    #[test]
    fn test_email_error_carries_field() {
        let err = validate_email("nope", Field::Username).unwrap_err();
        assert_eq!(err.field, Field::Username);
        assert_eq!(err.code, ValidationErrorCode::TooShort);
    }

    #[test]
    fn test_password_with_all_classes() {
        assert!(validate_password(GOOD_PASSWORD).is_ok());
        assert!(validate_password("Zz9[long-enough]").is_ok());
    }

    #[test]
    fn test_password_missing_each_class() {
        let cases = [
            ("ABCDEF1!", "Should have at least 1 lowercase Latin letter"),
            ("abcdef1!", "Should have at least 1 uppercase Latin letter"),
            ("Abcdefg!", "Should have at least 1 number from 0 to 9"),
            ("Abcdefg1", "Should have at least 1 special character"),
            ("Abc1!", "Should be between 8 and 20 characters"),
            ("Abcdefghijklmnopqr1!x", "Should be between 8 and 20 characters"),
        ];
        for (password, expected) in cases {
            let err = validate_password(password).unwrap_err();
            assert_eq!(err.message, expected, "password {:?}", password);
        }
    }

    #[test]
    fn test_password_special_set() {
        for special in PASSWORD_SPECIAL_CHARS.chars() {
            let candidate = format!("Abcdef1{}", special);
            assert!(validate_password(&candidate).is_ok(), "special {:?}", special);
        }
        assert!(validate_password("Abcdef1%").is_err());
    }

    #[test]
    fn test_repeat_password_match() {
        assert!(validate_repeat_password(GOOD_PASSWORD, GOOD_PASSWORD).is_ok());

        let err = validate_repeat_password("Abcdef1?", GOOD_PASSWORD).unwrap_err();
        assert_eq!(err.field, Field::RepeatPassword);
        assert_eq!(err.code, ValidationErrorCode::Mismatch);
        assert_eq!(err.message, "The passwords did not match");
    }

    #[test]
    fn test_repeat_password_length_checked_first() {
        let err = validate_repeat_password("ab", GOOD_PASSWORD).unwrap_err();
        assert_eq!(err.message, "Password must be at least 3 characters long");
    }

    #[test]
    fn test_signup_form_mismatch() {
        let form = SignupForm {
            email: "jane@example.com".to_string(),
            password: GOOD_PASSWORD.to_string(),
            repeat_password: "Abcdef1?".to_string(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.message(Field::RepeatPassword), Some("The passwords did not match"));
    }

    #[test]
    fn test_login_form_reports_every_field() {
        let form = LoginForm {
            username: "jane".to_string(),
            password: "short".to_string(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.get(Field::Username).is_some());
        assert!(errors.get(Field::Password).is_some());

        let ok = LoginForm {
            username: "jane@example.com".to_string(),
            password: GOOD_PASSWORD.to_string(),
        };
        assert!(ok.is_valid());
    }

    #[test]
    fn test_title_limit_is_fifty() {
        assert!(validate_title(&"t".repeat(50)).is_ok());
        let err = validate_title(&"t".repeat(51)).unwrap_err();
        assert_eq!(err.message, "Title must be at most 50 characters long");
        assert_eq!(validate_title("").unwrap_err().code, ValidationErrorCode::Required);
    }

    #[test]
    fn test_description_bounds() {
        assert!(validate_description(&"d".repeat(150)).is_ok());
        assert!(validate_description(&"d".repeat(151)).is_err());
        assert_eq!(validate_description("").unwrap_err().message, "This field is required");
    }

    #[test]
    fn test_due_date_window() {
        let rule = DueDateRule::default();
        assert!(rule.check("1899-12-31").is_ok());
        assert!(rule.check("2024-02-29").is_ok());
        assert!(rule.check("2099-12-31").is_ok());
        assert!(rule.check("2099-12-31T23:59:59Z").is_ok());

        assert_eq!(rule.check("1899-12-30").unwrap_err().message, "Due date must not be in the past");
        assert_eq!(rule.check("2100-01-01").unwrap_err().message, "Due date must be until 31.12.2099");
        assert_eq!(rule.check("31/12/2020").unwrap_err().message, "Invalid date");
        assert_eq!(rule.check("").unwrap_err().code, ValidationErrorCode::Required);
    }

    #[test]
    fn test_due_date_not_before_today() {
        let rule = DueDateRule::not_before(date(2026, 10, 17));
        assert!(rule.check("2026-10-17").is_ok());
        assert!(rule.check("2026-10-16").is_err());
        assert_eq!(rule.check("2030-01-01").unwrap(), date(2030, 1, 1));
    }

    #[test]
    fn test_todo_form() {
        let form = TodoForm {
            title: "Buy milk".to_string(),
            description: "Two litres".to_string(),
            due_date: "2030-01-01".to_string(),
            is_completed: None,
        };
        assert!(form.is_valid());

        let empty = TodoForm::default();
        let errors = empty.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.get(Field::IsCompleted).is_none());
    }
}
