//! Field and schema validation shared by every form.
//!
//! A form input implements [`Schema`] by running a [`Rules`] collector over its
//! fields. All failing fields are reported at once so the front end can show
//! every message next to its field; the first failure per field wins.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use url::Url;

/// A validation failure scoped to one field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Ordered list of field errors. Never empty when returned as an `Err`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Message for `field`, if it failed.
    #[must_use]
    pub fn field(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    fn push(&mut self, field: &'static str, message: String) {
        if self.field(field).is_none() {
            self.errors.push(FieldError { field, message });
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.errors.iter().map(|e| e.message.as_str()).collect();
        write!(formatter, "{}", messages.join(" "))
    }
}

impl std::error::Error for ValidationErrors {}

/// A form input that can check itself before submission.
pub trait Schema {
    /// # Errors
    /// Returns every failing field.
    fn validate(&self) -> Result<(), ValidationErrors>;
}

/// Collects rule failures for one form.
#[derive(Debug, Default)]
pub struct Rules {
    errors: ValidationErrors,
}

impl Rules {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails when `value` is blank after trimming.
    #[must_use]
    pub fn required(mut self, field: &'static str, value: &str, message: &str) -> Self {
        if value.trim().is_empty() {
            self.errors.push(field, message.to_string());
        }
        self
    }

    /// Fails when `value` is not a syntactically valid email address.
    #[must_use]
    pub fn email(mut self, field: &'static str, value: &str) -> Self {
        if !valid_email(value.trim()) {
            self.errors
                .push(field, "Please enter a valid email address.".to_string());
        }
        self
    }

    /// Fails unless `value` is exactly `count` ASCII digits.
    #[must_use]
    pub fn digits(mut self, field: &'static str, value: &str, count: usize) -> Self {
        let value = value.trim();
        if value.len() != count || !value.chars().all(|c| c.is_ascii_digit()) {
            self.errors
                .push(field, format!("Code must be exactly {count} digits."));
        }
        self
    }

    /// Fails when `value` has fewer than `min` characters.
    #[must_use]
    pub fn min_len(mut self, field: &'static str, value: &str, min: usize, message: &str) -> Self {
        if value.chars().count() < min {
            self.errors.push(field, message.to_string());
        }
        self
    }

    /// Fails when `value` has more than `max` characters.
    #[must_use]
    pub fn max_len(mut self, field: &'static str, value: &str, max: usize, message: &str) -> Self {
        if value.chars().count() > max {
            self.errors.push(field, message.to_string());
        }
        self
    }

    /// Fails when `value` differs from `other`.
    #[must_use]
    pub fn matches(mut self, field: &'static str, value: &str, other: &str, message: &str) -> Self {
        if value != other {
            self.errors.push(field, message.to_string());
        }
        self
    }

    /// Fails unless `value` is an absolute http(s) URL with a host.
    #[must_use]
    pub fn url(mut self, field: &'static str, value: &str) -> Self {
        if !valid_web_url(value.trim()) {
            self.errors.push(
                field,
                "Please enter a valid URL starting with http:// or https://.".to_string(),
            );
        }
        self
    }

    /// Records a failure computed by the caller.
    #[must_use]
    pub fn check(mut self, field: &'static str, ok: bool, message: &str) -> Self {
        if !ok {
            self.errors.push(field, message.to_string());
        }
        self
    }

    /// # Errors
    /// Returns the collected failures, if any.
    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

static EMAIL_REGEX: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").ok());

/// Basic email format check on trimmed input.
#[must_use]
pub fn valid_email(email: &str) -> bool {
    EMAIL_REGEX
        .as_ref()
        .is_some_and(|regex| regex.is_match(email))
}

fn valid_web_url(value: &str) -> bool {
    Url::parse(value).is_ok_and(|url| {
        matches!(url.scheme(), "http" | "https") && url.host_str().is_some_and(|h| !h.is_empty())
    })
}
