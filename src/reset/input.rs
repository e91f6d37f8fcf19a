//! Per-step form input for the reset wizard.

use crate::forms::{Rules, Schema, ValidationErrors};
use secrecy::{ExposeSecret, SecretString};

/// Length of the one-time code sent by email.
pub const OTP_LENGTH: usize = 6;
/// Minimum length for a new password.
pub const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Clone, Debug)]
pub struct EmailInput {
    pub email: String,
}

impl EmailInput {
    #[must_use]
    pub fn new(email: &str) -> Self {
        Self {
            email: email.trim().to_string(),
        }
    }
}

impl Schema for EmailInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Rules::new()
            .required("email", &self.email, "Email is required.")
            .email("email", &self.email)
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct OtpInput {
    pub code: String,
}

impl OtpInput {
    #[must_use]
    pub fn new(code: &str) -> Self {
        Self {
            code: code.trim().to_string(),
        }
    }
}

impl Schema for OtpInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Rules::new()
            .required("otp", &self.code, "Verification code is required.")
            .digits("otp", &self.code, OTP_LENGTH)
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct ResetInput {
    pub new_password: SecretString,
    pub confirm_new_password: SecretString,
}

impl ResetInput {
    #[must_use]
    pub fn new(new_password: SecretString, confirm_new_password: SecretString) -> Self {
        Self {
            new_password,
            confirm_new_password,
        }
    }
}

impl Schema for ResetInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let password = self.new_password.expose_secret();
        let confirm = self.confirm_new_password.expose_secret();

        Rules::new()
            .required("newPassword", password, "New password is required.")
            .min_len(
                "newPassword",
                password,
                MIN_PASSWORD_LENGTH,
                &format!("Password must be at least {MIN_PASSWORD_LENGTH} characters."),
            )
            .required(
                "confirmNewPassword",
                confirm,
                "Please confirm your new password.",
            )
            .matches(
                "confirmNewPassword",
                confirm,
                password,
                "Passwords do not match.",
            )
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn reset(password: &str, confirm: &str) -> ResetInput {
        ResetInput::new(
            SecretString::from(password.to_string()),
            SecretString::from(confirm.to_string()),
        )
    }

    #[test]
    fn email_input_is_trimmed_and_checked() {
        let input = EmailInput::new("  ada@example.com ");
        assert_eq!(input.email, "ada@example.com");
        assert!(input.validate().is_ok());

        let errors = EmailInput::new("").validate().unwrap_err();
        assert_eq!(errors.field("email"), Some("Email is required."));

        let errors = EmailInput::new("ada@example").validate().unwrap_err();
        assert_eq!(
            errors.field("email"),
            Some("Please enter a valid email address.")
        );
    }

    #[test]
    fn otp_input_requires_six_digits() {
        assert!(OtpInput::new("012345").validate().is_ok());
        for code in ["", "12345", "1234567", "12345a", "12 345", "abcdef"] {
            assert!(
                OtpInput::new(code).validate().is_err(),
                "{code:?} should be rejected"
            );
        }
    }

    #[test]
    fn reset_input_requires_length_and_match() {
        assert!(reset("secret1", "secret1").validate().is_ok());

        let errors = reset("abc", "abc").validate().unwrap_err();
        assert_eq!(
            errors.field("newPassword"),
            Some("Password must be at least 6 characters.")
        );

        let errors = reset("secret1", "secret2").validate().unwrap_err();
        assert_eq!(
            errors.field("confirmNewPassword"),
            Some("Passwords do not match.")
        );
        assert_eq!(errors.field("newPassword"), None);

        let errors = reset("secret1", "").validate().unwrap_err();
        assert_eq!(
            errors.field("confirmNewPassword"),
            Some("Please confirm your new password.")
        );
    }
}
