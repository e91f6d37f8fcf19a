//! Remote operations behind the reset wizard. The wizard only depends on the
//! [`PasswordResetApi`] trait; [`ApiClient`] is the HTTP implementation.

use super::types::{AuthResponse, ForgotPasswordRequest, ResetPasswordRequest, VerifyOtpRequest};
use crate::api::{ApiClient, ApiError};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

pub const FORGOT_PASSWORD_PATH: &str = "/auth/forgot-password";
pub const VERIFY_OTP_PATH: &str = "/auth/verify-otp";
pub const RESET_PASSWORD_PATH: &str = "/auth/reset-password";

/// The three backend calls of the reset flow. A `success: false` answer is a
/// normal response, not an error; errors are transport failures only.
#[async_trait]
pub trait PasswordResetApi: Send + Sync {
    /// Asks the backend to email a one-time code.
    async fn request_otp(&self, email: &str) -> Result<AuthResponse, ApiError>;

    /// Checks the one-time code for `email`.
    async fn verify_otp(&self, email: &str, otp: &str) -> Result<AuthResponse, ApiError>;

    /// Sets the new password. Must never log the password values.
    async fn reset_password(
        &self,
        email: &str,
        new_password: &SecretString,
        confirm_new_password: &SecretString,
    ) -> Result<AuthResponse, ApiError>;
}

#[async_trait]
impl PasswordResetApi for ApiClient {
    #[instrument(skip_all)]
    async fn request_otp(&self, email: &str) -> Result<AuthResponse, ApiError> {
        let request = ForgotPasswordRequest {
            email: email.to_string(),
        };
        self.post_json_with_error_body(FORGOT_PASSWORD_PATH, &request)
            .await
    }

    #[instrument(skip_all)]
    async fn verify_otp(&self, email: &str, otp: &str) -> Result<AuthResponse, ApiError> {
        let request = VerifyOtpRequest {
            email: email.to_string(),
            otp: otp.to_string(),
        };
        self.post_json_with_error_body(VERIFY_OTP_PATH, &request)
            .await
    }

    #[instrument(skip_all)]
    async fn reset_password(
        &self,
        email: &str,
        new_password: &SecretString,
        confirm_new_password: &SecretString,
    ) -> Result<AuthResponse, ApiError> {
        let request = ResetPasswordRequest {
            email,
            new_password: new_password.expose_secret(),
            confirm_new_password: confirm_new_password.expose_secret(),
        };
        self.post_json_with_error_body(RESET_PASSWORD_PATH, &request)
            .await
    }
}
