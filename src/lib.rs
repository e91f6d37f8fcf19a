//! # clientdesk
//!
//! Client-side forms for the client records backend: creating and editing client
//! records, and the password reset wizard. All persistence, authentication and
//! OTP handling live in the backend; this crate validates input, drives form
//! state and issues the HTTP calls.
//!
//! ## Password Reset Wizard
//!
//! 1. **Email:** The user submits an email; the backend sends a one-time code to
//!    it via `/auth/forgot-password`.
//! 2. **OTP:** The 6-digit code is checked against `/auth/verify-otp`. The user
//!    may go back to step 1 from here.
//! 3. **Reset:** The new password and its confirmation are posted to
//!    `/auth/reset-password`. On success the wizard returns to step 1 and emits a
//!    single navigation signal so the caller can leave the flow.
//!
//! Steps only advance when the backend answers `success: true`. Rejections keep
//! the current step and surface the server message verbatim; transport failures
//! keep the step and surface a generic retry message.
//!
//! ## Client Records
//!
//! Client records (name, website, description, optional logo) are created and
//! updated with multipart requests. The editor applies changes to its local list
//! before the server confirms them and rolls back on failure.
//!
//! Passwords, OTP codes and API tokens must never be logged.

pub mod api;
pub mod cli;
pub mod clients;
pub mod forms;
pub mod reset;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
