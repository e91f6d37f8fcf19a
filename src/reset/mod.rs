//! Password reset wizard: email, then one-time code, then new password.
//!
//! Flow Overview: `submit_email` asks the backend to send a code, `submit_otp`
//! verifies it and `submit_reset` sets the new password. Each step is gated by
//! local validation and a `success: true` answer from the backend. Codes and
//! passwords must never be logged.

pub mod input;
pub mod remote;
pub mod state;
pub mod types;
mod wizard;

pub use remote::PasswordResetApi;
pub use state::{WizardState, WizardStep, RETRY_MESSAGE};
pub use types::AuthResponse;
pub use wizard::{Advance, Complete, Navigation, PasswordResetWizard, WizardError};
