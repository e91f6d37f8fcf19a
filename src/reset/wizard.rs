//! Step controller for the password reset flow.
//!
//! Every submit validates locally first, then calls the remote and folds the
//! outcome through [`transition`]. Steps move forward only on `success: true`.
//! A completed reset returns the wizard to the email step and sends a single
//! [`Navigation::SignIn`] on the channel handed out by [`PasswordResetWizard::new`].

use super::input::{EmailInput, OtpInput, ResetInput};
use super::remote::PasswordResetApi;
use super::state::{transition, WizardEvent, WizardState, WizardStep, RETRY_MESSAGE};
use super::types::AuthResponse;
use crate::api::ApiError;
use crate::forms::{Schema, ValidationErrors};
use secrecy::SecretString;
use thiserror::Error;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, warn};

/// Where the caller should go once the flow is done.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Navigation {
    SignIn,
}

/// A successful forward move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Advance {
    pub step: WizardStep,
    pub message: String,
}

/// The password was changed and the wizard has been reset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Complete {
    pub message: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WizardError {
    #[error("{0}")]
    Validation(ValidationErrors),
    #[error("{0}")]
    Rejected(String),
    #[error("{}", RETRY_MESSAGE)]
    Transport(#[source] ApiError),
    #[error("A request is already in progress.")]
    Busy,
    #[error("This action is not available on the {0} step.")]
    WrongStep(&'static str),
}

pub struct PasswordResetWizard<A> {
    api: A,
    state: WizardState,
    navigation: UnboundedSender<Navigation>,
}

impl<A: PasswordResetApi> PasswordResetWizard<A> {
    /// Creates a wizard at the email step and the receiver for its navigation
    /// signal.
    pub fn new(api: A) -> (Self, UnboundedReceiver<Navigation>) {
        let (navigation, receiver) = mpsc::unbounded_channel();
        let wizard = Self {
            api,
            state: WizardState::default(),
            navigation,
        };
        (wizard, receiver)
    }

    #[must_use]
    pub fn state(&self) -> &WizardState {
        &self.state
    }

    #[must_use]
    pub fn step(&self) -> &WizardStep {
        &self.state.step
    }

    /// Discards all progress. A submit future dropped mid-flight leaves the
    /// wizard loading; callers that keep the instance must reset it.
    pub fn reset(&mut self) {
        self.state = WizardState::default();
    }

    /// Step 1: request a one-time code for `email`.
    ///
    /// # Errors
    /// Validation failures, server rejections and transport failures; the step
    /// is unchanged in every error case.
    pub async fn submit_email(&mut self, email: &str) -> Result<Advance, WizardError> {
        self.expect_step(matches!(self.state.step, WizardStep::Email))?;

        let input = EmailInput::new(email);
        input.validate().map_err(WizardError::Validation)?;

        self.apply(WizardEvent::SubmitStarted);
        let result = self.api.request_otp(&input.email).await;
        let email = input.email;
        self.settle(result, move |message| WizardEvent::EmailAccepted { email, message })
    }

    /// Step 1 again while on step 2: ask for a fresh code for the stored email.
    ///
    /// # Errors
    /// Server rejections and transport failures.
    pub async fn resend_otp(&mut self) -> Result<Advance, WizardError> {
        let email = self.current_email(matches!(self.state.step, WizardStep::Otp { .. }))?;

        self.apply(WizardEvent::SubmitStarted);
        let result = self.api.request_otp(&email).await;
        self.settle(result, |message| WizardEvent::OtpResent { message })
    }

    /// Step 2: verify the 6-digit code.
    ///
    /// # Errors
    /// Validation failures, server rejections and transport failures.
    pub async fn submit_otp(&mut self, code: &str) -> Result<Advance, WizardError> {
        let email = self.current_email(matches!(self.state.step, WizardStep::Otp { .. }))?;

        let input = OtpInput::new(code);
        input.validate().map_err(WizardError::Validation)?;

        self.apply(WizardEvent::SubmitStarted);
        let result = self.api.verify_otp(&email, &input.code).await;
        self.settle(result, |message| WizardEvent::OtpAccepted { message })
    }

    /// Step 3: set the new password. On success the wizard is back at step 1
    /// and one navigation signal has been sent.
    ///
    /// # Errors
    /// Validation failures, server rejections and transport failures.
    pub async fn submit_reset(
        &mut self,
        new_password: SecretString,
        confirm_new_password: SecretString,
    ) -> Result<Complete, WizardError> {
        let email = self.current_email(matches!(self.state.step, WizardStep::Reset { .. }))?;

        let input = ResetInput::new(new_password, confirm_new_password);
        input.validate().map_err(WizardError::Validation)?;

        self.apply(WizardEvent::SubmitStarted);
        let result = self
            .api
            .reset_password(&email, &input.new_password, &input.confirm_new_password)
            .await;
        let advance = self.settle(result, |message| WizardEvent::ResetCompleted { message })?;

        if self.navigation.send(Navigation::SignIn).is_err() {
            debug!("navigation receiver dropped");
        }

        Ok(Complete {
            message: advance.message,
        })
    }

    /// Step 2 back to step 1. The stored email is discarded.
    ///
    /// # Errors
    /// `WrongStep` outside step 2, `Busy` while a request is in flight.
    pub fn go_back(&mut self) -> Result<(), WizardError> {
        self.expect_step(matches!(self.state.step, WizardStep::Otp { .. }))?;
        self.apply(WizardEvent::BackRequested);
        Ok(())
    }

    fn expect_step(&self, on_step: bool) -> Result<(), WizardError> {
        if !on_step {
            return Err(WizardError::WrongStep(self.state.step.title()));
        }
        if self.state.loading {
            return Err(WizardError::Busy);
        }
        Ok(())
    }

    fn current_email(&self, on_step: bool) -> Result<String, WizardError> {
        self.expect_step(on_step)?;
        self.state
            .step
            .email()
            .map(str::to_string)
            .ok_or(WizardError::WrongStep(self.state.step.title()))
    }

    fn apply(&mut self, event: WizardEvent) {
        let next = transition(&self.state, event);
        if next.step != self.state.step {
            debug!(
                from = self.state.step.number(),
                to = next.step.number(),
                "reset wizard step changed"
            );
        }
        self.state = next;
    }

    fn settle(
        &mut self,
        result: Result<AuthResponse, ApiError>,
        accepted: impl FnOnce(String) -> WizardEvent,
    ) -> Result<Advance, WizardError> {
        match result {
            Ok(response) if response.success => {
                self.apply(accepted(response.message));
                Ok(Advance {
                    step: self.state.step.clone(),
                    message: self.state.message.clone(),
                })
            }
            Ok(response) => {
                debug!(step = self.state.step.number(), "reset step rejected by server");
                self.apply(WizardEvent::Rejected {
                    message: response.message.clone(),
                });
                Err(WizardError::Rejected(response.message))
            }
            Err(err) => {
                warn!(
                    step = self.state.step.number(),
                    transient = err.is_transient(),
                    error = %err,
                    "reset request failed"
                );
                self.apply(WizardEvent::TransportFailed);
                Err(WizardError::Transport(err))
            }
        }
    }
}
