//! Wizard state and its pure transition function. The controller in
//! `wizard.rs` turns remote results into [`WizardEvent`]s and folds them through
//! [`transition`]; nothing else mutates a [`WizardState`].

/// Shown for transport failures instead of the raw error.
pub const RETRY_MESSAGE: &str = "Something went wrong. Please try again.";

/// Current wizard step. The email only exists once the backend accepted it and
/// is carried unchanged into the following steps.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum WizardStep {
    #[default]
    Email,
    Otp {
        email: String,
    },
    Reset {
        email: String,
    },
}

impl WizardStep {
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        match self {
            WizardStep::Email => None,
            WizardStep::Otp { email } | WizardStep::Reset { email } => Some(email),
        }
    }

    /// 1-based position, used for "Step n of 3" headings.
    #[must_use]
    pub fn number(&self) -> usize {
        match self {
            WizardStep::Email => 1,
            WizardStep::Otp { .. } => 2,
            WizardStep::Reset { .. } => 3,
        }
    }

    #[must_use]
    pub const fn total() -> usize {
        3
    }

    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Email => "Forgot password",
            WizardStep::Otp { .. } => "Verify code",
            WizardStep::Reset { .. } => "Set a new password",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WizardState {
    pub step: WizardStep,
    /// Last server or transport message, shown verbatim.
    pub message: String,
    /// The `success` flag that produced `message`.
    pub success: bool,
    /// True while a submit is in flight.
    pub loading: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WizardEvent {
    SubmitStarted,
    EmailAccepted { email: String, message: String },
    OtpResent { message: String },
    OtpAccepted { message: String },
    ResetCompleted { message: String },
    Rejected { message: String },
    TransportFailed,
    BackRequested,
}

/// Computes the next state. Events that do not belong to the current step
/// settle `loading` but leave the step untouched.
#[must_use]
pub fn transition(state: &WizardState, event: WizardEvent) -> WizardState {
    let mut next = state.clone();

    match event {
        WizardEvent::SubmitStarted => {
            next.loading = true;
            next.message.clear();
            next.success = false;
        }
        WizardEvent::EmailAccepted { email, message } => {
            if state.step == WizardStep::Email {
                next.step = WizardStep::Otp { email };
            }
            settle(&mut next, true, message);
        }
        WizardEvent::OtpResent { message } => settle(&mut next, true, message),
        WizardEvent::OtpAccepted { message } => {
            if let WizardStep::Otp { email } = &state.step {
                next.step = WizardStep::Reset {
                    email: email.clone(),
                };
            }
            settle(&mut next, true, message);
        }
        WizardEvent::ResetCompleted { message } => {
            if matches!(state.step, WizardStep::Reset { .. }) {
                next.step = WizardStep::Email;
            }
            settle(&mut next, true, message);
        }
        WizardEvent::Rejected { message } => settle(&mut next, false, message),
        WizardEvent::TransportFailed => settle(&mut next, false, RETRY_MESSAGE.to_string()),
        WizardEvent::BackRequested => {
            if matches!(state.step, WizardStep::Otp { .. }) && !state.loading {
                next.step = WizardStep::Email;
                next.message.clear();
                next.success = false;
            }
        }
    }

    next
}

fn settle(state: &mut WizardState, success: bool, message: String) {
    state.loading = false;
    state.success = success;
    state.message = message;
}
