use crate::api::{ApiClient, ApiConfig};
use crate::cli::prompt::Prompt;
use crate::reset::{
    Navigation, PasswordResetApi, PasswordResetWizard, WizardError, WizardStep,
};
use anyhow::{anyhow, Result};
use secrecy::SecretString;
use tokio::io::{AsyncBufRead, AsyncWrite, BufReader};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info, info_span, Instrument};

const BACK: &str = "back";
const RESEND: &str = "resend";

#[derive(Debug)]
pub struct Args {
    pub api: ApiConfig,
    pub email: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Abandoned,
}

/// Run the interactive reset wizard on stdin/stdout.
///
/// # Errors
/// Returns an error if the HTTP client cannot be built, terminal I/O fails or
/// input ends before the password is changed.
pub async fn execute(args: Args) -> Result<()> {
    let client = ApiClient::new(args.api)?;
    let (mut wizard, mut navigation) = PasswordResetWizard::new(client);
    let mut prompt = Prompt::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout());

    let outcome = run_wizard(&mut wizard, &mut navigation, &mut prompt, args.email)
        .instrument(info_span!("reset_password"))
        .await?;

    match outcome {
        Outcome::Completed => Ok(()),
        Outcome::Abandoned => Err(anyhow!("password reset abandoned")),
    }
}

/// Drives the wizard from prompt answers until the password is changed or the
/// input is closed. `email` skips the first prompt once.
///
/// # Errors
/// Returns an error only on prompt I/O failure; wizard errors are shown to the
/// user and the current step is asked again.
pub async fn run_wizard<A, R, W>(
    wizard: &mut PasswordResetWizard<A>,
    navigation: &mut UnboundedReceiver<Navigation>,
    prompt: &mut Prompt<R, W>,
    email: Option<String>,
) -> Result<Outcome>
where
    A: PasswordResetApi,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut preset = email;

    loop {
        let step = wizard.step().clone();
        prompt
            .say(&format!(
                "[{}/{}] {}",
                step.number(),
                WizardStep::total(),
                step.title()
            ))
            .await?;

        match step {
            WizardStep::Email => {
                let email = match preset.take() {
                    Some(email) => email,
                    None => match prompt.ask("Email: ").await? {
                        Some(email) => email,
                        None => return Ok(Outcome::Abandoned),
                    },
                };
                let result = wizard.submit_email(&email).await;
                report(prompt, result.map(|advance| advance.message)).await?;
            }
            WizardStep::Otp { email } => {
                let label = format!("Code sent to {email} (`{BACK}` to change email, `{RESEND}` for a new code): ");
                let Some(answer) = prompt.ask(&label).await? else {
                    return Ok(Outcome::Abandoned);
                };
                let result = match answer.trim() {
                    BACK => wizard.go_back().map(|()| String::new()),
                    RESEND => wizard.resend_otp().await.map(|advance| advance.message),
                    code => wizard.submit_otp(code).await.map(|advance| advance.message),
                };
                report(prompt, result).await?;
            }
            WizardStep::Reset { .. } => {
                let Some(new_password) = prompt.ask("New password: ").await? else {
                    return Ok(Outcome::Abandoned);
                };
                let Some(confirm) = prompt.ask("Confirm new password: ").await? else {
                    return Ok(Outcome::Abandoned);
                };

                let result = wizard
                    .submit_reset(SecretString::from(new_password), SecretString::from(confirm))
                    .await;

                match result {
                    Ok(complete) => {
                        report(prompt, Ok(complete.message)).await?;
                        match navigation.try_recv() {
                            Ok(Navigation::SignIn) => {
                                info!("password reset completed");
                                prompt.say("You can now sign in with your new password.").await?;
                            }
                            Err(err) => debug!("no navigation signal: {err}"),
                        }
                        return Ok(Outcome::Completed);
                    }
                    Err(err) => report(prompt, Err(err)).await?,
                }
            }
        }
    }
}

async fn report<R, W>(prompt: &mut Prompt<R, W>, result: Result<String, WizardError>) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    match result {
        Ok(message) if message.is_empty() => Ok(()),
        Ok(message) => prompt.say(&message).await,
        Err(WizardError::Validation(errors)) => {
            for error in errors.iter() {
                prompt.say(&format!("{}: {}", error.field, error.message)).await?;
            }
            Ok(())
        }
        Err(err) => prompt.say(&format!("Error: {err}")).await,
    }
}
