use crate::cli::actions::{client, reset_password, Action};
use anyhow::Result;

/// Execute the provided action.
// Single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::ResetPassword(args) => reset_password::execute(args).await,
        Action::Client(args) => client::execute(args).await,
    }
}
