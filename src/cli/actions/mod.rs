pub mod client;
pub mod reset_password;

// Internal "interpreter" for `Action`.
mod run;

#[derive(Debug)]
pub enum Action {
    ResetPassword(reset_password::Args),
    Client(client::Args),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}
