use crate::cli::actions::{client, reset_password, Action};
use crate::cli::commands::{self, client as client_cmd, reset as reset_cmd};
use anyhow::{anyhow, Context, Result};

/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let api = commands::api::Options::parse(matches)?.config()?;

    match matches.subcommand() {
        Some((reset_cmd::CMD_RESET_PASSWORD, sub)) => {
            let options = reset_cmd::Options::parse(sub);
            Ok(Action::ResetPassword(reset_password::Args {
                api,
                email: options.email,
            }))
        }
        Some((client_cmd::CMD_CLIENT, sub)) => {
            let (operation, form) = match sub.subcommand() {
                Some((client_cmd::CMD_CREATE, create)) => (
                    client::Operation::Create,
                    client_cmd::FormOptions::parse(create)?,
                ),
                Some((client_cmd::CMD_UPDATE, update)) => {
                    let id = update
                        .get_one::<String>(client_cmd::ARG_ID)
                        .cloned()
                        .context("missing required argument: ID")?;
                    (
                        client::Operation::Update { id },
                        client_cmd::FormOptions::parse(update)?,
                    )
                }
                _ => return Err(anyhow!("unknown client command")),
            };
            Ok(Action::Client(client::Args {
                api,
                operation,
                form,
            }))
        }
        _ => Err(anyhow!("no command given, see --help")),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_reset_password() {
        temp_env::with_vars([("CLIENTDESK_API_TOKEN", None::<&str>)], || {
            let matches = commands::new().get_matches_from(vec![
                "clientdesk",
                "-u",
                "https://api.example.com",
                "reset-password",
            ]);

            match handler(&matches).unwrap() {
                Action::ResetPassword(args) => {
                    assert!(args.email.is_none());
                    assert_eq!(args.api.url("/auth/forgot-password"), "https://api.example.com/auth/forgot-password");
                }
                other => panic!("unexpected action: {other:?}"),
            }
        });
    }

    #[test]
    fn test_handler_client_update() {
        let matches = commands::new().get_matches_from(vec![
            "clientdesk",
            "-u",
            "https://api.example.com",
            "client",
            "update",
            "c-1",
            "-n",
            "Acme",
            "-w",
            "https://acme.test",
            "-d",
            "Widgets",
        ]);

        match handler(&matches).unwrap() {
            Action::Client(args) => {
                assert_eq!(args.operation, client::Operation::Update { id: "c-1".to_string() });
                assert_eq!(args.form.website, "https://acme.test");
                assert!(args.form.logo.is_none());
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[test]
    fn test_handler_rejects_bad_base_url() {
        let matches = commands::new().get_matches_from(vec![
            "clientdesk",
            "-u",
            "ftp://api.example.com",
            "reset-password",
        ]);
        assert!(handler(&matches).is_err());
    }
}
