pub mod api;
pub mod client;
pub mod logging;
pub mod reset;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    ColorChoice, Command,
};

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("clientdesk")
        .about("Client records and password reset")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(reset::subcommand())
        .subcommand(client::subcommand());

    let command = api::with_args(command);
    logging::with_args(command)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const BASE_URL_ENV: &str = "CLIENTDESK_API_BASE_URL";

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "clientdesk");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some("Client records and password reset".to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
    }

    #[test]
    fn test_reset_password_with_email() {
        temp_env::with_vars([(BASE_URL_ENV, None::<&str>)], || {
            let matches = new().get_matches_from(vec![
                "clientdesk",
                "--api-base-url",
                "https://api.example.com/api",
                "reset-password",
                "--email",
                "a@b.co",
            ]);

            let (name, sub) = matches.subcommand().unwrap();
            assert_eq!(name, reset::CMD_RESET_PASSWORD);
            assert_eq!(reset::Options::parse(sub).email.as_deref(), Some("a@b.co"));

            let api = api::Options::parse(&matches).unwrap();
            assert_eq!(api.base_url, "https://api.example.com/api");
            assert_eq!(api.timeout_seconds, 10);
            assert!(api.token.is_none());
        });
    }

    #[test]
    fn test_api_args_from_env() {
        temp_env::with_vars(
            [
                (BASE_URL_ENV, Some("http://localhost:9000/")),
                ("CLIENTDESK_API_TOKEN", Some("secret-token")),
                ("CLIENTDESK_TIMEOUT_SECONDS", Some("30")),
            ],
            || {
                let matches = new().get_matches_from(vec!["clientdesk", "reset-password"]);
                let api = api::Options::parse(&matches).unwrap();
                assert_eq!(api.token.as_deref(), Some("secret-token"));
                assert_eq!(api.timeout_seconds, 30);

                let config = api.config().unwrap();
                assert_eq!(config.url("/auth/verify-otp"), "http://localhost:9000/auth/verify-otp");
            },
        );
    }

    #[test]
    fn test_missing_base_url() {
        temp_env::with_vars([(BASE_URL_ENV, None::<&str>)], || {
            let matches = new().get_matches_from(vec!["clientdesk", "reset-password"]);
            let err = api::Options::parse(&matches).unwrap_err();
            assert!(err.to_string().contains("--api-base-url"));
        });
    }

    #[test]
    fn test_invalid_timeout() {
        temp_env::with_vars([(BASE_URL_ENV, Some("http://localhost"))], || {
            let result = new().try_get_matches_from(vec![
                "clientdesk",
                "--timeout-seconds",
                "0",
                "reset-password",
            ]);
            assert!(result.is_err());
        });
    }

    #[test]
    fn test_client_update() {
        let matches = new().get_matches_from(vec![
            "clientdesk",
            "client",
            "update",
            "c-42",
            "--name",
            "Acme",
            "--website",
            "https://acme.test",
            "--description",
            "Widgets",
            "--logo",
            "/tmp/logo.png",
        ]);

        let (_, client) = matches.subcommand().unwrap();
        let (name, update) = client.subcommand().unwrap();
        assert_eq!(name, client::CMD_UPDATE);
        assert_eq!(
            update.get_one::<String>(client::ARG_ID).map(String::as_str),
            Some("c-42")
        );

        let form = client::FormOptions::parse(update).unwrap();
        assert_eq!(form.name, "Acme");
        assert_eq!(form.logo, Some(PathBuf::from("/tmp/logo.png")));
    }

    #[test]
    fn test_client_create_requires_fields() {
        let result = new().try_get_matches_from(vec![
            "clientdesk",
            "client",
            "create",
            "--name",
            "Acme",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_verbosity() {
        temp_env::with_vars([("CLIENTDESK_LOG_LEVEL", None::<&str>)], || {
            let matches = new().get_matches_from(vec!["clientdesk", "-vvv", "reset-password"]);
            assert_eq!(
                matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                Some(3)
            );
        });
    }
}
