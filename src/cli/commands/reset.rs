use clap::{Arg, ArgMatches, Command};

pub const CMD_RESET_PASSWORD: &str = "reset-password";
pub const ARG_EMAIL: &str = "email";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub email: Option<String>,
}

impl Options {
    #[must_use]
    pub fn parse(matches: &ArgMatches) -> Self {
        Self {
            email: matches.get_one::<String>(ARG_EMAIL).cloned(),
        }
    }
}

#[must_use]
pub fn subcommand() -> Command {
    Command::new(CMD_RESET_PASSWORD)
        .about("Reset a forgotten password with an emailed one-time code")
        .long_about(
            "Reset a forgotten password with an emailed one-time code. At the code prompt, type `back` to change the email or `resend` to get a new code.",
        )
        .arg(
            Arg::new(ARG_EMAIL)
                .short('e')
                .long(ARG_EMAIL)
                .help("Account email; prompted for when omitted"),
        )
}
