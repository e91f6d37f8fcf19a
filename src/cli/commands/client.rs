use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use std::path::PathBuf;

pub const CMD_CLIENT: &str = "client";
pub const CMD_CREATE: &str = "create";
pub const CMD_UPDATE: &str = "update";

pub const ARG_ID: &str = "id";
pub const ARG_NAME: &str = "name";
pub const ARG_WEBSITE: &str = "website";
pub const ARG_DESCRIPTION: &str = "description";
pub const ARG_LOGO: &str = "logo";

/// Form fields shared by `client create` and `client update`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormOptions {
    pub name: String,
    pub website: String,
    pub description: String,
    pub logo: Option<PathBuf>,
}

impl FormOptions {
    /// # Errors
    /// Returns an error if a required field is missing.
    pub fn parse(matches: &ArgMatches) -> Result<Self> {
        let read_required = |id: &str| -> Result<String> {
            matches
                .get_one::<String>(id)
                .cloned()
                .with_context(|| format!("missing required argument: --{id}"))
        };

        Ok(Self {
            name: read_required(ARG_NAME)?,
            website: read_required(ARG_WEBSITE)?,
            description: read_required(ARG_DESCRIPTION)?,
            logo: matches.get_one::<PathBuf>(ARG_LOGO).cloned(),
        })
    }
}

fn form_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_NAME)
                .short('n')
                .long(ARG_NAME)
                .help("Client name")
                .required(true),
        )
        .arg(
            Arg::new(ARG_WEBSITE)
                .short('w')
                .long(ARG_WEBSITE)
                .help("Client website, including http:// or https://")
                .required(true),
        )
        .arg(
            Arg::new(ARG_DESCRIPTION)
                .short('d')
                .long(ARG_DESCRIPTION)
                .help("Short description of the client")
                .required(true),
        )
        .arg(
            Arg::new(ARG_LOGO)
                .short('l')
                .long(ARG_LOGO)
                .help("Path to a logo image (png, jpg, webp, gif or svg, max 5 MB)")
                .value_parser(clap::value_parser!(PathBuf)),
        )
}

#[must_use]
pub fn subcommand() -> Command {
    Command::new(CMD_CLIENT)
        .about("Create or update client records")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(form_args(
            Command::new(CMD_CREATE).about("Create a client record"),
        ))
        .subcommand(form_args(
            Command::new(CMD_UPDATE)
                .about("Update an existing client record")
                .arg(
                    Arg::new(ARG_ID)
                        .help("Client record id")
                        .required(true),
                ),
        ))
}
