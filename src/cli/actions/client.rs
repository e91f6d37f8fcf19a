use crate::api::{ApiClient, ApiConfig};
use crate::cli::commands::client::FormOptions;
use crate::clients::{ClientApi, ClientForm, ClientRecord, LogoUpload};
use crate::forms::Schema;
use anyhow::{Context, Result};
use tracing::{info, info_span, Instrument};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update { id: String },
}

#[derive(Debug)]
pub struct Args {
    pub api: ApiConfig,
    pub operation: Operation,
    pub form: FormOptions,
}

/// Validate the form, send it and print the stored record as JSON.
///
/// # Errors
/// Returns an error if the logo cannot be read, validation fails or the
/// backend call fails.
pub async fn execute(args: Args) -> Result<()> {
    let client = ApiClient::new(args.api)?;
    let form = build_form(&args.form).await?;

    let record = submit(&client, &args.operation, &form)
        .instrument(info_span!("client"))
        .await?;

    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

/// # Errors
/// Returns an error if the logo file cannot be read.
pub async fn build_form(options: &FormOptions) -> Result<ClientForm> {
    let logo = match &options.logo {
        Some(path) => Some(
            LogoUpload::from_path(path)
                .await
                .with_context(|| format!("failed to read logo {}", path.display()))?,
        ),
        None => None,
    };

    Ok(ClientForm::new(&options.name, &options.website, &options.description).with_logo(logo))
}

/// Nothing is sent when the form is invalid.
///
/// # Errors
/// Returns the validation messages or the backend error.
pub async fn submit<C: ClientApi>(
    api: &C,
    operation: &Operation,
    form: &ClientForm,
) -> Result<ClientRecord> {
    form.validate()?;

    let record = match operation {
        Operation::Create => api.create_client(form).await?,
        Operation::Update { id } => api.update_client(id, form).await?,
    };

    info!(client_id = %record.id, "client record saved");
    Ok(record)
}
