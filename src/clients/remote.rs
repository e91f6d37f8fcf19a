//! Client record endpoints. Both calls send `multipart/form-data` so the logo
//! can travel with the text fields.

use super::form::ClientForm;
use super::types::{ClientRecord, ClientResponse};
use crate::api::config::push_path_segment;
use crate::api::{ApiClient, ApiError};
use async_trait::async_trait;
use reqwest::Method;
use tracing::instrument;

pub const CREATE_CLIENT_PATH: &str = "/client/create-client";

const UPDATE_CLIENT_PATH: &str = "/client/update-client";

/// Path for updating `id`; the id is always a single encoded segment.
///
/// # Errors
/// Returns `ApiError::Serialization` for empty, `.` or `..` ids.
pub fn update_client_path(id: &str) -> Result<String, ApiError> {
    push_path_segment(UPDATE_CLIENT_PATH, id.trim())
}

#[async_trait]
pub trait ClientApi: Send + Sync {
    async fn create_client(&self, form: &ClientForm) -> Result<ClientRecord, ApiError>;

    async fn update_client(&self, id: &str, form: &ClientForm) -> Result<ClientRecord, ApiError>;
}

#[async_trait]
impl ClientApi for ApiClient {
    #[instrument(skip_all, fields(has_logo = form.logo.is_some()))]
    async fn create_client(&self, form: &ClientForm) -> Result<ClientRecord, ApiError> {
        let body = form.to_multipart()?;
        let response: ClientResponse = self
            .send_multipart(Method::POST, CREATE_CLIENT_PATH, body)
            .await?;
        Ok(response.into_record())
    }

    #[instrument(skip_all, fields(client_id = %id, has_logo = form.logo.is_some()))]
    async fn update_client(&self, id: &str, form: &ClientForm) -> Result<ClientRecord, ApiError> {
        let body = form.to_multipart()?;
        let response: ClientResponse = self
            .send_multipart(Method::PUT, &update_client_path(id)?, body)
            .await?;
        Ok(response.into_record())
    }
}
