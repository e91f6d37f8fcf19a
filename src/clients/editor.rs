//! Optimistic editing of a local client list.
//!
//! Creates insert a placeholder record (id prefixed with `pending-`) before the
//! request goes out; updates overwrite the local record immediately. The server
//! record replaces the optimistic one on success, and the previous list state
//! is restored on failure. A submit whose future is dropped before it settles
//! keeps the editor busy until `reset` undoes it.

use super::form::ClientForm;
use super::remote::ClientApi;
use super::types::ClientRecord;
use crate::api::ApiError;
use crate::forms::{Schema, ValidationErrors};
use thiserror::Error;
use tracing::{debug, warn};
use ulid::Ulid;

/// Prefix of placeholder ids for records not yet confirmed by the server.
pub const PENDING_ID_PREFIX: &str = "pending-";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditorError {
    #[error("{0}")]
    Validation(ValidationErrors),
    #[error("Client not found: {0}")]
    NotFound(String),
    #[error("A request is already in progress.")]
    Busy,
    #[error(transparent)]
    Remote(#[from] ApiError),
}

pub struct ClientEditor<C> {
    api: C,
    records: Vec<ClientRecord>,
    in_flight: Option<InFlight>,
}

/// What to undo if the submit in flight never settles.
enum InFlight {
    Create { pending_id: String },
    Update { index: usize, previous: ClientRecord },
}

impl<C: ClientApi> ClientEditor<C> {
    pub fn new(api: C) -> Self {
        Self {
            api,
            records: Vec::new(),
            in_flight: None,
        }
    }

    /// Replaces the local list, e.g. after fetching it from elsewhere. Any
    /// abandoned submit is forgotten.
    pub fn load(&mut self, records: Vec<ClientRecord>) {
        self.in_flight = None;
        self.records = records;
    }

    #[must_use]
    pub fn records(&self) -> &[ClientRecord] {
        &self.records
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ClientRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Rolls back a submit whose future was dropped before it settled: the
    /// placeholder is removed or the previous record restored. Noop otherwise.
    pub fn reset(&mut self) {
        match self.in_flight.take() {
            Some(InFlight::Create { pending_id }) => {
                debug!("discarding abandoned client create");
                self.records.retain(|record| record.id != pending_id);
            }
            Some(InFlight::Update { index, previous }) => {
                debug!(client_id = %previous.id, "restoring record after abandoned update");
                if let Some(slot) = self.records.get_mut(index) {
                    *slot = previous;
                }
            }
            None => {}
        }
    }

    /// Creates a client, showing a placeholder until the server answers.
    ///
    /// # Errors
    /// Validation failures (no request is sent) and remote failures (the
    /// placeholder is removed).
    pub async fn create(&mut self, form: &ClientForm) -> Result<ClientRecord, EditorError> {
        self.check(form)?;

        let pending_id = format!("{PENDING_ID_PREFIX}{}", Ulid::new());
        let placeholder = form.apply_to(&ClientRecord {
            id: pending_id.clone(),
            name: String::new(),
            website: String::new(),
            description: String::new(),
            logo: None,
        });
        self.records.push(placeholder);
        self.in_flight = Some(InFlight::Create {
            pending_id: pending_id.clone(),
        });

        let result = self.api.create_client(form).await;
        self.in_flight = None;

        let index = self.records.iter().position(|r| r.id == pending_id);
        match (result, index) {
            (Ok(record), Some(index)) => {
                debug!(client_id = %record.id, "client created");
                self.records[index] = record.clone();
                Ok(record)
            }
            (Ok(record), None) => {
                self.records.push(record.clone());
                Ok(record)
            }
            (Err(err), index) => {
                warn!(error = %err, "client create failed, removing placeholder");
                if let Some(index) = index {
                    self.records.remove(index);
                }
                Err(err.into())
            }
        }
    }

    /// Updates the client `id`, applying the text fields locally first.
    ///
    /// # Errors
    /// Validation failures, `NotFound` for unknown ids, and remote failures
    /// (the previous record is restored).
    pub async fn update(&mut self, id: &str, form: &ClientForm) -> Result<ClientRecord, EditorError> {
        let index = self
            .records
            .iter()
            .position(|record| record.id == id)
            .ok_or_else(|| EditorError::NotFound(id.to_string()))?;
        self.check(form)?;

        let previous = self.records[index].clone();
        self.records[index] = form.apply_to(&previous);
        self.in_flight = Some(InFlight::Update {
            index,
            previous: previous.clone(),
        });

        let result = self.api.update_client(id, form).await;
        self.in_flight = None;

        match result {
            Ok(record) => {
                debug!(client_id = %record.id, "client updated");
                self.records[index] = record.clone();
                Ok(record)
            }
            Err(err) => {
                warn!(client_id = %id, error = %err, "client update failed, restoring record");
                self.records[index] = previous;
                Err(err.into())
            }
        }
    }

    fn check(&self, form: &ClientForm) -> Result<(), EditorError> {
        if self.in_flight.is_some() {
            return Err(EditorError::Busy);
        }
        form.validate().map_err(EditorError::Validation)
    }
}
