//! Client record creation and editing.
//!
//! Flow Overview: a [`ClientForm`] is validated locally, sent as multipart to
//! `/client/create-client` or `/client/update-client/{id}`, and the
//! [`ClientEditor`] keeps its local list in step with the server answer.

pub mod editor;
pub mod form;
pub mod remote;
pub mod types;

pub use editor::{ClientEditor, EditorError};
pub use form::{ClientForm, LogoUpload};
pub use remote::ClientApi;
pub use types::ClientRecord;
