//! Client record form input, its validation schema and multipart encoding.

use super::types::ClientRecord;
use crate::api::ApiError;
use crate::forms::{Rules, Schema, ValidationErrors};
use reqwest::multipart::{Form, Part};
use std::path::Path;

pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 1000;
pub const LOGO_MAX_BYTES: usize = 5 * 1024 * 1024;
pub const LOGO_CONTENT_TYPES: [&str; 5] = [
    "image/png",
    "image/jpeg",
    "image/webp",
    "image/gif",
    "image/svg+xml",
];

/// A logo file read from disk, sent as the `logo` multipart part.
#[derive(Clone, PartialEq, Eq)]
pub struct LogoUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for LogoUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogoUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl LogoUpload {
    /// Reads a logo from `path`, guessing the content type from the extension.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read.
    pub async fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("logo")
            .to_string();

        Ok(Self {
            content_type: content_type_for(path).to_string(),
            file_name,
            bytes,
        })
    }
}

/// Content type for an image path; unknown extensions map to
/// `application/octet-stream` and fail validation.
#[must_use]
pub fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// Input for creating or editing a client record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientForm {
    pub name: String,
    pub website: String,
    pub description: String,
    pub logo: Option<LogoUpload>,
}

impl ClientForm {
    #[must_use]
    pub fn new(name: &str, website: &str, description: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            website: website.trim().to_string(),
            description: description.trim().to_string(),
            logo: None,
        }
    }

    #[must_use]
    pub fn with_logo(mut self, logo: Option<LogoUpload>) -> Self {
        self.logo = logo;
        self
    }

    /// Prefills the form from an existing record (no logo upload).
    #[must_use]
    pub fn from_record(record: &ClientRecord) -> Self {
        Self::new(&record.name, &record.website, &record.description)
    }

    /// The record as it will look once saved, for optimistic display.
    #[must_use]
    pub(crate) fn apply_to(&self, record: &ClientRecord) -> ClientRecord {
        ClientRecord {
            id: record.id.clone(),
            name: self.name.clone(),
            website: self.website.clone(),
            description: self.description.clone(),
            logo: record.logo.clone(),
        }
    }

    /// Encodes the form as `multipart/form-data`.
    ///
    /// # Errors
    /// Returns an error if the logo content type is not a valid MIME type.
    pub fn to_multipart(&self) -> Result<Form, ApiError> {
        let mut form = Form::new()
            .text("name", self.name.clone())
            .text("website", self.website.clone())
            .text("description", self.description.clone());

        if let Some(logo) = &self.logo {
            let part = Part::bytes(logo.bytes.clone())
                .file_name(logo.file_name.clone())
                .mime_str(&logo.content_type)
                .map_err(|err| ApiError::Serialization(format!("Invalid logo type: {err}")))?;
            form = form.part("logo", part);
        }

        Ok(form)
    }
}

impl Schema for ClientForm {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut rules = Rules::new()
            .required("name", &self.name, "Client name is required.")
            .min_len(
                "name",
                &self.name,
                NAME_MIN_CHARS,
                &format!("Client name must be at least {NAME_MIN_CHARS} characters."),
            )
            .max_len(
                "name",
                &self.name,
                NAME_MAX_CHARS,
                &format!("Client name must be at most {NAME_MAX_CHARS} characters."),
            )
            .required("website", &self.website, "Website is required.")
            .url("website", &self.website)
            .required("description", &self.description, "Description is required.")
            .max_len(
                "description",
                &self.description,
                DESCRIPTION_MAX_CHARS,
                &format!("Description must be at most {DESCRIPTION_MAX_CHARS} characters."),
            );

        if let Some(logo) = &self.logo {
            rules = rules
                .check(
                    "logo",
                    LOGO_CONTENT_TYPES.contains(&logo.content_type.as_str()),
                    "Logo must be a PNG, JPEG, WebP, GIF or SVG image.",
                )
                .check(
                    "logo",
                    logo.bytes.len() <= LOGO_MAX_BYTES,
                    "Logo must be 5 MB or smaller.",
                )
                .check("logo", !logo.bytes.is_empty(), "Logo file is empty.");
        }

        rules.finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn logo(content_type: &str, len: usize) -> LogoUpload {
        LogoUpload {
            file_name: "logo.png".to_string(),
            content_type: content_type.to_string(),
            bytes: vec![0x89; len],
        }
    }

    #[test]
    fn valid_form_passes() {
        let form = ClientForm::new(" Acme ", "https://acme.io", "Anvils and rockets")
            .with_logo(Some(logo("image/png", 128)));
        assert_eq!(form.name, "Acme");
        assert!(form.validate().is_ok());
    }

    #[test]
    fn missing_fields_are_reported_together() {
        let errors = ClientForm::new("", "", "").validate().unwrap_err();
        assert_eq!(errors.field("name"), Some("Client name is required."));
        assert_eq!(errors.field("website"), Some("Website is required."));
        assert_eq!(errors.field("description"), Some("Description is required."));
    }

    #[test]
    fn name_length_and_website_format() {
        let errors = ClientForm::new("A", "acme.io", "Anvils")
            .validate()
            .unwrap_err();
        assert_eq!(
            errors.field("name"),
            Some("Client name must be at least 2 characters.")
        );
        assert!(errors.field("website").is_some());

        let long_name = "n".repeat(NAME_MAX_CHARS + 1);
        let errors = ClientForm::new(&long_name, "https://acme.io", "Anvils")
            .validate()
            .unwrap_err();
        assert!(errors.field("name").is_some());
    }

    #[test]
    fn description_is_capped() {
        let long = "d".repeat(DESCRIPTION_MAX_CHARS + 1);
        let errors = ClientForm::new("Acme", "https://acme.io", &long)
            .validate()
            .unwrap_err();
        assert!(errors.field("description").is_some());
    }

    #[test]
    fn logo_type_and_size_are_checked() {
        let base = ClientForm::new("Acme", "https://acme.io", "Anvils");

        let errors = base
            .clone()
            .with_logo(Some(logo("application/pdf", 10)))
            .validate()
            .unwrap_err();
        assert_eq!(
            errors.field("logo"),
            Some("Logo must be a PNG, JPEG, WebP, GIF or SVG image.")
        );

        let errors = base
            .clone()
            .with_logo(Some(logo("image/jpeg", LOGO_MAX_BYTES + 1)))
            .validate()
            .unwrap_err();
        assert_eq!(errors.field("logo"), Some("Logo must be 5 MB or smaller."));

        let errors = base
            .with_logo(Some(logo("image/jpeg", 0)))
            .validate()
            .unwrap_err();
        assert_eq!(errors.field("logo"), Some("Logo file is empty."));
    }

    #[test]
    fn content_type_from_extension() {
        assert_eq!(content_type_for(Path::new("a/logo.PNG")), "image/png");
        assert_eq!(content_type_for(Path::new("logo.jpg")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("logo.svg")), "image/svg+xml");
        assert_eq!(
            content_type_for(Path::new("logo")),
            "application/octet-stream"
        );
    }

    #[tokio::test]
    async fn logo_from_path_reads_file() {
        let path = std::env::temp_dir().join(format!("clientdesk-{}.webp", ulid::Ulid::new()));
        tokio::fs::write(&path, b"RIFF0000WEBP").await.unwrap();

        let logo = LogoUpload::from_path(&path).await;
        let _ = tokio::fs::remove_file(&path).await;
        let logo = logo.unwrap();

        assert_eq!(logo.content_type, "image/webp");
        assert_eq!(logo.bytes, b"RIFF0000WEBP");
        assert!(logo.file_name.ends_with(".webp"));
    }

    #[test]
    fn apply_to_keeps_id_and_logo() {
        let record = ClientRecord {
            id: "c1".to_string(),
            name: "Old".to_string(),
            website: "https://old.io".to_string(),
            description: "old".to_string(),
            logo: Some("https://cdn/logo.png".to_string()),
        };
        let form = ClientForm::new("New", "https://new.io", "new");
        let applied = form.apply_to(&record);
        assert_eq!(applied.id, "c1");
        assert_eq!(applied.name, "New");
        assert_eq!(applied.logo, record.logo);
        assert_eq!(ClientForm::from_record(&applied), form);
    }

    #[test]
    fn multipart_rejects_bad_mime() {
        let form = ClientForm::new("Acme", "https://acme.io", "Anvils")
            .with_logo(Some(logo("not a mime", 10)));
        assert!(matches!(
            form.to_multipart(),
            Err(ApiError::Serialization(_))
        ));
    }
}
