//! Client record as returned by the backend.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ClientRecord {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub description: String,
    /// URL of the stored logo image.
    #[serde(default)]
    pub logo: Option<String>,
}

/// The backend returns the record either bare or inside an envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ClientResponse {
    Wrapped {
        #[serde(alias = "data")]
        client: ClientRecord,
    },
    Bare(ClientRecord),
}

impl ClientResponse {
    pub(crate) fn into_record(self) -> ClientRecord {
        match self {
            ClientResponse::Wrapped { client } | ClientResponse::Bare(client) => client,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn acme() -> ClientRecord {
        ClientRecord {
            id: "65f1c0ffee".to_string(),
            name: "Acme".to_string(),
            website: "https://acme.io".to_string(),
            description: "Anvils".to_string(),
            logo: Some("https://cdn.example.com/acme.png".to_string()),
        }
    }

    #[test]
    fn record_accepts_mongo_style_id() {
        let record: ClientRecord = serde_json::from_value(json!({
            "_id": "65f1c0ffee",
            "name": "Acme",
            "website": "https://acme.io",
            "description": "Anvils",
            "logo": "https://cdn.example.com/acme.png",
            "createdAt": "2024-03-13T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(record, acme());
    }

    #[test]
    fn response_accepts_bare_and_wrapped_records() {
        let bare: ClientResponse = serde_json::from_value(json!({
            "id": "65f1c0ffee",
            "name": "Acme",
            "website": "https://acme.io",
            "description": "Anvils",
            "logo": "https://cdn.example.com/acme.png"
        }))
        .unwrap();
        assert_eq!(bare.into_record(), acme());

        let wrapped: ClientResponse = serde_json::from_value(json!({
            "success": true,
            "message": "Client created",
            "client": {
                "_id": "65f1c0ffee",
                "name": "Acme",
                "website": "https://acme.io",
                "description": "Anvils",
                "logo": "https://cdn.example.com/acme.png"
            }
        }))
        .unwrap();
        assert_eq!(wrapped.into_record(), acme());

        let data: ClientResponse = serde_json::from_value(json!({
            "data": {"_id": "65f1c0ffee", "name": "Acme"}
        }))
        .unwrap();
        let record = data.into_record();
        assert_eq!(record.name, "Acme");
        assert_eq!(record.logo, None);
    }
}
