use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::library::errors::StorageError;

const STATUS_OK: &str = "ok";

/// Envelope wrapping every provider response.
///
/// `data` is kept untyped until `status` has been checked, since error
/// responses carry an empty or differently shaped payload.
#[derive(Debug, Deserialize)]
pub struct ProviderResponse {
    pub status: String,
    #[serde(default)]
    pub data: Value,
}

impl ProviderResponse {
    pub fn ensure_ok(&self) -> Result<(), StorageError> {
        if self.status == STATUS_OK {
            Ok(())
        } else {
            Err(StorageError::Rejected(self.status.clone()))
        }
    }

    pub fn into_data<T: DeserializeOwned>(self) -> Result<T, StorageError> {
        self.ensure_ok()?;
        serde_json::from_value(self.data)
            .map_err(|e| StorageError::UnexpectedResponse(e.to_string()))
    }
}

/// Payload of `getServer`.
#[derive(Debug, Deserialize)]
pub struct ServerData {
    pub server: String,
}

/// Payload of a successful upload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadData {
    pub download_page: String,
    pub file_id: String,
    #[serde(default)]
    pub file_name: Option<String>,
}

/// Body of `deleteContent`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteContentRequest<'a> {
    pub contents_id: &'a str,
    pub token: &'a str,
}
