use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::Form;
use reqwest::multipart::Part;
use reqwest::Client;
use reqwest::Response;

use super::messages::DeleteContentRequest;
use super::messages::ProviderResponse;
use super::messages::ServerData;
use super::messages::UploadData;
use crate::config::StorageConfig;
use crate::file::models::FileToken;
use crate::file::models::UploadedFile;
use crate::library::errors::StorageError;
use crate::library::ports::FileStorage;

const SERVER_PLACEHOLDER: &str = "{server}";

/// GoFile storage provider client.
///
/// Uploads go through two requests: `getServer` picks an upload host, then
/// the file is posted to that host. The API key travels as the `token`
/// form field or JSON member, never as a header.
pub struct GofileStorage {
    client: Client,
    config: StorageConfig,
}

impl GofileStorage {
    /// # Errors
    /// * `Request` - HTTP client could not be built
    pub fn new(config: StorageConfig) -> Result<Self, StorageError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| StorageError::Request(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn api_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.config.api_url.trim_end_matches('/'), endpoint)
    }

    fn upload_url(&self, server: &str) -> String {
        self.config
            .upload_url_template
            .replace(SERVER_PLACEHOLDER, server)
    }

    async fn upload_server(&self) -> Result<String, StorageError> {
        let response = self
            .client
            .get(self.api_url("getServer"))
            .send()
            .await
            .map_err(request_error)?;

        let data: ServerData = read_envelope(response).await?.into_data()?;
        if data.server.is_empty() {
            return Err(StorageError::UnexpectedResponse(
                "empty upload server".to_string(),
            ));
        }

        Ok(data.server)
    }
}

fn request_error(e: reqwest::Error) -> StorageError {
    StorageError::Request(e.to_string())
}

async fn read_envelope(response: Response) -> Result<ProviderResponse, StorageError> {
    let status = response.status();
    let body = response.bytes().await.map_err(request_error)?;

    serde_json::from_slice(&body).map_err(|e| {
        StorageError::UnexpectedResponse(format!("HTTP {}: {}", status.as_u16(), e))
    })
}

#[async_trait]
impl FileStorage for GofileStorage {
    async fn upload(
        &self,
        content: Vec<u8>,
        filename: &str,
    ) -> Result<UploadedFile, StorageError> {
        let server = self.upload_server().await?;
        let url = self.upload_url(&server);
        tracing::debug!(server = %server, filename, size = content.len(), "Uploading file");

        let part = Part::bytes(content)
            .file_name(filename.to_string())
            .mime_str("application/pdf")
            .map_err(request_error)?;
        let form = Form::new()
            .part("file", part)
            .text("token", self.config.api_key.clone())
            .text("folderId", self.config.folder_id.clone());

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(request_error)?;

        let data: UploadData = read_envelope(response).await?.into_data()?;
        let token = FileToken::new(data.file_id)
            .map_err(|e| StorageError::UnexpectedResponse(e.to_string()))?;

        tracing::debug!(
            file_token = %token,
            file_name = data.file_name.as_deref().unwrap_or(filename),
            "File stored at provider"
        );

        Ok(UploadedFile {
            token,
            download_page: data.download_page,
        })
    }

    async fn delete(&self, token: &FileToken) -> Result<(), StorageError> {
        let response = self
            .client
            .delete(self.api_url("deleteContent"))
            .json(&DeleteContentRequest {
                contents_id: token.as_str(),
                token: &self.config.api_key,
            })
            .send()
            .await
            .map_err(request_error)?;

        read_envelope(response).await?.ensure_ok()?;

        tracing::debug!(file_token = %token, "File removed from provider");
        Ok(())
    }
}
