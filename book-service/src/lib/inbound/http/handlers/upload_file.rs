use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::library::ports::LibraryServicePort;

const FILE_FIELD: &str = "file";
const PDF_CONTENT_TYPE: &str = "application/pdf";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadFileResponseData {
    pub file_token: String,
}

/// Accept a PDF from multipart field `file` and forward it to storage.
pub async fn upload_file<S: LibraryServicePort>(
    State(state): State<AppState<S>>,
    mut multipart: Multipart,
) -> Result<ApiSuccess<UploadFileResponseData>, ApiError> {
    let mut upload = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or("upload.pdf").to_string();
        if !is_pdf(field.content_type(), &filename) {
            return Err(ApiError::BadRequest("Please attach a PDF file".to_string()));
        }

        let content = field.bytes().await.map_err(multipart_error)?;
        upload = Some((content.to_vec(), filename));
        break;
    }

    let (content, filename) = upload.ok_or_else(|| {
        ApiError::BadRequest(format!("Missing multipart field `{}`", FILE_FIELD))
    })?;
    if content.is_empty() {
        return Err(ApiError::BadRequest("Uploaded file is empty".to_string()));
    }

    state
        .library_service
        .upload_file(content, &filename)
        .await
        .map_err(ApiError::from)
        .map(|token| {
            ApiSuccess::new(
                StatusCode::OK,
                UploadFileResponseData {
                    file_token: token.to_string(),
                },
            )
        })
}

fn is_pdf(content_type: Option<&str>, filename: &str) -> bool {
    content_type == Some(PDF_CONTENT_TYPE) || filename.to_ascii_lowercase().ends_with(".pdf")
}

fn multipart_error(e: MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(e.body_text())
    } else {
        ApiError::BadRequest(e.body_text())
    }
}
