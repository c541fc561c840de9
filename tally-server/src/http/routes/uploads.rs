//! File upload endpoints
//!
//! Files arrive base64-encoded in a JSON body and are stored as PDFs under a
//! millisecond-stamped path, so repeated uploads of one file name never collide.

use std::sync::Arc;

use axum::{extract::State, routing::post, Router};
use base64::{engine::general_purpose, Engine as _};
use chrono::Utc;
use serde::Deserialize;

use crate::http::extractors::ValidJson;
use crate::http::response::{ApiResult, Envelope};
use crate::http::server::AppState;
use crate::models::{required_text, ValidationError};
use crate::storage::{object_path, StoredObject};

const CERTIFICATE_BUCKET: &str = "certificates";
const DOCUMENT_BUCKET: &str = "documents";
const CASE_COMPETITION_NAMESPACE: &str = "case-competitions";

/// Upload request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    pub file_name: Option<String>,
    pub file_base64: Option<String>,
    pub profile: Option<String>,
}

/// Decoded upload
#[derive(Debug)]
struct Upload {
    file_name: String,
    bytes: Vec<u8>,
}

impl UploadRequest {
    fn decode(self) -> Result<Upload, ValidationError> {
        let file_name = path_segment(required_text(self.file_name, "fileName")?, "fileName")?;
        let encoded = required_text(self.file_base64, "fileBase64")?;

        let bytes = general_purpose::STANDARD
            .decode(strip_data_url(encoded.trim()))
            .map_err(|_| ValidationError::InvalidFormat {
                field: "fileBase64",
                reason: "not valid base64",
            })?;

        Ok(Upload { file_name, bytes })
    }
}

/// Accept `value` only as a single storage path segment.
fn path_segment(value: String, field: &'static str) -> Result<String, ValidationError> {
    if value.contains(['/', '\\']) || value == "." || value == ".." {
        return Err(ValidationError::InvalidFormat {
            field,
            reason: "must be a single path segment",
        });
    }
    Ok(value)
}

/// Strip a `data:<mime>;base64,` prefix if present.
fn strip_data_url(encoded: &str) -> &str {
    if encoded.starts_with("data:") {
        if let Some((_, payload)) = encoded.split_once(";base64,") {
            return payload;
        }
    }
    encoded
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// POST /upload/certificate
async fn upload_certificate(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<UploadRequest>,
) -> ApiResult<StoredObject> {
    let profile = path_segment(required_text(req.profile.clone(), "profile")?, "profile")?;
    let upload = req.decode()?;
    let path = object_path(&profile, now_millis(), &upload.file_name);

    let stored = state
        .storage
        .upload_pdf(CERTIFICATE_BUCKET, &path, upload.bytes)
        .await?;
    tracing::info!(path = %stored.path, "certificate uploaded");
    Ok(Envelope::ok(stored))
}

/// POST /upload/case-competition-doc
async fn upload_case_competition_doc(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<UploadRequest>,
) -> ApiResult<StoredObject> {
    let upload = req.decode()?;
    let path = object_path(CASE_COMPETITION_NAMESPACE, now_millis(), &upload.file_name);

    let stored = state
        .storage
        .upload_pdf(DOCUMENT_BUCKET, &path, upload.bytes)
        .await?;
    tracing::info!(path = %stored.path, "case competition document uploaded");
    Ok(Envelope::ok(stored))
}

/// Upload routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/upload/certificate", post(upload_certificate))
        .route(
            "/upload/case-competition-doc",
            post(upload_case_competition_doc),
        )
}
