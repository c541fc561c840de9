//! Object storage client
//!
//! Talks to a Supabase-compatible storage REST API:
//! - `POST {base}/storage/v1/object/{bucket}/{path}` uploads (no overwrite)
//! - `{base}/storage/v1/object/public/{bucket}/{path}` is the public URL

use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};

use crate::config::SecretString;

/// Content type sent for every upload
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Storage error type
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("storage rejected upload ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("invalid storage endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Result of a successful upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredObject {
    pub file_url: String,
    pub path: String,
}

/// Error body returned by the storage API
#[derive(Debug, Deserialize)]
struct StorageErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Object storage client
#[derive(Clone)]
pub struct StorageClient {
    client: Client,
    base_url: Url,
    key: SecretString,
}

impl std::fmt::Debug for StorageClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageClient")
            .field("base_url", &self.base_url.as_str())
            .field("key", &self.key)
            .finish()
    }
}

impl StorageClient {
    /// Create a client for the storage service at `base_url`.
    pub fn new(base_url: &str, key: SecretString) -> Result<Self, StorageError> {
        let base_url =
            Url::parse(base_url).map_err(|e| StorageError::InvalidEndpoint(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(StorageError::InvalidEndpoint(base_url.to_string()));
        }

        Ok(Self {
            client: Client::new(),
            base_url,
            key,
        })
    }

    /// Upload a PDF to `bucket` at `path`, failing if the object exists.
    pub async fn upload_pdf(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
    ) -> Result<StoredObject, StorageError> {
        let url = self.object_url(&["storage", "v1", "object", bucket], path)?;

        tracing::debug!(bucket, path, size = bytes.len(), "Uploading object");

        let response = self
            .client
            .post(url)
            .header("Authorization", format!("Bearer {}", self.key.expose()))
            .header("apikey", self.key.expose())
            .header("Content-Type", PDF_CONTENT_TYPE)
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(rejection(status, &body));
        }

        Ok(StoredObject {
            file_url: self.public_url(bucket, path)?,
            path: path.to_owned(),
        })
    }

    /// Public URL of an object.
    pub fn public_url(&self, bucket: &str, path: &str) -> Result<String, StorageError> {
        self.object_url(&["storage", "v1", "object", "public", bucket], path)
            .map(String::from)
    }

    fn object_url(&self, prefix: &[&str], path: &str) -> Result<Url, StorageError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| StorageError::InvalidEndpoint(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(prefix)
            .extend(path.split('/'));
        Ok(url)
    }
}

fn rejection(status: StatusCode, body: &str) -> StorageError {
    let message = serde_json::from_str::<StorageErrorBody>(body)
        .ok()
        .and_then(|b| b.message.or(b.error))
        .unwrap_or_else(|| body.to_owned());

    StorageError::Rejected {
        status: status.as_u16(),
        message,
    }
}

/// Object path `<namespace>/<millis>_<file_name>`.
pub fn object_path(namespace: &str, millis: i64, file_name: &str) -> String {
    format!("{}/{}_{}", namespace.trim_matches('/'), millis, file_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_bytes, header, method, path, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> StorageClient {
        StorageClient::new(&server.uri(), SecretString::new("service-key")).unwrap()
    }

    #[test]
    fn object_path_namespaces_and_stamps() {
        assert_eq!(
            object_path("alice", 1_700_000_000_123, "cert.pdf"),
            "alice/1700000000123_cert.pdf"
        );
        assert_eq!(
            object_path("case-competitions/", 5, "deck.pdf"),
            "case-competitions/5_deck.pdf"
        );
    }

    #[test]
    fn distinct_millis_give_distinct_paths() {
        assert_ne!(object_path("a", 1, "x.pdf"), object_path("a", 2, "x.pdf"));
    }

    #[test]
    fn public_url_encodes_segments() {
        let client = StorageClient::new("https://project.example.co/", SecretString::new("k"))
            .unwrap();
        let url = client
            .public_url("certificates", "alice/1_my cert.pdf")
            .unwrap();
        assert_eq!(
            url,
            "https://project.example.co/storage/v1/object/public/certificates/alice/1_my%20cert.pdf"
        );
    }

    #[test]
    fn rejects_non_base_url() {
        assert!(matches!(
            StorageClient::new("mailto:someone", SecretString::new("k")),
            Err(StorageError::InvalidEndpoint(_))
        ));
        assert!(StorageClient::new("not a url", SecretString::new("k")).is_err());
    }

    #[test]
    fn debug_redacts_key() {
        let client =
            StorageClient::new("https://project.example.co", SecretString::new("sk-secret"))
                .unwrap();
        let debug = format!("{:?}", client);
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("<REDACTED>"));
    }

    #[tokio::test]
    async fn upload_sends_pdf_without_overwrite() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/storage/v1/object/certificates/alice/42_cert.pdf"))
            .and(header("Authorization", "Bearer service-key"))
            .and(header("apikey", "service-key"))
            .and(header("Content-Type", PDF_CONTENT_TYPE))
            .and(header("x-upsert", "false"))
            .and(body_bytes(b"%PDF-1.4".to_vec()))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"Key": "certificates/alice/42_cert.pdf"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let stored = client(&server)
            .upload_pdf("certificates", "alice/42_cert.pdf", b"%PDF-1.4".to_vec())
            .await
            .unwrap();

        assert_eq!(stored.path, "alice/42_cert.pdf");
        assert_eq!(
            stored.file_url,
            format!(
                "{}/storage/v1/object/public/certificates/alice/42_cert.pdf",
                server.uri()
            )
        );
    }

    #[tokio::test]
    async fn duplicate_object_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path_regex(r"^/storage/v1/object/documents/.+$"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "statusCode": "409",
                "error": "Duplicate",
                "message": "The resource already exists"
            })))
            .mount(&server)
            .await;

        let err = client(&server)
            .upload_pdf("documents", "case-competitions/1_deck.pdf", vec![1, 2, 3])
            .await
            .unwrap_err();

        match err {
            StorageError::Rejected { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "The resource already exists");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn plain_text_error_body_passed_through() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
            .mount(&server)
            .await;

        let err = client(&server)
            .upload_pdf("documents", "x/1_a.pdf", vec![])
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "storage rejected upload (503): upstream unavailable"
        );
    }
}
