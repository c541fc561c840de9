//! Certificate endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, put},
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::db::repos::{Certificate, CertificateChanges, CertificateRepo, Deleted, NewCertificate};
use crate::http::extractors::{ValidJson, ValidPath, ValidQuery};
use crate::http::response::{ApiResult, Envelope};
use crate::http::server::AppState;
use crate::models::{required, required_text, ListParams, ValidationError};

#[derive(Debug, Deserialize)]
pub struct CreateCertificateRequest {
    pub profile: Option<String>,
    pub title: Option<String>,
    pub issuer: Option<String>,
    pub date: Option<NaiveDate>,
    pub file_url: Option<String>,
    pub credential_url: Option<String>,
}

impl CreateCertificateRequest {
    fn validate(self) -> Result<NewCertificate, ValidationError> {
        Ok(NewCertificate {
            profile: required_text(self.profile, "profile")?,
            title: required_text(self.title, "title")?,
            issuer: required_text(self.issuer, "issuer")?,
            date: required(self.date, "date")?,
            file_url: self.file_url,
            credential_url: self.credential_url,
        })
    }
}

async fn list_certificates(
    State(state): State<Arc<AppState>>,
    ValidQuery(params): ValidQuery<ListParams>,
) -> ApiResult<Vec<Certificate>> {
    let profile = params.require_profile()?;
    let certificates = CertificateRepo::new(&state.pool).list(profile).await?;
    Ok(Envelope::ok(certificates))
}

async fn create_certificate(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreateCertificateRequest>,
) -> ApiResult<Certificate> {
    let certificate = CertificateRepo::new(&state.pool)
        .create(req.validate()?)
        .await?;
    tracing::info!(id = %certificate.id, title = %certificate.title, "certificate created");
    Ok(Envelope::ok(certificate))
}

async fn update_certificate(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<Uuid>,
    ValidJson(changes): ValidJson<CertificateChanges>,
) -> ApiResult<Certificate> {
    let certificate = CertificateRepo::new(&state.pool).update(id, changes).await?;
    Ok(Envelope::ok(certificate))
}

async fn delete_certificate(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<Uuid>,
) -> ApiResult<Deleted> {
    let deleted = CertificateRepo::new(&state.pool).delete(id).await?;
    Ok(Envelope::ok(deleted))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/certificates",
            get(list_certificates).post(create_certificate),
        )
        .route(
            "/certificates/{id}",
            put(update_certificate).delete(delete_certificate),
        )
}
