//! Certificate repository

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::{delete_by_id, DbError, Deleted};
use crate::db::ChangeSet;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Certificate {
    pub id: Uuid,
    pub profile: String,
    pub title: String,
    pub issuer: String,
    pub date: NaiveDate,
    /// Public URL of the uploaded PDF, if any
    pub file_url: Option<String>,
    pub credential_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCertificate {
    pub profile: String,
    pub title: String,
    pub issuer: String,
    pub date: NaiveDate,
    pub file_url: Option<String>,
    pub credential_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CertificateChanges {
    pub title: Option<String>,
    pub issuer: Option<String>,
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "crate::db::changes::nullable")]
    pub file_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::db::changes::nullable")]
    pub credential_url: Option<Option<String>>,
}

pub struct CertificateRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> CertificateRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Certificates for a profile, most recently issued first.
    pub async fn list(&self, profile: &str) -> Result<Vec<Certificate>, DbError> {
        let certificates = sqlx::query_as(
            r#"
            SELECT id, profile, title, issuer, date, file_url, credential_url, created_at
            FROM certificates
            WHERE profile = $1
            ORDER BY date DESC, created_at DESC
            "#,
        )
        .bind(profile)
        .fetch_all(self.pool)
        .await?;

        Ok(certificates)
    }

    pub async fn create(&self, certificate: NewCertificate) -> Result<Certificate, DbError> {
        let certificate = sqlx::query_as(
            r#"
            INSERT INTO certificates (profile, title, issuer, date, file_url, credential_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, profile, title, issuer, date, file_url, credential_url, created_at
            "#,
        )
        .bind(certificate.profile)
        .bind(certificate.title)
        .bind(certificate.issuer)
        .bind(certificate.date)
        .bind(certificate.file_url)
        .bind(certificate.credential_url)
        .fetch_one(self.pool)
        .await?;

        Ok(certificate)
    }

    pub async fn update(&self, id: Uuid, changes: CertificateChanges) -> Result<Certificate, DbError> {
        ChangeSet::new("certificates")
            .set("title", changes.title)
            .set("issuer", changes.issuer)
            .set("date", changes.date)
            .set_nullable("file_url", changes.file_url)
            .set_nullable("credential_url", changes.credential_url)
            .apply(self.pool, "certificate", id)
            .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<Deleted, DbError> {
        delete_by_id(self.pool, "certificates", "certificate", id).await
    }
}
