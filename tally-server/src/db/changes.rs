//! Partial updates built from typed change sets
//!
//! Each repository maps its `*Changes` struct onto a [`ChangeSet`], naming
//! only columns it owns. Absent fields are skipped, so a statement touches
//! exactly the columns the caller supplied.
//!
//! Nullable columns use `Option<Option<T>>` so that an explicit JSON `null`
//! (clear the column) is distinct from an absent key (leave it alone).

use serde::{Deserialize, Deserializer};
use sqlx::postgres::PgRow;
use sqlx::{Encode, FromRow, PgPool, Postgres, QueryBuilder, Type};
use uuid::Uuid;

use super::repos::DbError;

/// `UPDATE <table> SET ...` under construction
pub struct ChangeSet<'args> {
    builder: QueryBuilder<'args, Postgres>,
    /// Columns written so far, including timestamps
    columns: usize,
    /// Columns supplied by the caller
    fields: usize,
}

impl<'args> ChangeSet<'args> {
    pub fn new(table: &'static str) -> Self {
        let mut builder = QueryBuilder::new("UPDATE ");
        builder.push(table).push(" SET ");
        Self {
            builder,
            columns: 0,
            fields: 0,
        }
    }

    /// Set `column` when a value was supplied.
    pub fn set<T>(mut self, column: &'static str, value: Option<T>) -> Self
    where
        T: 'args + Encode<'args, Postgres> + Type<Postgres> + Send,
    {
        if let Some(value) = value {
            self.separator();
            self.builder.push(column).push(" = ").push_bind(value);
            self.fields += 1;
        }
        self
    }

    /// Set a nullable `column` when the key was supplied, writing NULL for an
    /// explicit `null`.
    pub fn set_nullable<T>(mut self, column: &'static str, value: Option<Option<T>>) -> Self
    where
        T: 'args + Encode<'args, Postgres> + Type<Postgres> + Send,
    {
        if let Some(value) = value {
            self.separator();
            self.builder.push(column).push(" = ").push_bind(value);
            self.fields += 1;
        }
        self
    }

    /// Stamp `column` with the current time on every update.
    pub fn touch(mut self, column: &'static str) -> Self {
        self.separator();
        self.builder.push(column).push(" = NOW()");
        self
    }

    /// True when the caller supplied nothing to change.
    pub fn is_empty(&self) -> bool {
        self.fields == 0
    }

    /// SQL text so far (without the WHERE clause)
    pub fn sql(&self) -> &str {
        self.builder.sql()
    }

    /// Run the update against the row with `id` and return it.
    ///
    /// Fails with [`DbError::NoChanges`] before touching the database when
    /// nothing was supplied, and with [`DbError::NotFound`] when no row
    /// matched.
    pub async fn apply<R>(
        mut self,
        pool: &PgPool,
        resource: &'static str,
        id: Uuid,
    ) -> Result<R, DbError>
    where
        R: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        if self.is_empty() {
            return Err(DbError::NoChanges { resource });
        }

        self.builder
            .push(" WHERE id = ")
            .push_bind(id)
            .push(" RETURNING *");

        self.builder
            .build_query_as::<R>()
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| DbError::NotFound {
                resource,
                id: id.to_string(),
            })
    }

    fn separator(&mut self) {
        if self.columns > 0 {
            self.builder.push(", ");
        }
        self.columns += 1;
    }
}

/// Deserialize a present key into `Some`, keeping `null` as `Some(None)`.
///
/// Pair with `#[serde(default)]` so an absent key stays `None`.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
