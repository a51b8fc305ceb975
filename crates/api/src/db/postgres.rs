//! `PostgreSQL` document store.
//!
//! Every collection shares the `documents` table (see
//! `migrations/20250101000001_create_documents.sql`). Filters are translated
//! to SQL over the JSONB `body` column with bound parameters only.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::{
    Collection, Document, DocumentStore, Filter, FindOptions, StoreError, document_id, project,
    unique_key,
};

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
/// * `database` - Database name overriding the one in the URL, if any
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is invalid or the connection cannot be
/// established.
pub async fn create_pool(
    database_url: &SecretString,
    database: Option<&str>,
) -> Result<PgPool, sqlx::Error> {
    let mut options = PgConnectOptions::from_str(database_url.expose_secret())?;
    if let Some(name) = database {
        options = options.database(name);
    }

    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

/// [`DocumentStore`] backed by a `PostgreSQL` pool.
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    /// Wrap an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect a new pool.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the connection cannot be established.
    pub async fn connect(
        database_url: &SecretString,
        database: Option<&str>,
    ) -> Result<Self, StoreError> {
        let pool = create_pool(database_url, database).await?;
        tracing::info!("Database pool created");
        Ok(Self::new(pool))
    }

    /// Apply pending migrations from `crates/api/migrations/`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Migration` if a migration fails.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Get a reference to the underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Append `collection = $n AND (<filter>)`.
fn push_scope(qb: &mut QueryBuilder<'_, Postgres>, collection: Collection, filter: &Filter) {
    qb.push("collection = ");
    qb.push_bind(collection.as_str());
    qb.push(" AND ");
    push_filter(qb, filter);
}

fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &Filter) {
    match filter {
        Filter::All => {
            qb.push("TRUE");
        }
        // Containment of a one-key object is equality for scalars and can use
        // the GIN index on `body`.
        Filter::Eq { field, value } => {
            qb.push("body @> jsonb_build_object(");
            qb.push_bind(*field);
            qb.push("::text, ");
            qb.push_bind(Json(value.clone()));
            qb.push("::jsonb)");
        }
        Filter::Gte { field, value } => {
            qb.push("(CASE WHEN jsonb_typeof(body -> ");
            qb.push_bind(*field);
            qb.push(") = 'number' THEN (body ->> ");
            qb.push_bind(*field);
            qb.push(")::float8 >= ");
            qb.push_bind(*value);
            qb.push(" ELSE FALSE END)");
        }
        Filter::ContainsIgnoreCase { field, needle } => {
            qb.push("COALESCE(strpos(lower(body ->> ");
            qb.push_bind(*field);
            qb.push("), lower(");
            qb.push_bind(needle.clone());
            qb.push(")) > 0, FALSE)");
        }
        Filter::And(clauses) => push_clauses(qb, clauses, " AND ", "TRUE"),
        Filter::Or(clauses) => push_clauses(qb, clauses, " OR ", "FALSE"),
    }
}

fn push_clauses(
    qb: &mut QueryBuilder<'_, Postgres>,
    clauses: &[Filter],
    separator: &str,
    empty: &str,
) {
    if clauses.is_empty() {
        qb.push(empty);
        return;
    }

    qb.push("(");
    for (i, clause) in clauses.iter().enumerate() {
        if i > 0 {
            qb.push(separator);
        }
        push_filter(qb, clause);
    }
    qb.push(")");
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
        options: &FindOptions,
    ) -> Result<Vec<Document>, StoreError> {
        let mut qb = QueryBuilder::new("SELECT body FROM documents WHERE ");
        push_scope(&mut qb, collection, filter);

        qb.push(" ORDER BY seq");

        if let Some(limit) = options.limit {
            qb.push(" LIMIT ");
            qb.push_bind(i64::try_from(limit).unwrap_or(i64::MAX));
        }

        let rows = qb
            .build_query_scalar::<Json<Document>>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|Json(doc)| match options.projection {
                Some(fields) => project(doc, fields),
                None => doc,
            })
            .collect())
    }

    async fn insert_one(
        &self,
        collection: Collection,
        document: Document,
    ) -> Result<(), StoreError> {
        let id = document_id(&document)?.to_owned();

        sqlx::query("INSERT INTO documents (collection, id, body) VALUES ($1, $2, $3)")
            .bind(collection.as_str())
            .bind(id)
            .bind(Json(document))
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn insert_many(
        &self,
        collection: Collection,
        documents: Vec<Document>,
    ) -> Result<usize, StoreError> {
        if documents.is_empty() {
            return Ok(0);
        }

        let mut rows = Vec::with_capacity(documents.len());
        for document in documents {
            let id = document_id(&document)?.to_owned();
            rows.push((id, document));
        }
        let count = rows.len();

        // A single statement, so the batch is all-or-nothing.
        let mut qb = QueryBuilder::new("INSERT INTO documents (collection, id, body) ");
        qb.push_values(rows, |mut b, (id, document)| {
            b.push_bind(collection.as_str())
                .push_bind(id)
                .push_bind(Json(document));
        });
        qb.build().execute(&self.pool).await?;

        Ok(count)
    }

    async fn insert_unique(
        &self,
        collection: Collection,
        document: Document,
        key: &[&str],
    ) -> Result<bool, StoreError> {
        let id = document_id(&document)?.to_owned();
        let key = unique_key(&document, key);

        let result = sqlx::query(
            r"
            INSERT INTO documents (collection, id, body, unique_key)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (collection, unique_key) WHERE unique_key IS NOT NULL
            DO NOTHING
            ",
        )
        .bind(collection.as_str())
        .bind(id)
        .bind(Json(document))
        .bind(key)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn delete_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<u64, StoreError> {
        let mut qb = QueryBuilder::new(
            "DELETE FROM documents WHERE seq = (SELECT seq FROM documents WHERE ",
        );
        push_scope(&mut qb, collection, filter);
        qb.push(" ORDER BY seq LIMIT 1)");

        let result = qb.build().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn count_documents(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<u64, StoreError> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM documents WHERE ");
        push_scope(&mut qb, collection, filter);

        let count: i64 = qb.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(u64::try_from(count).unwrap_or(0))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database pool closed");
    }
}
