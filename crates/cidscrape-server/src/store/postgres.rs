//! PostgreSQL-backed metadata store

use async_trait::async_trait;
use cidscrape_common::Metadata;
use sqlx::PgPool;

use super::{MetadataStore, StoreResult};

/// Store backed by the `metadata` table
#[derive(Clone)]
pub struct PgMetadataStore {
    pool: PgPool,
}

impl PgMetadataStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MetadataRow {
    cid: String,
    image: Option<String>,
    description: Option<String>,
    name: Option<String>,
}

impl From<MetadataRow> for Metadata {
    fn from(row: MetadataRow) -> Self {
        Metadata {
            cid: row.cid,
            image: row.image.unwrap_or_default(),
            description: row.description.unwrap_or_default(),
            name: row.name.unwrap_or_default(),
        }
    }
}

#[async_trait]
impl MetadataStore for PgMetadataStore {
    #[tracing::instrument(skip(self, record), fields(cid = %record.cid))]
    async fn upsert(&self, record: &Metadata) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO metadata (cid, image, description, name)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (cid) DO UPDATE SET
                image = EXCLUDED.image,
                description = EXCLUDED.description,
                name = EXCLUDED.name
            "#,
        )
        .bind(&record.cid)
        .bind(&record.image)
        .bind(&record.description)
        .bind(&record.name)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_all(&self) -> StoreResult<Vec<Metadata>> {
        let rows = sqlx::query_as::<_, MetadataRow>(
            r#"
            SELECT cid, image, description, name
            FROM metadata
            ORDER BY cid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Metadata::from).collect())
    }

    async fn get_by_cid(&self, cid: &str) -> StoreResult<Option<Metadata>> {
        let row = sqlx::query_as::<_, MetadataRow>(
            r#"
            SELECT cid, image, description, name
            FROM metadata
            WHERE cid = $1
            "#,
        )
        .bind(cid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Metadata::from))
    }

    async fn ping(&self) -> StoreResult<()> {
        crate::db::health_check(&self.pool).await
    }
}
