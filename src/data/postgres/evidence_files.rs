use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::prelude::FromRow;
use utoipa::ToSchema;

use super::Pool;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct EvidenceFile {
    pub id: String,
    pub transaction_id: String,
    pub file_path: String,
    pub description: String,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct EvidenceFiles {
    pool: Pool,
}

impl EvidenceFiles {
    pub(crate) fn new(pool: Pool) -> Self {
        return Self { pool };
    }

    pub async fn insert(
        &self,
        id: &str,
        transaction_id: &str,
        file_path: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            insert into evidence_files (id, transaction_id, file_path, uploaded_at)
            values ($1, $2, $3, $4)
            "#,
        )
        .bind(id)
        .bind(transaction_id)
        .bind(file_path)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        return Ok(());
    }

    pub async fn get_for_transaction(
        &self,
        transaction_id: &str,
    ) -> Result<Vec<EvidenceFile>, sqlx::Error> {
        let rows = sqlx::query_as::<_, EvidenceFile>(
            r#"
            select id, transaction_id, file_path, description, uploaded_at
            from evidence_files where transaction_id = $1
            order by uploaded_at
            "#,
        )
        .bind(transaction_id)
        .fetch_all(&self.pool)
        .await?;

        return Ok(rows);
    }

    pub async fn get_one(
        &self,
        transaction_id: &str,
        id: &str,
    ) -> Result<Option<EvidenceFile>, sqlx::Error> {
        let row = sqlx::query_as::<_, EvidenceFile>(
            r#"
            select id, transaction_id, file_path, description, uploaded_at
            from evidence_files where id = $1 and transaction_id = $2
            limit 1
            "#,
        )
        .bind(id)
        .bind(transaction_id)
        .fetch_optional(&self.pool)
        .await?;

        return Ok(row);
    }

    pub async fn set_description(&self, id: &str, description: &str) -> Result<(), sqlx::Error> {
        sqlx::query("update evidence_files set description = $2 where id = $1")
            .bind(id)
            .bind(description)
            .execute(&self.pool)
            .await?;

        return Ok(());
    }

    pub async fn delete(&self, id: &str) -> Result<(), sqlx::Error> {
        sqlx::query("delete from evidence_files where id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        return Ok(());
    }

    pub async fn paths_for_transaction(
        &self,
        transaction_id: &str,
    ) -> Result<Vec<String>, sqlx::Error> {
        let paths = sqlx::query_scalar::<_, String>(
            "select file_path from evidence_files where transaction_id = $1",
        )
        .bind(transaction_id)
        .fetch_all(&self.pool)
        .await?;

        return Ok(paths);
    }
}
