use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::prelude::FromRow;
use utoipa::ToSchema;

use super::Pool;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Receipt {
    pub id: String,
    pub transaction_id: String,
    pub image_path: String,
    pub ocr_store_name: String,
    pub ocr_result_text: String,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct Receipts {
    pool: Pool,
}

impl Receipts {
    pub(crate) fn new(pool: Pool) -> Self {
        return Self { pool };
    }

    pub async fn insert(
        &self,
        id: &str,
        transaction_id: &str,
        image_path: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            insert into receipts (id, transaction_id, image_path, uploaded_at)
            values ($1, $2, $3, $4)
            "#,
        )
        .bind(id)
        .bind(transaction_id)
        .bind(image_path)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        return Ok(());
    }

    /// Receipt by id, restricted to the transaction owner.
    pub async fn get_one_owned(
        &self,
        user_id: &str,
        id: &str,
    ) -> Result<Option<Receipt>, sqlx::Error> {
        let row = sqlx::query_as::<_, Receipt>(
            r#"
            select r.id, r.transaction_id, r.image_path, r.ocr_store_name, r.ocr_result_text, r.uploaded_at
            from receipts r
            join transactions t on t.id = r.transaction_id
            where r.id = $1 and t.user_id = $2
            limit 1
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        return Ok(row);
    }

    pub async fn latest_for_transaction(
        &self,
        transaction_id: &str,
    ) -> Result<Option<Receipt>, sqlx::Error> {
        let row = sqlx::query_as::<_, Receipt>(
            r#"
            select id, transaction_id, image_path, ocr_store_name, ocr_result_text, uploaded_at
            from receipts where transaction_id = $1
            order by uploaded_at desc limit 1
            "#,
        )
        .bind(transaction_id)
        .fetch_optional(&self.pool)
        .await?;

        return Ok(row);
    }

    pub async fn exists_for_transaction(&self, transaction_id: &str) -> Result<bool, sqlx::Error> {
        let exists = sqlx::query_scalar::<_, bool>(
            "select exists(select 1 from receipts where transaction_id = $1)",
        )
        .bind(transaction_id)
        .fetch_one(&self.pool)
        .await?;

        return Ok(exists);
    }

    pub async fn delete(&self, id: &str) -> Result<(), sqlx::Error> {
        sqlx::query("delete from receipts where id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        return Ok(());
    }

    /// Deletes every receipt of a transaction, handing back the image paths
    /// so the files can be removed too.
    pub async fn delete_for_transaction(
        &self,
        transaction_id: &str,
    ) -> Result<Vec<String>, sqlx::Error> {
        let paths = sqlx::query_scalar::<_, String>(
            "delete from receipts where transaction_id = $1 returning image_path",
        )
        .bind(transaction_id)
        .fetch_all(&self.pool)
        .await?;

        return Ok(paths);
    }

    pub async fn paths_for_transaction(
        &self,
        transaction_id: &str,
    ) -> Result<Vec<String>, sqlx::Error> {
        let paths = sqlx::query_scalar::<_, String>(
            "select image_path from receipts where transaction_id = $1",
        )
        .bind(transaction_id)
        .fetch_all(&self.pool)
        .await?;

        return Ok(paths);
    }

    pub async fn all(&self) -> Result<Vec<Receipt>, sqlx::Error> {
        let rows = sqlx::query_as::<_, Receipt>(
            r#"
            select id, transaction_id, image_path, ocr_store_name, ocr_result_text, uploaded_at
            from receipts order by uploaded_at desc
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        return Ok(rows);
    }
}
