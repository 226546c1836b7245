use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::{Postgres, QueryBuilder, prelude::FromRow};
use utoipa::ToSchema;

use super::Pool;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct AuditComment {
    pub id: String,
    pub transaction_id: String,
    pub user_id: String,
    pub content: String,
    pub attachment_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct CommentWithAuthor {
    pub id: String,
    pub transaction_id: String,
    pub username: String,
    pub content: String,
    pub attachment_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct CommentSummary {
    pub id: String,
    pub transaction_id: String,
    pub transaction_title: String,
    pub club_name: Option<String>,
    pub username: String,
    pub content: String,
    pub attachment_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct CommentFilter<'a> {
    /// Limit to comments on this user's transactions.
    pub transactions_of: Option<&'a str>,
    pub club: Option<&'a str>,
    pub keyword: Option<&'a str>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Clone)]
pub struct AuditComments {
    pool: Pool,
}

impl AuditComments {
    pub(crate) fn new(pool: Pool) -> Self {
        return Self { pool };
    }

    pub async fn insert(
        &self,
        id: &str,
        transaction_id: &str,
        user_id: &str,
        content: &str,
        attachment_path: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            insert into audit_comments (id, transaction_id, user_id, content, attachment_path, created_at)
            values ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(id)
        .bind(transaction_id)
        .bind(user_id)
        .bind(content)
        .bind(attachment_path)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        return Ok(());
    }

    pub async fn get_for_transaction(
        &self,
        transaction_id: &str,
    ) -> Result<Vec<CommentWithAuthor>, sqlx::Error> {
        let rows = sqlx::query_as::<_, CommentWithAuthor>(
            r#"
            select c.id, c.transaction_id, u.username, c.content, c.attachment_path, c.created_at
            from audit_comments c
            join users u on u.id = c.user_id
            where c.transaction_id = $1
            order by c.created_at
            "#,
        )
        .bind(transaction_id)
        .fetch_all(&self.pool)
        .await?;

        return Ok(rows);
    }

    pub async fn get_one(&self, id: &str) -> Result<Option<AuditComment>, sqlx::Error> {
        let row = sqlx::query_as::<_, AuditComment>(
            r#"
            select id, transaction_id, user_id, content, attachment_path, created_at
            from audit_comments where id = $1 limit 1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        return Ok(row);
    }

    pub async fn update(
        &self,
        id: &str,
        content: &str,
        attachment_path: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("update audit_comments set content = $2, attachment_path = $3 where id = $1")
            .bind(id)
            .bind(content)
            .bind(attachment_path)
            .execute(&self.pool)
            .await?;

        return Ok(());
    }

    pub async fn delete(&self, id: &str) -> Result<(), sqlx::Error> {
        sqlx::query("delete from audit_comments where id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        return Ok(());
    }

    pub async fn summary(
        &self,
        filter: &CommentFilter<'_>,
    ) -> Result<Vec<CommentSummary>, sqlx::Error> {
        let mut query = QueryBuilder::<Postgres>::new(
            r#"
            select c.id, c.transaction_id, t.title as transaction_title, owner.club_name,
                   author.username, c.content, c.attachment_path, c.created_at
            from audit_comments c
            join transactions t on t.id = c.transaction_id
            join users author on author.id = c.user_id
            join users owner on owner.id = t.user_id
            where true
            "#,
        );

        if let Some(user_id) = filter.transactions_of {
            query.push(" and t.user_id = ").push_bind(user_id);
        }
        if let Some(club) = filter.club {
            query.push(" and owner.club_name = ").push_bind(club);
        }
        if let Some(keyword) = filter.keyword {
            query
                .push(" and c.content ilike ")
                .push_bind(format!("%{keyword}%"));
        }
        if let (Some(start), Some(end)) = (filter.start_date, filter.end_date) {
            query
                .push(" and c.created_at::date between ")
                .push_bind(start)
                .push(" and ")
                .push_bind(end);
        }

        query.push(" order by c.created_at desc");

        let rows = query
            .build_query_as::<CommentSummary>()
            .fetch_all(&self.pool)
            .await?;

        return Ok(rows);
    }
}
