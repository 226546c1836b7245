use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::prelude::FromRow;

use super::{Pool, Session};

#[derive(Clone)]
pub struct Users {
    pool: Pool,
}

impl Users {
    pub(crate) fn new(pool: Pool) -> Self {
        return Self { pool };
    }

    pub async fn get_one(&self, user_id: &str) -> Result<Option<User>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            select id, username, club_name, is_auditor, last_seen_notice, created_at, updated_at
            from users where id = $1 limit 1;
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        return Ok(user);
    }

    pub async fn get_id_by_username(&self, username: &str) -> Result<Option<String>, sqlx::Error> {
        let id: Option<(String,)> =
            sqlx::query_as("select id from users where username = $1 limit 1")
                .bind(username)
                .fetch_optional(&self.pool)
                .await?;

        return Ok(id.map(|row| row.0));
    }

    pub async fn insert_with_session(&self, user: &User, session: &Session) -> Result<()> {
        let mut tx = self.pool.begin().await.context("error starting tx")?;

        sqlx::query(
            r#"
            insert into users (id, username, club_name, is_auditor, created_at, updated_at)
            values ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&user.id)
        .bind(&user.username)
        .bind(&user.club_name)
        .bind(user.is_auditor)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&mut *tx)
        .await
        .context("error inserting user")?;

        sqlx::query("insert into sessions (id, user_id, created_at, updated_at) values ($1, $2, $3, $4)")
            .bind(&session.id)
            .bind(&user.id)
            .bind(session.created_at)
            .bind(session.updated_at)
            .execute(&mut *tx)
            .await
            .context("error inserting session")?;

        tx.commit().await.context("error committing tx")?;

        return Ok(());
    }

    /// Club names of every non-auditor account, for the audit filter lists.
    pub async fn club_names(&self) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(String,)> = sqlx::query_as(
            r#"
            select distinct club_name from users
            where is_auditor = false and club_name is not null and club_name <> ''
            order by club_name;
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        return Ok(rows.into_iter().map(|row| row.0).collect());
    }

    pub async fn count_clubs(&self) -> Result<i64, sqlx::Error> {
        let count: (i64,) =
            sqlx::query_as("select count(*) from users where is_auditor = false")
                .fetch_one(&self.pool)
                .await?;

        return Ok(count.0);
    }

    pub async fn set_last_seen_notice(
        &self,
        user_id: &str,
        seen_at: DateTime<Utc>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("update users set last_seen_notice = $2, updated_at = $3 where id = $1")
            .bind(user_id)
            .bind(seen_at)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        return Ok(());
    }
}

#[derive(Debug, FromRow)]
pub struct User {
    pub id: String,
    pub username: String,
    pub club_name: Option<String>,
    pub is_auditor: bool,
    pub last_seen_notice: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}
