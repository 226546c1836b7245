use chrono::{DateTime, Utc};
use sqlx::prelude::FromRow;

use super::Pool;

#[derive(Clone)]
pub struct Sessions {
    pool: Pool,
}

impl Sessions {
    pub(crate) fn new(pool: Pool) -> Self {
        return Self { pool };
    }

    pub async fn get_one(
        &self,
        user_id: &str,
        session_id: &str,
    ) -> Result<Option<Session>, sqlx::Error> {
        let session = sqlx::query_as::<_, Session>(
            "select id, user_id, created_at, updated_at from sessions where id = $1 and user_id = $2 limit 1;",
        )
        .bind(session_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        return Ok(session);
    }

    pub async fn insert(&self, user_id: &str, session_id: &str) -> Result<(), sqlx::Error> {
        sqlx::query(
            "insert into sessions (id, user_id, created_at, updated_at) values ($1, $2, $3, $4)",
        )
        .bind(session_id)
        .bind(user_id)
        .bind(Utc::now())
        .bind(None::<DateTime<Utc>>)
        .execute(&self.pool)
        .await?;

        return Ok(());
    }
}

#[derive(Debug, FromRow)]
pub struct Session {
    pub id: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}
