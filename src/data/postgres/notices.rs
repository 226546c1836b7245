use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::prelude::FromRow;
use utoipa::ToSchema;

use super::Pool;

#[derive(Debug, Serialize, ToSchema)]
pub struct Notice {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author_id: Option<String>,
    pub author_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub attachments: Vec<NoticeAttachment>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NoticeAttachment {
    pub id: String,
    pub file_path: String,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct NoticeRow {
    id: String,
    title: String,
    content: String,
    author_id: Option<String>,
    author_name: Option<String>,
    created_at: DateTime<Utc>,

    att_id: Option<String>,
    att_file_path: Option<String>,
    att_uploaded_at: Option<DateTime<Utc>>,
}

const NOTICE_QUERY: &str = r#"
select n.id, n.title, n.content, n.author_id, u.username as author_name, n.created_at,
       a.id as att_id, a.file_path as att_file_path, a.uploaded_at as att_uploaded_at
from notices n
left join users u on u.id = n.author_id
left join notice_attachments a on a.notice_id = n.id
"#;

fn fold_rows(rows: Vec<NoticeRow>) -> Vec<Notice> {
    let mut order: Vec<String> = Vec::new();
    let mut by_id: HashMap<String, Notice> = HashMap::new();

    for row in rows {
        let notice = by_id.entry(row.id.clone()).or_insert_with(|| {
            order.push(row.id.clone());
            Notice {
                id: row.id.clone(),
                title: row.title.clone(),
                content: row.content.clone(),
                author_id: row.author_id.clone(),
                author_name: row.author_name.clone(),
                created_at: row.created_at,
                attachments: vec![],
            }
        });

        if let Some(att_id) = row.att_id {
            notice.attachments.push(NoticeAttachment {
                id: att_id,
                file_path: row.att_file_path.expect("checked att_file_path"),
                uploaded_at: row.att_uploaded_at.expect("checked att_uploaded_at"),
            });
        }
    }

    return order
        .into_iter()
        .map(|id| by_id.remove(&id).expect("folded notice"))
        .collect();
}

#[derive(Clone)]
pub struct Notices {
    pool: Pool,
}

impl Notices {
    pub(crate) fn new(pool: Pool) -> Self {
        return Self { pool };
    }

    pub async fn insert(
        &self,
        id: &str,
        title: &str,
        content: &str,
        author_id: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "insert into notices (id, title, content, author_id, created_at) values ($1, $2, $3, $4, $5)",
        )
        .bind(id)
        .bind(title)
        .bind(content)
        .bind(author_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        return Ok(());
    }

    pub async fn insert_attachment(
        &self,
        id: &str,
        notice_id: &str,
        file_path: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "insert into notice_attachments (id, notice_id, file_path, uploaded_at) values ($1, $2, $3, $4)",
        )
        .bind(id)
        .bind(notice_id)
        .bind(file_path)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        return Ok(());
    }

    pub async fn get_all(&self) -> Result<Vec<Notice>, sqlx::Error> {
        let rows = sqlx::query_as::<_, NoticeRow>(&format!(
            "{NOTICE_QUERY} order by n.created_at desc, a.uploaded_at"
        ))
        .fetch_all(&self.pool)
        .await?;

        return Ok(fold_rows(rows));
    }

    pub async fn get_one(&self, id: &str) -> Result<Option<Notice>, sqlx::Error> {
        let rows = sqlx::query_as::<_, NoticeRow>(&format!(
            "{NOTICE_QUERY} where n.id = $1 order by a.uploaded_at"
        ))
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        return Ok(fold_rows(rows).into_iter().next());
    }

    pub async fn update(&self, id: &str, title: &str, content: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("update notices set title = $2, content = $3 where id = $1")
            .bind(id)
            .bind(title)
            .bind(content)
            .execute(&self.pool)
            .await?;

        return Ok(result.rows_affected());
    }

    pub async fn delete(&self, id: &str) -> Result<Vec<String>, sqlx::Error> {
        let paths = sqlx::query_scalar::<_, String>(
            "select file_path from notice_attachments where notice_id = $1",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        sqlx::query("delete from notices where id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        return Ok(paths);
    }

    pub async fn exists_created_after(
        &self,
        seen_at: DateTime<Utc>,
    ) -> Result<bool, sqlx::Error> {
        let exists = sqlx::query_scalar::<_, bool>(
            "select exists(select 1 from notices where created_at > $1)",
        )
        .bind(seen_at)
        .fetch_one(&self.pool)
        .await?;

        return Ok(exists);
    }
}
