use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use utoipa::ToSchema;

use super::Pool;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum TxKind {
    Income,
    Expense,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum ReviewStatus {
    NotReviewed,
    InProgress,
    Completed,
}

impl ReviewStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "not_reviewed" => Some(Self::NotReviewed),
            "in_progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub kind: TxKind,
    pub title: String,
    pub amount: i64,
    pub date: NaiveDate,
    pub note: Option<String>,
    pub description: String,
    pub has_receipt: bool,
    pub review_status: ReviewStatus,
    pub created_at: DateTime<Utc>,
}

pub struct InsertTransaction {
    pub id: String,
    pub kind: TxKind,
    pub title: String,
    pub amount: i64,
    pub date: NaiveDate,
    pub note: Option<String>,
    pub description: String,
    pub has_receipt: bool,
}

pub struct UpdateTransaction<'a> {
    pub title: &'a str,
    pub amount: i64,
    pub date: NaiveDate,
    pub note: Option<&'a str>,
    pub description: &'a str,
}

/// A transaction with its club account, for the audit views.
#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct AuditTransaction {
    pub id: String,
    pub username: String,
    pub club_name: Option<String>,
    pub kind: TxKind,
    pub title: String,
    pub amount: i64,
    pub date: NaiveDate,
    pub note: Option<String>,
    pub has_receipt: bool,
    pub review_status: ReviewStatus,
}

#[derive(Debug, FromRow)]
pub struct ReviewCounts {
    pub total: i64,
    pub completed: i64,
    pub in_progress: i64,
    pub not_reviewed: i64,
}

#[derive(Debug, FromRow)]
pub struct ClubReviewCounts {
    pub club: String,
    pub total: i64,
    pub completed: i64,
    pub in_progress: i64,
    pub not_reviewed: i64,
}

#[derive(Debug, FromRow)]
pub struct ClubActivity {
    pub user_id: String,
    pub total: i64,
    pub expenses: i64,
    pub receipted: i64,
}

#[derive(Debug, FromRow)]
pub struct MonthlyAmount {
    pub month: String,
    pub kind: TxKind,
    pub total: i64,
}

const TX_COLUMNS: &str = "id, user_id, kind, title, amount, date, note, description, has_receipt, review_status, created_at";

#[derive(Clone)]
pub struct Transactions {
    pool: Pool,
}

impl Transactions {
    pub(crate) fn new(pool: Pool) -> Self {
        return Self { pool };
    }

    pub async fn insert(
        &self,
        user_id: &str,
        tx: &InsertTransaction,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            insert into transactions (id, user_id, kind, title, amount, date, note, description, has_receipt, created_at)
            values ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(&tx.id)
        .bind(user_id)
        .bind(tx.kind)
        .bind(&tx.title)
        .bind(tx.amount)
        .bind(tx.date)
        .bind(&tx.note)
        .bind(&tx.description)
        .bind(tx.has_receipt)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        return Ok(());
    }

    pub async fn get_owned(&self, user_id: &str) -> Result<Vec<Transaction>, sqlx::Error> {
        let rows = sqlx::query_as::<_, Transaction>(&format!(
            "select {TX_COLUMNS} from transactions where user_id = $1 order by date desc, created_at desc"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        return Ok(rows);
    }

    pub async fn get_one(&self, id: &str) -> Result<Option<Transaction>, sqlx::Error> {
        let row = sqlx::query_as::<_, Transaction>(&format!(
            "select {TX_COLUMNS} from transactions where id = $1 limit 1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        return Ok(row);
    }

    pub async fn get_one_owned(
        &self,
        user_id: &str,
        id: &str,
    ) -> Result<Option<Transaction>, sqlx::Error> {
        let row = sqlx::query_as::<_, Transaction>(&format!(
            "select {TX_COLUMNS} from transactions where id = $1 and user_id = $2 limit 1"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        return Ok(row);
    }

    pub async fn update_details(
        &self,
        user_id: &str,
        id: &str,
        tx: &UpdateTransaction<'_>,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            update transactions
            set title = $3, amount = $4, date = $5, note = $6, description = $7
            where id = $1 and user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(tx.title)
        .bind(tx.amount)
        .bind(tx.date)
        .bind(tx.note)
        .bind(tx.description)
        .execute(&self.pool)
        .await?;

        return Ok(result.rows_affected());
    }

    pub async fn delete(&self, user_id: &str, id: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("delete from transactions where id = $1 and user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        return Ok(result.rows_affected());
    }

    pub async fn set_review_status(
        &self,
        id: &str,
        status: ReviewStatus,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("update transactions set review_status = $2 where id = $1")
            .bind(id)
            .bind(status)
            .execute(&self.pool)
            .await?;

        return Ok(result.rows_affected());
    }

    pub async fn set_has_receipt(&self, id: &str, has_receipt: bool) -> Result<(), sqlx::Error> {
        sqlx::query("update transactions set has_receipt = $2 where id = $1")
            .bind(id)
            .bind(has_receipt)
            .execute(&self.pool)
            .await?;

        return Ok(());
    }

    /// The five-field identity check behind statement deduplication. Exact
    /// match only; `is not distinct from` keeps null notes comparable.
    pub async fn exists_matching(
        &self,
        user_id: &str,
        kind: TxKind,
        title: &str,
        note: Option<&str>,
        date: NaiveDate,
        amount: i64,
    ) -> Result<bool, sqlx::Error> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            select exists(
                select 1 from transactions
                where user_id = $1
                  and kind = $2
                  and title = $3
                  and note is not distinct from $4
                  and date = $5
                  and amount = $6
            )
            "#,
        )
        .bind(user_id)
        .bind(kind)
        .bind(title)
        .bind(note)
        .bind(date)
        .bind(amount)
        .fetch_one(&self.pool)
        .await?;

        return Ok(exists);
    }

    pub async fn find_income_in_range(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
        amount: i64,
    ) -> Result<Vec<Transaction>, sqlx::Error> {
        let rows = sqlx::query_as::<_, Transaction>(&format!(
            r#"
            select {TX_COLUMNS} from transactions
            where user_id = $1 and kind = $2 and date between $3 and $4 and amount = $5
            order by date, created_at
            "#
        ))
        .bind(user_id)
        .bind(TxKind::Income)
        .bind(start)
        .bind(end)
        .bind(amount)
        .fetch_all(&self.pool)
        .await?;

        return Ok(rows);
    }

    pub async fn all_with_club(&self) -> Result<Vec<AuditTransaction>, sqlx::Error> {
        let rows = sqlx::query_as::<_, AuditTransaction>(
            r#"
            select t.id, u.username, u.club_name, t.kind, t.title, t.amount, t.date, t.note,
                   t.has_receipt, t.review_status
            from transactions t
            join users u on u.id = t.user_id
            order by t.date desc, t.created_at desc
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        return Ok(rows);
    }

    pub async fn review_counts(&self) -> Result<ReviewCounts, sqlx::Error> {
        let counts = sqlx::query_as::<_, ReviewCounts>(
            r#"
            select count(*) as total,
                   count(*) filter (where review_status = 'completed') as completed,
                   count(*) filter (where review_status = 'in_progress') as in_progress,
                   count(*) filter (where review_status = 'not_reviewed') as not_reviewed
            from transactions
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        return Ok(counts);
    }

    pub async fn review_counts_for_club(
        &self,
        club_name: &str,
    ) -> Result<ReviewCounts, sqlx::Error> {
        let counts = sqlx::query_as::<_, ReviewCounts>(
            r#"
            select count(*) as total,
                   count(*) filter (where t.review_status = 'completed') as completed,
                   count(*) filter (where t.review_status = 'in_progress') as in_progress,
                   count(*) filter (where t.review_status = 'not_reviewed') as not_reviewed
            from transactions t
            join users u on u.id = t.user_id
            where u.club_name = $1
            "#,
        )
        .bind(club_name)
        .fetch_one(&self.pool)
        .await?;

        return Ok(counts);
    }

    pub async fn activity_by_user(&self) -> Result<Vec<ClubActivity>, sqlx::Error> {
        let rows = sqlx::query_as::<_, ClubActivity>(
            r#"
            select t.user_id,
                   count(*) as total,
                   count(*) filter (where t.kind = 'expense') as expenses,
                   count(*) filter (where t.has_receipt) as receipted
            from transactions t
            join users u on u.id = t.user_id
            where u.is_auditor = false
            group by t.user_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        return Ok(rows);
    }

    pub async fn statistics_by_club(&self) -> Result<Vec<ClubReviewCounts>, sqlx::Error> {
        let rows = sqlx::query_as::<_, ClubReviewCounts>(
            r#"
            select coalesce(u.club_name, '미지정') as club,
                   count(*) as total,
                   count(*) filter (where t.review_status = 'completed') as completed,
                   count(*) filter (where t.review_status = 'in_progress') as in_progress,
                   count(*) filter (where t.review_status = 'not_reviewed') as not_reviewed
            from transactions t
            join users u on u.id = t.user_id
            group by u.club_name
            order by club
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        return Ok(rows);
    }

    pub async fn monthly_amounts_for_club(
        &self,
        club_name: &str,
    ) -> Result<Vec<MonthlyAmount>, sqlx::Error> {
        let rows = sqlx::query_as::<_, MonthlyAmount>(
            r#"
            select to_char(date_trunc('month', t.date), 'YYYY-MM') as month,
                   t.kind as kind,
                   sum(t.amount)::bigint as total
            from transactions t
            join users u on u.id = t.user_id
            where u.club_name = $1
            group by month, t.kind
            order by month
            "#,
        )
        .bind(club_name)
        .fetch_all(&self.pool)
        .await?;

        return Ok(rows);
    }
}
