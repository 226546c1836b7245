use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use utoipa::ToSchema;

use super::Pool;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum MemberType {
    Undergrad,
    Leave,
    Grad,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Member {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub student_id: String,
    pub college: Option<String>,
    pub department: Option<String>,
    pub grade: Option<i16>,
    pub phone_number: Option<String>,
    pub member_type: Option<MemberType>,
    pub has_paid: bool,
    pub joined_at: NaiveDate,
}

pub struct InsertMember {
    pub id: String,
    pub name: String,
    pub student_id: String,
    pub college: Option<String>,
    pub department: Option<String>,
    pub grade: Option<i16>,
    pub phone_number: Option<String>,
    pub member_type: Option<MemberType>,
    pub has_paid: bool,
    pub joined_at: NaiveDate,
}

const MEMBER_COLUMNS: &str = "id, user_id, name, student_id, college, department, grade, phone_number, member_type, has_paid, joined_at";

#[derive(Clone)]
pub struct Members {
    pool: Pool,
}

impl Members {
    pub(crate) fn new(pool: Pool) -> Self {
        return Self { pool };
    }

    pub async fn insert(&self, user_id: &str, member: &InsertMember) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            insert into members (id, user_id, name, student_id, college, department, grade, phone_number, member_type, has_paid, joined_at)
            values ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(&member.id)
        .bind(user_id)
        .bind(&member.name)
        .bind(&member.student_id)
        .bind(&member.college)
        .bind(&member.department)
        .bind(member.grade)
        .bind(&member.phone_number)
        .bind(member.member_type)
        .bind(member.has_paid)
        .bind(member.joined_at)
        .execute(&self.pool)
        .await?;

        return Ok(());
    }

    pub async fn get_owned(&self, user_id: &str) -> Result<Vec<Member>, sqlx::Error> {
        let rows = sqlx::query_as::<_, Member>(&format!(
            "select {MEMBER_COLUMNS} from members where user_id = $1 order by joined_at desc, id desc"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        return Ok(rows);
    }

    pub async fn get_one_owned(
        &self,
        user_id: &str,
        id: &str,
    ) -> Result<Option<Member>, sqlx::Error> {
        let row = sqlx::query_as::<_, Member>(&format!(
            "select {MEMBER_COLUMNS} from members where id = $1 and user_id = $2 limit 1"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        return Ok(row);
    }

    pub async fn get_by_student_id(
        &self,
        user_id: &str,
        student_id: &str,
    ) -> Result<Option<Member>, sqlx::Error> {
        let row = sqlx::query_as::<_, Member>(&format!(
            "select {MEMBER_COLUMNS} from members where user_id = $1 and student_id = $2 limit 1"
        ))
        .bind(user_id)
        .bind(student_id)
        .fetch_optional(&self.pool)
        .await?;

        return Ok(row);
    }

    pub async fn update(&self, member: &Member) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            update members
            set name = $2, college = $3, department = $4, grade = $5, phone_number = $6,
                member_type = $7, has_paid = $8, joined_at = $9
            where id = $1
            "#,
        )
        .bind(&member.id)
        .bind(&member.name)
        .bind(&member.college)
        .bind(&member.department)
        .bind(member.grade)
        .bind(&member.phone_number)
        .bind(member.member_type)
        .bind(member.has_paid)
        .bind(member.joined_at)
        .execute(&self.pool)
        .await?;

        return Ok(());
    }

    pub async fn set_has_paid(&self, id: &str, has_paid: bool) -> Result<(), sqlx::Error> {
        sqlx::query("update members set has_paid = $2 where id = $1")
            .bind(id)
            .bind(has_paid)
            .execute(&self.pool)
            .await?;

        return Ok(());
    }

    pub async fn delete(&self, user_id: &str, id: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("delete from members where id = $1 and user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        return Ok(result.rows_affected());
    }
}
