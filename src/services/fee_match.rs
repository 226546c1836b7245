use anyhow::Context;
use chrono::{NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    data::{Data, InsertMember, create_id},
    error::ApiError,
};

/// A fee payment memo: 10-digit student id, at most one whitespace, then a
/// Hangul name of 2+ syllables. Nothing may trail the name.
static FEE_NOTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{10})\s?([가-힣]{2,})$").expect("fee note pattern"));

pub fn parse_fee_note(note: &str) -> Option<(&str, &str)> {
    let captures = FEE_NOTE.captures(note.trim())?;

    return Some((captures.get(1)?.as_str(), captures.get(2)?.as_str()));
}

#[derive(Debug, Default, Serialize, ToSchema)]
pub struct FeeMatchOutput {
    pub matched: u32,
    pub added: u32,
    pub ignored: Vec<String>,
}

/// Reconciles fee payments against the member roster: every income
/// transaction in the window with the exact fee amount either confirms an
/// existing member, registers a new one, or lands in `ignored`.
///
/// `has_paid` only ever moves false → true here; re-running over the same
/// window is safe.
pub async fn match_payments(
    data: &Data,
    user_id: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
    target_amount: i64,
) -> Result<FeeMatchOutput, ApiError> {
    if end_date < start_date {
        return Err(ApiError::BadRequest(
            "start_date must not be after end_date".to_owned(),
        ));
    }

    let transactions = data
        .transactions
        .find_income_in_range(user_id, start_date, end_date, target_amount)
        .await
        .context("error querying payment transactions")?;

    let mut output = FeeMatchOutput::default();

    for tx in &transactions {
        let note = tx.note.as_deref().unwrap_or("");

        let Some((student_id, name)) = parse_fee_note(note) else {
            output.ignored.push(note.trim().to_owned());
            continue;
        };

        // lookup before create: added vs matched depends on which branch ran
        let existing = data
            .members
            .get_by_student_id(user_id, student_id)
            .await
            .context("error looking up member")?;

        match existing {
            Some(member) => {
                output.matched += 1;

                if !member.has_paid {
                    data.members
                        .set_has_paid(&member.id, true)
                        .await
                        .context("error marking member as paid")?;
                }
            }
            None => {
                let member = InsertMember {
                    id: create_id(),
                    name: name.to_owned(),
                    student_id: student_id.to_owned(),
                    college: None,
                    department: None,
                    grade: None,
                    phone_number: None,
                    member_type: None,
                    has_paid: false,
                    joined_at: Utc::now().date_naive(),
                };

                data.members
                    .insert(user_id, &member)
                    .await
                    .context("error registering member")?;
                data.members
                    .set_has_paid(&member.id, true)
                    .await
                    .context("error marking member as paid")?;

                output.added += 1;
            }
        }
    }

    return Ok(output);
}

#[cfg(test)]
mod test {
    use super::parse_fee_note;

    #[test]
    fn id_space_name_matches() {
        assert_eq!(
            parse_fee_note("2021123456 홍길동"),
            Some(("2021123456", "홍길동"))
        );
    }

    #[test]
    fn id_glued_to_name_matches() {
        assert_eq!(
            parse_fee_note("2021123456홍길동"),
            Some(("2021123456", "홍길동"))
        );
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(
            parse_fee_note("  2021123456 홍길동\n"),
            Some(("2021123456", "홍길동"))
        );
    }

    #[test]
    fn nine_digit_id_is_ignored() {
        assert_eq!(parse_fee_note("202112345 홍길동"), None);
    }

    #[test]
    fn eleven_digit_id_is_ignored() {
        assert_eq!(parse_fee_note("20211234567 홍길동"), None);
    }

    #[test]
    fn single_syllable_name_is_ignored() {
        assert_eq!(parse_fee_note("2021123456홍"), None);
    }

    #[test]
    fn trailing_text_is_ignored() {
        assert_eq!(parse_fee_note("2021123456 홍길동 회비"), None);
        assert_eq!(parse_fee_note("2021123456 홍길동abc"), None);
    }

    #[test]
    fn plain_memos_are_ignored() {
        assert_eq!(parse_fee_note(""), None);
        assert_eq!(parse_fee_note("3월 회식비"), None);
    }
}
