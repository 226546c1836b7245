use anyhow::Context;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    data::{Data, InsertTransaction, create_id},
    error::ApiError,
    statement_parsing::{self, StatementError, banks, banks::BankFormat},
};

/// What happened to one normalized row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    Inserted,
    Skipped,
    Omitted,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub inserted: u32,
    pub skipped: u32,
    pub omitted: u32,
}

impl IngestReport {
    pub fn tally(&mut self, outcome: RowOutcome) {
        match outcome {
            RowOutcome::Inserted => self.inserted += 1,
            RowOutcome::Skipped => self.skipped += 1,
            RowOutcome::Omitted => self.omitted += 1,
        }
    }

    /// Omitted rows are logged, not reported; the message only covers rows
    /// that reached the ledger decision.
    pub fn message(&self) -> String {
        return format!(
            "업로드 완료: {inserted}건 저장, {skipped}건 중복 건너뜀",
            inserted = self.inserted,
            skipped = self.skipped
        );
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct IngestOutput {
    pub inserted: u32,
    pub skipped: u32,
    pub message: String,
}

impl From<StatementError> for ApiError {
    fn from(err: StatementError) -> Self {
        return ApiError::BadRequest(err.to_string());
    }
}

fn resolve_bank(bank_id: &str, file_name: &str) -> Result<&'static BankFormat, StatementError> {
    let bank = banks::lookup(bank_id)
        .ok_or_else(|| StatementError::UnsupportedBank(bank_id.to_owned()))?;

    if !file_name.ends_with(".xlsx") {
        return Err(StatementError::UnsupportedFileType(bank.label));
    }

    return Ok(bank);
}

/// Runs one uploaded statement through normalize → dedupe → insert. Each
/// row is decided on its own; a malformed row or a duplicate never aborts
/// the rest of the file, and nothing is rolled back on the way.
pub async fn ingest(
    data: &Data,
    user_id: &str,
    bank_id: &str,
    file_name: &str,
    bytes: &[u8],
) -> Result<IngestOutput, ApiError> {
    let bank = resolve_bank(bank_id, file_name)?;
    let decoded = statement_parsing::decode(bank, bytes)?;

    let mut report = IngestReport::default();
    report.omitted = decoded.omitted;

    for row in decoded.rows {
        let duplicate = data
            .transactions
            .exists_matching(
                user_id,
                row.kind,
                &row.title,
                Some(row.note.as_str()),
                row.date,
                row.amount,
            )
            .await
            .context("error checking for duplicate")?;

        if duplicate {
            report.tally(RowOutcome::Skipped);
            continue;
        }

        data.transactions
            .insert(
                user_id,
                &InsertTransaction {
                    id: create_id(),
                    kind: row.kind,
                    title: row.title,
                    amount: row.amount,
                    date: row.date,
                    note: Some(row.note),
                    description: String::new(),
                    has_receipt: false,
                },
            )
            .await
            .context("error inserting transaction")?;

        report.tally(RowOutcome::Inserted);
    }

    if report.omitted > 0 {
        tracing::warn!(
            omitted = report.omitted,
            bank = bank.id,
            "dropped unparseable or zero-amount statement rows"
        );
    }

    return Ok(IngestOutput {
        inserted: report.inserted,
        skipped: report.skipped,
        message: report.message(),
    });
}

#[cfg(test)]
mod test {
    use super::{IngestReport, RowOutcome, resolve_bank};
    use crate::statement_parsing::StatementError;

    #[test]
    fn report_tallies_each_outcome_separately() {
        let mut report = IngestReport::default();
        for outcome in [
            RowOutcome::Inserted,
            RowOutcome::Inserted,
            RowOutcome::Skipped,
            RowOutcome::Omitted,
        ] {
            report.tally(outcome);
        }

        assert_eq!(
            report,
            IngestReport {
                inserted: 2,
                skipped: 1,
                omitted: 1,
            }
        );
        assert_eq!(report.message(), "업로드 완료: 2건 저장, 1건 중복 건너뜀");
    }

    #[test]
    fn unknown_bank_is_rejected() {
        match resolve_bank("unknownbank", "statement.xlsx") {
            Err(StatementError::UnsupportedBank(id)) => assert_eq!(id, "unknownbank"),
            other => panic!("expected unsupported bank, got {other:?}"),
        }
    }

    #[test]
    fn wrong_file_extension_is_rejected() {
        assert!(matches!(
            resolve_bank("kakaobank", "statement.csv"),
            Err(StatementError::UnsupportedFileType(_))
        ));
        assert!(resolve_bank("tossbank", "statement.xlsx").is_ok());
    }
}
