use chrono::NaiveDate;

use crate::data::TxKind;

pub mod banks;

mod xlsx;
pub use xlsx::decode;

/// One bank-statement row in the common shape every bank format is reduced
/// to. `amount` is the absolute value; the sign lives in `kind`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRow {
    pub date: NaiveDate,
    pub title: String,
    pub note: String,
    pub amount: i64,
    pub kind: TxKind,
}

/// Rows the normalizer produced, plus how many source rows it dropped
/// (unparseable amount or date, or a zero amount). Dropped rows never fail
/// the upload and are never reported as duplicates.
#[derive(Debug, Default)]
pub struct DecodedStatement {
    pub rows: Vec<NormalizedRow>,
    pub omitted: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum StatementError {
    #[error("unsupported bank: {0}")]
    UnsupportedBank(String),

    #[error("{0} statements must be .xlsx files")]
    UnsupportedFileType(&'static str),

    #[error("statement is missing the {0} column")]
    MissingColumn(&'static str),

    #[error("error reading workbook: {0}")]
    Workbook(#[from] calamine::XlsxError),

    #[error("workbook has no sheets")]
    EmptyWorkbook,
}
