use std::io::Cursor;

use calamine::{Data, DataType, Reader, Xlsx};
use chrono::{NaiveDate, NaiveDateTime};

use super::{DecodedStatement, NormalizedRow, StatementError, banks::BankFormat};
use crate::data::TxKind;

#[derive(Debug)]
struct ColumnMap {
    date: usize,
    note: usize,
    amount: usize,
    title: usize,
}

/// Reads the first sheet of an `.xlsx` export and reduces it to normalized
/// rows. The rows above the bank's header row are skipped unseen; columns
/// are located by header text so column order does not matter.
pub fn decode(bank: &BankFormat, bytes: &[u8]) -> Result<DecodedStatement, StatementError> {
    let mut workbook = Xlsx::new(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(StatementError::EmptyWorkbook)??;

    let mut rows = range.rows().skip(bank.skip_rows);
    let header = rows
        .next()
        .ok_or(StatementError::MissingColumn(bank.date_header))?;
    let columns = locate_columns(bank, header)?;

    let mut decoded = DecodedStatement::default();
    for cells in rows {
        match normalize_row(cells, &columns) {
            Some(row) => decoded.rows.push(row),
            None => decoded.omitted += 1,
        }
    }

    return Ok(decoded);
}

fn locate_columns(bank: &BankFormat, header: &[Data]) -> Result<ColumnMap, StatementError> {
    let find = |name: &'static str| {
        header
            .iter()
            .position(|cell| cell_text(cell).trim() == name)
            .ok_or(StatementError::MissingColumn(name))
    };

    return Ok(ColumnMap {
        date: find(bank.date_header)?,
        note: find(bank.note_header)?,
        amount: find(bank.amount_header)?,
        title: find(bank.title_header)?,
    });
}

/// One source row to at most one normalized row. Returns None for rows that
/// must be dropped: zero amounts, and amounts or dates that do not parse.
fn normalize_row(cells: &[Data], columns: &ColumnMap) -> Option<NormalizedRow> {
    let signed = parse_amount(cells.get(columns.amount)?)?;
    if signed == 0 {
        return None;
    }

    let date = parse_date(cells.get(columns.date)?)?;

    let kind = if signed > 0 {
        TxKind::Income
    } else {
        TxKind::Expense
    };

    return Some(NormalizedRow {
        date,
        title: cell_text(cells.get(columns.title)?),
        note: cell_text(cells.get(columns.note)?),
        amount: signed.abs(),
        kind,
    });
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(text) => text.clone(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

fn parse_amount(cell: &Data) -> Option<i64> {
    match cell {
        Data::Int(value) => Some(*value),
        Data::Float(value) => Some(*value as i64),
        Data::String(text) => text.replace(',', "").trim().parse().ok(),
        _ => None,
    }
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y.%m.%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y.%m.%d"];

fn parse_date(cell: &Data) -> Option<NaiveDate> {
    // native excel datetimes, including serial numbers
    if let Some(datetime) = cell.as_datetime() {
        return Some(datetime.date());
    }

    let text = cell_text(cell);
    let text = text.trim();

    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(text, format) {
            return Some(datetime.date());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date);
        }
    }

    return None;
}

#[cfg(test)]
mod test {
    use calamine::Data;
    use chrono::NaiveDate;

    use super::{ColumnMap, locate_columns, normalize_row, parse_date};
    use crate::{
        data::TxKind,
        statement_parsing::{StatementError, banks},
    };

    const COLUMNS: ColumnMap = ColumnMap {
        date: 0,
        note: 1,
        amount: 2,
        title: 3,
    };

    fn row(date: &str, note: &str, amount: &str, title: &str) -> Vec<Data> {
        return vec![
            Data::String(date.to_owned()),
            Data::String(note.to_owned()),
            Data::String(amount.to_owned()),
            Data::String(title.to_owned()),
        ];
    }

    #[test]
    fn positive_amount_becomes_income() {
        let cells = row("2024-03-04 12:30:00", "회비 입금", "1,000", "입금");
        let normalized = normalize_row(&cells, &COLUMNS).unwrap();

        assert_eq!(normalized.kind, TxKind::Income);
        assert_eq!(normalized.amount, 1000);
        assert_eq!(normalized.date, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        assert_eq!(normalized.note, "회비 입금");
        assert_eq!(normalized.title, "입금");
    }

    #[test]
    fn negative_amount_becomes_expense() {
        let cells = row("2024-03-04 12:30:00", "회식", "-500", "출금");
        let normalized = normalize_row(&cells, &COLUMNS).unwrap();

        assert_eq!(normalized.kind, TxKind::Expense);
        assert_eq!(normalized.amount, 500);
    }

    #[test]
    fn zero_amount_is_dropped() {
        let cells = row("2024-03-04 12:30:00", "메모", "0", "입금");
        assert!(normalize_row(&cells, &COLUMNS).is_none());
    }

    #[test]
    fn unparseable_amount_is_dropped() {
        let cells = row("2024-03-04 12:30:00", "메모", "천원", "입금");
        assert!(normalize_row(&cells, &COLUMNS).is_none());
    }

    #[test]
    fn unparseable_date_is_dropped() {
        let cells = row("언젠가", "메모", "1000", "입금");
        assert!(normalize_row(&cells, &COLUMNS).is_none());
    }

    #[test]
    fn numeric_amount_cells_parse() {
        let cells = vec![
            Data::String("2024-03-04".to_owned()),
            Data::Empty,
            Data::Float(-12000.0),
            Data::String("출금".to_owned()),
        ];
        let normalized = normalize_row(&cells, &COLUMNS).unwrap();

        assert_eq!(normalized.kind, TxKind::Expense);
        assert_eq!(normalized.amount, 12000);
        assert_eq!(normalized.note, "");
    }

    #[test]
    fn date_only_strings_parse() {
        let date = parse_date(&Data::String("2024.03.04".to_owned())).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
    }

    #[test]
    fn header_lookup_reports_missing_columns() {
        let bank = banks::lookup("kakaobank").unwrap();

        let header = row("거래일시", "내용", "거래금액", "거래구분");
        assert!(locate_columns(bank, &header).is_ok());

        let header = row("거래일시", "내용", "거래금액", "다른이름");
        match locate_columns(bank, &header) {
            Err(StatementError::MissingColumn(column)) => assert_eq!(column, "거래구분"),
            other => panic!("expected missing column, got {other:?}"),
        }
    }
}
