//! CSV export of cached transactions.
//!
//! The header row is written bare; every data cell is quoted, with embedded
//! quotes doubled, so free-text descriptions survive a round trip through
//! spreadsheet tools.

use std::io::Write;

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::error::Result;
use crate::models::Transaction;

/// Header row of the export.
pub const CSV_HEADER: &str = "ID,Date,Amount,Type,Category,Description,Raw Text";

/// Suggested file name for the export.
pub const EXPORT_FILE_NAME: &str = "finsmart_transactions.csv";

/// Writes `transactions` as CSV to `writer` and returns the number of data
/// rows written.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
pub fn write_transactions_csv<W: Write>(mut writer: W, transactions: &[Transaction]) -> Result<usize> {
    writer
        .write_all(CSV_HEADER.as_bytes())
        .and_then(|()| writer.write_all(b"\n"))
        .map_err(csv::Error::from)?;

    let mut csv_writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    let mut count = 0_usize;
    for tx in transactions {
        csv_writer.write_record([
            tx.id.to_string(),
            tx.date.to_string(),
            tx.amount.to_string(),
            tx.kind.as_str().to_owned(),
            tx.category.clone().unwrap_or_default(),
            tx.description.clone().unwrap_or_default(),
            tx.raw_text.clone(),
        ])?;
        count += 1;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    tracing::debug!(rows = count, "exported transactions as CSV");
    Ok(count)
}

/// Renders `transactions` as a CSV document.
///
/// # Errors
///
/// Returns an error if CSV encoding fails.
pub fn transactions_to_csv(transactions: &[Transaction]) -> Result<String> {
    let mut buffer = Vec::new();
    let _rows = write_transactions_csv(&mut buffer, transactions)?;
    String::from_utf8(buffer).map_err(|err| {
        csv::Error::from(std::io::Error::new(std::io::ErrorKind::InvalidData, err)).into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NaiveDate, TransactionId, TransactionKind};

    fn tx(id: i64, description: Option<&str>) -> Transaction {
        Transaction {
            id: TransactionId::new(id),
            kind: TransactionKind::Debit,
            amount: 50.0,
            category: Some("Transport".to_owned()),
            description: description.map(str::to_owned),
            date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            raw_text: "Uber ride".to_owned(),
        }
    }

    #[test]
    fn empty_list_is_header_only() {
        let csv = transactions_to_csv(&[]).unwrap();
        assert_eq!(csv, format!("{CSV_HEADER}\n"));
    }

    #[test]
    fn row_cells_are_quoted() {
        let csv = transactions_to_csv(&[tx(7, Some("Ride"))]).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some(CSV_HEADER));
        assert_eq!(
            lines.next(),
            Some(r#""7","2024-01-05","50","DEBIT","Transport","Ride","Uber ride""#)
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        let csv = transactions_to_csv(&[tx(1, Some(r#"The "big" one"#))]).unwrap();
        assert!(csv.contains(r#""The ""big"" one""#));
    }

    #[test]
    fn missing_fields_are_empty_cells() {
        let mut row = tx(2, None);
        row.category = None;
        let csv = transactions_to_csv(&[row]).unwrap();
        assert!(csv.contains(r#""DEBIT","","","Uber ride""#));
    }

    #[test]
    fn writer_reports_row_count() {
        let mut out = Vec::new();
        let rows = write_transactions_csv(&mut out, &[tx(1, None), tx(2, None)]).unwrap();
        assert_eq!(rows, 2);
    }
}
