//! Spreadsheet workbook import using calamine.
//!
//! Reads a sheet whose first row holds the partition's column headers, as an
//! existing master workbook would, into a record table.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use csv::StringRecord;
use tracing::debug;

use crate::error::PersistenceError;
use crate::models::record::LedgerRecord;
use crate::models::table::RecordTable;

/// Read one sheet of an xlsx/xls/ods workbook. Uses the first sheet when `sheet` is `None`.
pub fn read_sheet<R: LedgerRecord>(
    path: &Path,
    sheet: Option<&str>,
) -> Result<RecordTable<R>, PersistenceError> {
    let mut workbook = open_workbook_auto(path).map_err(|e| {
        PersistenceError::Workbook(format!("failed to open {}: {e}", path.display()))
    })?;

    let sheet_name = match sheet {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| PersistenceError::Workbook(format!("{} has no sheets", path.display())))?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| PersistenceError::Workbook(format!("sheet '{sheet_name}' not readable: {e}")))?;

    let mut rows = range.rows();
    let headers = match rows.next() {
        Some(cells) => to_record(cells),
        None => return Ok(RecordTable::new()),
    };

    let mut records = Vec::new();
    for (i, cells) in rows.enumerate() {
        let record = to_record(cells);
        if record.iter().all(str::is_empty) {
            continue;
        }

        let row: R = record.deserialize(Some(&headers)).map_err(|e| {
            PersistenceError::Workbook(format!("sheet '{sheet_name}' row {}: {e}", i + 2))
        })?;
        records.push(row);
    }

    debug!("Read {} rows from sheet '{}' of {}", records.len(), sheet_name, path.display());
    Ok(RecordTable::from(records))
}

fn to_record(cells: &[Data]) -> StringRecord {
    cells.iter().map(cell_as_string).collect()
}

fn cell_as_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::QuoteItem;

    #[test]
    fn test_cell_as_string() {
        assert_eq!(cell_as_string(&Data::Empty), "");
        assert_eq!(cell_as_string(&Data::String(" X1 ".into())), "X1");
        assert_eq!(cell_as_string(&Data::Float(10.0)), "10");
        assert_eq!(cell_as_string(&Data::Float(1200.5)), "1200.5");
        assert_eq!(cell_as_string(&Data::Int(7)), "7");
    }

    #[test]
    fn test_missing_workbook_is_an_error() {
        let result = read_sheet::<QuoteItem>(Path::new("does-not-exist.xlsx"), None);
        assert!(matches!(result, Err(PersistenceError::Workbook(_))));
    }

    #[test]
    fn test_row_deserializes_by_header_name() {
        // Same mapping read_sheet applies to each worksheet row.
        let headers: StringRecord = [
            "Source File", "Item Number", "Item Description", "Category",
            "Quantity", "Net Price", "Amount",
        ]
        .iter()
        .collect();
        let cells = [
            Data::String("q1.pdf".into()),
            Data::String("X1".into()),
            Data::String("Valve".into()),
            Data::String("Hardware".into()),
            Data::Float(10.0),
            Data::Float(1200.5),
            Data::Float(12005.0),
        ];

        let row: QuoteItem = to_record(&cells).deserialize(Some(&headers)).unwrap();
        assert_eq!(row.item_number, "X1");
        assert_eq!(row.quantity, 10);
        assert_eq!(row.source_file, "q1.pdf");
        assert_eq!(row.quotation_date, "");
    }
}
