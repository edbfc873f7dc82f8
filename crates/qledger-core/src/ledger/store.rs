//! Persisted master partitions.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::PersistenceError;
use crate::models::record::LedgerRecord;
use crate::models::table::RecordTable;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, PersistenceError>;

/// Tabular sink/source of records keyed by partition name.
pub trait MasterStore {
    /// Read a whole partition. `None` when it has never been written.
    fn load<R: LedgerRecord>(&self, partition: &str) -> Result<Option<RecordTable<R>>>;

    /// Replace a whole partition.
    fn save<R: LedgerRecord>(&self, partition: &str, table: &RecordTable<R>) -> Result<()>;
}

/// Master store keeping one CSV file per partition in a directory.
#[derive(Debug, Clone)]
pub struct CsvMasterStore {
    dir: PathBuf,
}

impl CsvMasterStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing a partition.
    pub fn partition_path(&self, partition: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", partition))
    }
}

impl MasterStore for CsvMasterStore {
    fn load<R: LedgerRecord>(&self, partition: &str) -> Result<Option<RecordTable<R>>> {
        let path = self.partition_path(partition);
        if !path.exists() {
            debug!("No master partition at {}", path.display());
            return Ok(None);
        }

        let mut reader = csv::Reader::from_path(&path).map_err(|source| PersistenceError::Read {
            path: path.clone(),
            source,
        })?;

        let mut rows = Vec::new();
        for (i, row) in reader.deserialize::<R>().enumerate() {
            let row = row.map_err(|e| PersistenceError::MalformedRow {
                path: path.clone(),
                row: i + 1,
                reason: e.to_string(),
            })?;
            rows.push(row);
        }

        debug!("Loaded {} rows from {}", rows.len(), path.display());
        Ok(Some(RecordTable::from(rows)))
    }

    fn save<R: LedgerRecord>(&self, partition: &str, table: &RecordTable<R>) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.partition_path(partition);
        let write_err = |reason: String| PersistenceError::Write {
            path: path.clone(),
            reason,
        };

        // Written next to the target, then renamed over it.
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        {
            let mut writer = csv::Writer::from_writer(tmp.as_file_mut());
            write_table(&mut writer, table).map_err(|e| write_err(e.to_string()))?;
            writer.flush()?;
        }
        tmp.as_file_mut().flush()?;
        tmp.persist(&path).map_err(|e| write_err(e.to_string()))?;

        debug!("Wrote {} rows to {}", table.len(), path.display());
        Ok(())
    }
}

/// Write the header row and every record of `table`.
///
/// The header is written even for an empty table.
pub fn write_table<W: Write, R: LedgerRecord>(
    writer: &mut csv::Writer<W>,
    table: &RecordTable<R>,
) -> csv::Result<()> {
    if table.is_empty() {
        writer.write_record(R::COLUMNS)?;
    }
    for row in table.rows() {
        writer.serialize(row)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::{PartItem, QuoteItem, UnitOfMeasure};
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn quote_item(number: &str) -> QuoteItem {
        QuoteItem {
            item_number: number.into(),
            description: "Valve, brass".into(),
            category: "Hardware".into(),
            quantity: 10,
            net_price: Decimal::from_str("1200.50").unwrap(),
            amount: Decimal::from_str("12005.00").unwrap(),
            quotation_date: String::new(),
            source_file: "q1.pdf".into(),
        }
    }

    #[test]
    fn test_missing_partition_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvMasterStore::new(dir.path());

        let loaded: Option<RecordTable<QuoteItem>> = store.load("variant-a").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvMasterStore::new(dir.path().join("nested"));
        let table: RecordTable<QuoteItem> = vec![quote_item("X1"), quote_item("X2")].into();

        store.save("variant-a", &table).unwrap();
        let loaded: RecordTable<QuoteItem> = store.load("variant-a").unwrap().unwrap();

        assert_eq!(loaded.rows(), table.rows());
    }

    #[test]
    fn test_header_follows_column_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvMasterStore::new(dir.path());
        let table: RecordTable<QuoteItem> = vec![quote_item("X1")].into();

        store.save("variant-a", &table).unwrap();
        let content = fs::read_to_string(store.partition_path("variant-a")).unwrap();
        let header = content.lines().next().unwrap();

        assert_eq!(header, QuoteItem::COLUMNS.join(","));
    }

    #[test]
    fn test_blank_fields_round_trip_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvMasterStore::new(dir.path());
        let row = PartItem {
            quantity: None,
            unit_price: Some(Decimal::from_str("45.10").unwrap()),
            unit: None,
            description: "Bolt".into(),
            extension: None,
            item_number: String::new(),
            part_number: "ABC-123".into(),
            quotation_date: "3/7/2024".into(),
            source_file: "b.pdf".into(),
        };
        let mut complete = row.clone();
        complete.unit = Some(UnitOfMeasure::Set);
        let table: RecordTable<PartItem> = vec![row, complete].into();

        store.save("variant-b", &table).unwrap();
        let loaded: RecordTable<PartItem> = store.load("variant-b").unwrap().unwrap();

        assert_eq!(loaded.rows(), table.rows());
    }

    #[test]
    fn test_malformed_row_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvMasterStore::new(dir.path());
        fs::write(
            store.partition_path("variant-a"),
            format!("{}\nX1,Desc,Cat,lots,1.00,1.00,,a.pdf\n", QuoteItem::COLUMNS.join(",")),
        )
        .unwrap();

        let result: Result<Option<RecordTable<QuoteItem>>> = store.load("variant-a");
        assert!(matches!(result, Err(PersistenceError::MalformedRow { row: 1, .. })));
    }

    #[test]
    fn test_empty_table_writes_header() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvMasterStore::new(dir.path());

        store.save("variant-b", &RecordTable::<PartItem>::new()).unwrap();
        let loaded: RecordTable<PartItem> = store.load("variant-b").unwrap().unwrap();

        assert!(loaded.is_empty());
    }
}
