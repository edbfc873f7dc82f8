//! Master ledger consolidation.
//!
//! A master partition is read in full, merged with the session table, deduplicated on
//! the record identity key, and written back in full. There is no locking:
//! one writer per partition at a time is assumed.

mod store;
pub mod workbook;

pub use store::{write_table, CsvMasterStore, MasterStore};

use std::collections::HashSet;

use tracing::info;

use crate::error::PersistenceError;
use crate::models::record::LedgerRecord;
use crate::models::table::RecordTable;

/// Result of merging a session table into a master partition.
#[derive(Debug, Clone)]
pub struct Consolidation<R> {
    /// Merged, deduplicated table.
    pub table: RecordTable<R>,
    /// Rows in the partition before the merge.
    pub persisted_rows: usize,
    /// Merged rows minus persisted rows. Zero or negative is informational.
    pub net_new: i64,
}

/// Merge `incoming` after `persisted`, keeping the first row of each identity key.
///
/// With no persisted table the incoming table is taken as-is.
pub fn consolidate<R: LedgerRecord>(
    persisted: Option<RecordTable<R>>,
    incoming: &RecordTable<R>,
) -> Consolidation<R> {
    let Some(persisted) = persisted else {
        return Consolidation {
            net_new: incoming.len() as i64,
            table: incoming.clone(),
            persisted_rows: 0,
        };
    };

    let persisted_rows = persisted.len();
    let mut seen = HashSet::new();
    let table: RecordTable<R> = persisted
        .into_rows()
        .into_iter()
        .chain(incoming.rows().iter().cloned())
        .filter(|row| seen.insert(row.identity_key()))
        .collect();

    Consolidation {
        net_new: table.len() as i64 - persisted_rows as i64,
        table,
        persisted_rows,
    }
}

/// Load a partition, merge the session table into it, and rewrite it.
pub fn consolidate_into<S, R>(
    store: &S,
    partition: &str,
    incoming: &RecordTable<R>,
) -> Result<Consolidation<R>, PersistenceError>
where
    S: MasterStore,
    R: LedgerRecord,
{
    let persisted = store.load(partition)?;
    let consolidation = consolidate(persisted, incoming);
    store.save(partition, &consolidation.table)?;

    info!(
        "Consolidated {} rows into {}: {} persisted, {} net new",
        incoming.len(),
        partition,
        consolidation.persisted_rows,
        consolidation.net_new
    );

    Ok(consolidation)
}
