use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{RentalLedgerError, Result};
use crate::schema::TransactionRecord;

pub type EntryId = u64;

/// One immutable line in the change log: either the first version of an
/// entry or a later revision of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: EntryId,
    /// 0 for the original append, then 1, 2, ... per amendment.
    pub revision: u32,
    pub record: TransactionRecord,
}

/// In-memory ledger of transaction entries, kept as an append-only change
/// log. Edits never rewrite the table: an amendment appends a new revision
/// against the entry id, and reads fold the log down to the latest revision
/// per entry. Amendments to different entries never contend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerStore {
    log: Vec<LedgerEntry>,
    next_id: EntryId,
}

impl LedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new entry and returns its id.
    pub fn append(&mut self, record: TransactionRecord) -> EntryId {
        let id = self.next_id;
        self.next_id += 1;
        self.log.push(LedgerEntry {
            id,
            revision: 0,
            record,
        });
        debug!("Appended ledger entry {}", id);
        id
    }

    /// Appends a revision of an existing entry. The earlier revisions stay
    /// in the log.
    pub fn amend(&mut self, id: EntryId, record: TransactionRecord) -> Result<()> {
        let latest = self
            .log
            .iter()
            .filter(|entry| entry.id == id)
            .map(|entry| entry.revision)
            .max()
            .ok_or(RentalLedgerError::UnknownEntry(id))?;

        self.log.push(LedgerEntry {
            id,
            revision: latest + 1,
            record,
        });
        debug!("Amended ledger entry {} to revision {}", id, latest + 1);
        Ok(())
    }

    /// Read-side fold: the latest revision of every entry, in first-append
    /// order. This is the table every report runs on.
    pub fn records(&self) -> Vec<TransactionRecord> {
        let mut ids_in_order: Vec<EntryId> = Vec::new();
        for entry in &self.log {
            if entry.revision == 0 {
                ids_in_order.push(entry.id);
            }
        }

        ids_in_order
            .iter()
            .filter_map(|id| {
                self.log
                    .iter()
                    .filter(|entry| entry.id == *id)
                    .max_by_key(|entry| entry.revision)
                    .map(|entry| entry.record.clone())
            })
            .collect()
    }

    /// How many revisions exist for an entry (1 = never amended).
    pub fn revision_count(&self, id: EntryId) -> usize {
        self.log.iter().filter(|entry| entry.id == id).count()
    }

    /// Number of live entries (not counting amendment revisions).
    pub fn len(&self) -> usize {
        self.log.iter().filter(|entry| entry.revision == 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Full change log, for the persistence collaborator to flush.
    pub fn snapshot_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn restore_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
