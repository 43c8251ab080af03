//! Persistence for the home-run ledger.
//!
//! The ledger lives in two string records of a key-value store:
//! `mentaculous` (player id to entry) and `mentaculousOrder` (display order).
//! [`FileStore`] keeps one JSON file per key under the data directory.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use mentaculous_core::{Ledger, LedgerCommand, LedgerEntry, Mutation, PlayerId};
use tracing::{debug, info, warn};

use crate::error::OpsResult;

/// Record holding the ledger entries.
pub const LEDGER_KEY: &str = "mentaculous";
/// Record holding the display order.
pub const ORDER_KEY: &str = "mentaculousOrder";

/// String-valued persistent storage.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> OpsResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> OpsResult<()>;
}

// =============================================================================
// File store
// =============================================================================

/// One file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> OpsResult<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(&path)?))
    }

    fn set(&mut self, key: &str, value: &str) -> OpsResult<()> {
        std::fs::create_dir_all(&self.root)?;
        let path = self.path_for(key);
        std::fs::write(&path, value)?;
        debug!(path = %path.display(), bytes = value.len(), "Wrote record");
        Ok(())
    }
}

// =============================================================================
// Memory store
// =============================================================================

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record.
    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.values.insert(key.to_string(), value.into());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> OpsResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> OpsResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// =============================================================================
// Ledger store
// =============================================================================

/// The ledger paired with its backing store. Every state change is written
/// through before the call returns.
pub struct LedgerStore {
    kv: Box<dyn KeyValueStore>,
    ledger: Ledger,
}

impl std::fmt::Debug for LedgerStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerStore")
            .field("ledger", &self.ledger)
            .finish_non_exhaustive()
    }
}

impl LedgerStore {
    /// Read the ledger from `kv`.
    ///
    /// Never fails: unreadable or corrupt records are treated as absent.
    pub fn hydrate(kv: impl KeyValueStore + 'static) -> Self {
        let entries: BTreeMap<PlayerId, LedgerEntry> =
            read_record(&kv, LEDGER_KEY).unwrap_or_default();
        let order: Option<Vec<PlayerId>> = read_record(&kv, ORDER_KEY);

        let ledger = Ledger::from_parts(entries, order);
        info!(
            players = ledger.len(),
            home_runs = ledger.home_run_count(),
            "Hydrated ledger"
        );
        Self {
            kv: Box::new(kv),
            ledger,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Write both records.
    pub fn persist(&mut self) -> OpsResult<()> {
        write_ledger(self.kv.as_mut(), &self.ledger)
    }

    /// Apply a command, persisting when it changed anything.
    ///
    /// The in-memory ledger only moves to the new state once both records
    /// are written; a failed write leaves it as it was.
    pub fn mutate(&mut self, command: LedgerCommand) -> OpsResult<Mutation> {
        let mut next = self.ledger.clone();
        let mutation = next.apply(command);
        if mutation.is_changed() {
            write_ledger(self.kv.as_mut(), &next)?;
            self.ledger = next;
        }
        debug!(?mutation, "Ledger command applied");
        Ok(mutation)
    }

    /// The stored strings as-is (empty when absent), for backups.
    pub fn raw_records(&self) -> OpsResult<(String, String)> {
        Ok((
            self.kv.get(LEDGER_KEY)?.unwrap_or_default(),
            self.kv.get(ORDER_KEY)?.unwrap_or_default(),
        ))
    }
}

fn write_ledger(kv: &mut dyn KeyValueStore, ledger: &Ledger) -> OpsResult<()> {
    let entries = serde_json::to_string(ledger.entries())?;
    let order = serde_json::to_string(ledger.order())?;
    kv.set(LEDGER_KEY, &entries)?;
    kv.set(ORDER_KEY, &order)?;
    Ok(())
}

fn read_record<T: serde::de::DeserializeOwned>(kv: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = match kv.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!(key, error = %e, "Failed to read record, treating as absent");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, error = %e, "Corrupt record, treating as absent");
            None
        }
    }
}
