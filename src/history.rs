//! Saved calculations.
//!
//! `CalculationHistory` is an explicit value owned by the caller. Persisting it
//! goes through a versioned `HistorySnapshot` and a `HistoryRepository` the
//! caller supplies.

use chrono::{DateTime, Utc};
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::amortization::MortgageQuote;
use crate::errors::{MortgageError, Result};
use crate::types::MortgageRequest;

/// a saved calculation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: Uuid,
    pub saved_at: DateTime<Utc>,
    pub name: Option<String>,
    pub request: MortgageRequest,
    pub quote: MortgageQuote,
}

/// saved calculations, newest first, bounded by capacity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculationHistory {
    capacity: usize,
    entries: Vec<HistoryEntry>,
}

impl CalculationHistory {
    pub const DEFAULT_CAPACITY: usize = 20;

    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: Vec::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// save a calculation at the front, dropping the oldest past capacity
    pub fn save(
        &mut self,
        request: MortgageRequest,
        quote: MortgageQuote,
        name: Option<String>,
        time_provider: &SafeTimeProvider,
    ) -> Uuid {
        let entry = HistoryEntry {
            id: Uuid::new_v4(),
            saved_at: time_provider.now(),
            name,
            request,
            quote,
        };
        let id = entry.id;

        self.entries.insert(0, entry);
        if self.entries.len() > self.capacity {
            let dropped = self.entries.len() - self.capacity;
            self.entries.truncate(self.capacity);
            tracing::debug!(dropped, capacity = self.capacity, "history trimmed");
        }
        tracing::debug!(%id, "calculation saved");
        id
    }

    pub fn load(&self, id: Uuid) -> Result<&HistoryEntry> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .ok_or(MortgageError::HistoryEntryNotFound { id })
    }

    pub fn delete(&mut self, id: Uuid) -> Result<HistoryEntry> {
        let index = self
            .entries
            .iter()
            .position(|entry| entry.id == id)
            .ok_or(MortgageError::HistoryEntryNotFound { id })?;
        Ok(self.entries.remove(index))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn snapshot(&self) -> HistorySnapshot {
        HistorySnapshot {
            version: HistorySnapshot::CURRENT_VERSION,
            entries: self.entries.clone(),
        }
    }

    /// rebuild from a snapshot, keeping at most `capacity` of its newest entries
    pub fn restore(snapshot: HistorySnapshot, capacity: usize) -> Result<Self> {
        snapshot.check_version()?;
        let mut history = Self::new(capacity);
        history.entries = snapshot.entries;
        history.entries.truncate(history.capacity);
        Ok(history)
    }

    /// load from a repository, empty when nothing was saved yet
    pub fn load_from<R: HistoryRepository + ?Sized>(repository: &R, capacity: usize) -> Result<Self> {
        match repository.load_snapshot()? {
            Some(snapshot) => Self::restore(snapshot, capacity),
            None => Ok(Self::new(capacity)),
        }
    }

    pub fn persist<R: HistoryRepository + ?Sized>(&self, repository: &mut R) -> Result<()> {
        repository.save_snapshot(&self.snapshot())
    }
}

impl Default for CalculationHistory {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

/// serializable form of a history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySnapshot {
    pub version: u32,
    pub entries: Vec<HistoryEntry>,
}

impl HistorySnapshot {
    pub const CURRENT_VERSION: u32 = 1;

    fn check_version(&self) -> Result<()> {
        if self.version != Self::CURRENT_VERSION {
            return Err(MortgageError::UnsupportedSnapshotVersion {
                found: self.version,
                expected: Self::CURRENT_VERSION,
            });
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: HistorySnapshot = serde_json::from_str(json)?;
        snapshot.check_version()?;
        Ok(snapshot)
    }
}

/// storage for history snapshots, owned by the embedding application
pub trait HistoryRepository {
    fn load_snapshot(&self) -> Result<Option<HistorySnapshot>>;
    fn save_snapshot(&mut self, snapshot: &HistorySnapshot) -> Result<()>;
    fn reset(&mut self) -> Result<()>;
}

/// keeps the serialized snapshot in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    stored: Option<String>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// the stored JSON, if any
    pub fn raw(&self) -> Option<&str> {
        self.stored.as_deref()
    }
}

impl HistoryRepository for InMemoryRepository {
    fn load_snapshot(&self) -> Result<Option<HistorySnapshot>> {
        self.stored.as_deref().map(HistorySnapshot::from_json).transpose()
    }

    fn save_snapshot(&mut self, snapshot: &HistorySnapshot) -> Result<()> {
        self.stored = Some(snapshot.to_json()?);
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        self.stored = None;
        Ok(())
    }
}
