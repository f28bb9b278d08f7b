//! Entry storage.
//!
//! [`EntryStore`] is the boundary to wherever parsed entries are persisted.
//! Stores are passed explicitly to the code that needs them; nothing in the
//! formatting path depends on one.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::entry::BibliographyEntry;
use crate::load::{parse_entries, LoadError, SourceFormat};
use crate::search::remove_by_id;

/// Errors that can occur when reading or writing a store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to access store: {0}")]
    IoError(#[from] io::Error),

    #[error("Failed to serialize entries: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid store content: {0}")]
    Load(#[from] LoadError),
}

/// A persistent collection of bibliography entries keyed by id.
pub trait EntryStore {
    /// All stored entries, in insertion order.
    fn list(&self) -> Result<Vec<BibliographyEntry>, StoreError>;

    /// Stores entries, returning their ids in input order.
    ///
    /// Entries without an id get a fresh `entry-N` id. An entry whose id is
    /// already stored replaces the stored one in place.
    fn add(&mut self, entries: Vec<BibliographyEntry>) -> Result<Vec<String>, StoreError>;

    /// Removes entries by id, returning how many were removed.
    fn remove(&mut self, ids: &[String]) -> Result<usize, StoreError>;
}

/// Store kept in memory only.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Vec<BibliographyEntry>,
}

impl EntryStore for MemoryStore {
    fn list(&self) -> Result<Vec<BibliographyEntry>, StoreError> {
        Ok(self.entries.clone())
    }

    fn add(&mut self, entries: Vec<BibliographyEntry>) -> Result<Vec<String>, StoreError> {
        Ok(upsert(&mut self.entries, entries))
    }

    fn remove(&mut self, ids: &[String]) -> Result<usize, StoreError> {
        Ok(ids.iter().map(|id| remove_by_id(&mut self.entries, id)).sum())
    }
}

/// Store backed by a JSON array file, rewritten on every change.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Vec<BibliographyEntry>,
}

impl JsonFileStore {
    /// Opens the store at `path`. A missing file is an empty store; it is
    /// created on the first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(content) => parse_entries(&content, SourceFormat::Json)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        tracing::debug!(path = %path.display(), entries = entries.len(), "opened store");
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Writes the whole store to a sibling file, then renames it over the
    /// store so a failed write never leaves a truncated store behind.
    fn save(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        let staging = self.staging_path();
        fs::write(&staging, json)?;
        if let Err(e) = fs::rename(&staging, &self.path) {
            let _ = fs::remove_file(&staging);
            return Err(e.into());
        }
        tracing::debug!(path = %self.path.display(), entries = self.entries.len(), "saved store");
        Ok(())
    }
}

impl EntryStore for JsonFileStore {
    fn list(&self) -> Result<Vec<BibliographyEntry>, StoreError> {
        Ok(self.entries.clone())
    }

    fn add(&mut self, entries: Vec<BibliographyEntry>) -> Result<Vec<String>, StoreError> {
        let ids = upsert(&mut self.entries, entries);
        self.save()?;
        Ok(ids)
    }

    fn remove(&mut self, ids: &[String]) -> Result<usize, StoreError> {
        let removed: usize = ids.iter().map(|id| remove_by_id(&mut self.entries, id)).sum();
        if removed > 0 {
            self.save()?;
        }
        Ok(removed)
    }
}

fn upsert(stored: &mut Vec<BibliographyEntry>, incoming: Vec<BibliographyEntry>) -> Vec<String> {
    // Generated ids must not collide with explicit ids in the same batch
    let mut next = next_generated_id(stored.iter().chain(&incoming));
    let mut ids = Vec::with_capacity(incoming.len());

    for mut entry in incoming {
        let id = match entry.id.clone() {
            Some(id) => id,
            None => {
                let id = format!("entry-{}", next);
                next += 1;
                entry.id = Some(id.clone());
                id
            }
        };

        match stored.iter_mut().find(|e| e.id.as_deref() == Some(id.as_str())) {
            Some(existing) => *existing = entry,
            None => stored.push(entry),
        }
        ids.push(id);
    }

    ids
}

/// One past the highest `entry-N` id in use.
fn next_generated_id<'a>(entries: impl Iterator<Item = &'a BibliographyEntry>) -> usize {
    entries
        .filter_map(|e| e.id.as_deref()?.strip_prefix("entry-")?.parse::<usize>().ok())
        .max()
        .map_or(1, |n| n + 1)
}
