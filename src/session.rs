//! Explicit session state: the analysis-record cache and the frame
//! history store.
//!
//! All state that the original tool kept in ambient module globals
//! lives here, owned by one long-lived value the caller constructs and
//! passes around. Records keep insertion order; re-analyzing a frame
//! replaces its record in place so aggregation precedence stays stable
//! across re-runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::aggregate;
use crate::error::{DsaError, Result};
use crate::export::{self, StylesheetExport};
use crate::types::{AnalysisRecord, SummaryRecord};

/// Owns all cross-call analysis state for one process.
#[derive(Default)]
pub struct AnalysisSession {
    records: Vec<AnalysisRecord>,
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, replacing any previous record with the same
    /// identity while keeping its position.
    pub fn store(&mut self, record: AnalysisRecord) {
        match self
            .records
            .iter()
            .position(|existing| existing.identity() == record.identity())
        {
            Some(slot) => self.records[slot] = record,
            None => self.records.push(record),
        }
    }

    pub fn records(&self) -> &[AnalysisRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Current aggregate of cache contents; recomputed on demand.
    pub fn summarize(&self) -> SummaryRecord {
        aggregate::aggregate(&self.records)
    }

    /// Encode the cached records for export. An empty document is an
    /// explicit signaled condition so callers can warn instead of
    /// writing an empty file.
    pub fn export(&self) -> Result<StylesheetExport> {
        let document = export::encode(&self.records);
        if document.is_empty() {
            return Err(DsaError::EmptyExport);
        }
        Ok(document)
    }
}

/// One previously-analyzed frame, for UI listings and re-runs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub name: String,
    /// ISO-8601 timestamp of the last completed analysis
    pub last_analyzed: DateTime<Utc>,
    pub element_count: usize,
    /// Identity of the produced analysis output
    pub analysis_output_id: String,
    /// Whether the frame still existed at last check; the core treats
    /// this as a cache-invalidation hint only
    pub exists: bool,
}

/// External key-value collaborator holding the frame history.
pub trait HistoryStore {
    fn get(&self, frame_id: &str) -> Option<HistoryEntry>;
    fn set(&mut self, frame_id: &str, entry: HistoryEntry) -> Result<()>;
    fn remove(&mut self, frame_id: &str) -> Result<()>;
    fn entries(&self) -> Vec<(String, HistoryEntry)>;
}

/// In-memory store for tests and one-shot runs.
#[derive(Default)]
pub struct MemoryHistoryStore {
    entries: HashMap<String, HistoryEntry>,
}

impl HistoryStore for MemoryHistoryStore {
    fn get(&self, frame_id: &str) -> Option<HistoryEntry> {
        self.entries.get(frame_id).cloned()
    }

    fn set(&mut self, frame_id: &str, entry: HistoryEntry) -> Result<()> {
        self.entries.insert(frame_id.to_string(), entry);
        Ok(())
    }

    fn remove(&mut self, frame_id: &str) -> Result<()> {
        self.entries.remove(frame_id);
        Ok(())
    }

    fn entries(&self) -> Vec<(String, HistoryEntry)> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}

/// JSON-file-backed store used by the CLI; the whole map is rewritten
/// on every change, which is fine at frame-history sizes.
pub struct FileHistoryStore {
    path: PathBuf,
    entries: HashMap<String, HistoryEntry>,
}

impl FileHistoryStore {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(data) => serde_json::from_str(&data)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let data = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, data)?;
        Ok(())
    }
}

impl HistoryStore for FileHistoryStore {
    fn get(&self, frame_id: &str) -> Option<HistoryEntry> {
        self.entries.get(frame_id).cloned()
    }

    fn set(&mut self, frame_id: &str, entry: HistoryEntry) -> Result<()> {
        self.entries.insert(frame_id.to_string(), entry);
        self.persist()
    }

    fn remove(&mut self, frame_id: &str) -> Result<()> {
        self.entries.remove(frame_id);
        self.persist()
    }

    fn entries(&self) -> Vec<(String, HistoryEntry)> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}
