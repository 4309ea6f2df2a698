use serde::{Deserialize, Serialize};

use crate::error::ErrorPayload;
use crate::export::StylesheetExport;
use crate::session::HistoryEntry;
use crate::types::{AnalysisRecord, SummaryRecord};

/// Schema version for output payloads.
pub const DSA_OUTPUT_VERSION: &str = "0.1.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum DsaOutput {
    Analyze(AnalyzeOutput),
    Summary(SummaryOutput),
    Export(ExportOutput),
    History(HistoryOutput),
    Error(ErrorOutput),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeOutput {
    pub version: String,
    /// Source document name or path
    pub source: String,
    pub frames: Vec<AnalysisRecord>,
    /// Frames that failed extraction; one failed frame never aborts
    /// the others
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<FrameFailure>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub advisories: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameFailure {
    pub frame: String,
    pub error: ErrorPayload,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryOutput {
    pub version: String,
    pub source: String,
    pub summary: SummaryRecord,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub advisories: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportOutput {
    pub version: String,
    pub source: String,
    pub stylesheet: StylesheetExport,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryOutput {
    pub version: String,
    /// Path of the history file listed
    pub history: String,
    pub frames: Vec<HistoryFrame>,
}

/// One listed frame: the store key plus its recorded entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryFrame {
    pub id: String,
    #[serde(flatten)]
    pub entry: HistoryEntry,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorOutput {
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub error: ErrorPayload,
}
