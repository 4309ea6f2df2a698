//! Design System Auditor (DSA) Library
//!
//! A library for auditing design-system usage in design files: which
//! components, fonts, and colors a set of frames actually uses, and
//! what their exact values are for embedded-UI handoff (hex, RGB565,
//! font metrics, LVGL declarations).
//!
//! # Module Overview
//!
//! - [`figma`] - Figma API integration and scene-tree conversion
//! - [`document`] - Loaded documents and frame selection
//! - [`classify`] - Visibility gate and component-vs-icon heuristics
//! - [`extract`] - Single-pass frame extraction
//! - [`aggregate`] - Cross-frame summary building
//! - [`export`] - LVGL stylesheet encoding
//! - [`session`] - Record cache and frame history
//! - [`codec`] - Hex/RGB565 conversion and identifier sanitizing
//! - [`types`] - Core data types and structures
//! - [`output`] - JSON output schemas
//!
//! # Example
//!
//! ```no_run
//! use dsa_lib::{AnalysisSession, DocumentResolver, FrameExtractor, LoadedDocument};
//!
//! # fn example(file: &dsa_lib::figma::FileResponse) -> dsa_lib::Result<()> {
//! let document = LoadedDocument::from_file_response(file);
//! let resolver = DocumentResolver::new(&document.index);
//! let mut session = AnalysisSession::new();
//!
//! for frame in document.select_frames(&[])? {
//!     let record = FrameExtractor::new(&resolver).extract(frame);
//!     session.store(record);
//! }
//!
//! let summary = session.summarize();
//! let stylesheet = session.export()?;
//! # let _ = (summary, stylesheet);
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod classify;
pub mod codec;
pub mod config;
pub mod document;
pub mod error;
pub mod export;
pub mod extract;
pub mod figma;
pub mod output;
pub mod progress;
pub mod resolver;
pub mod resource;
pub mod session;
pub mod types;

pub use aggregate::aggregate;
pub use codec::{hex_to_rgb, hex_to_rgb565, rgb_to_hex, sanitize_identifier, Rgb};
pub use config::Config;
pub use document::LoadedDocument;
pub use error::{DsaError, ErrorCategory, ErrorPayload, Result};
pub use export::{encode, ColorExportEntry, FontExportEntry, StylesheetExport};
pub use extract::{FrameExtractor, DEFAULT_BATCH_SIZE};
pub use figma::{FigmaAuth, FigmaClient};
pub use output::{
    AnalyzeOutput, DsaOutput, ErrorOutput, ExportOutput, FrameFailure, HistoryFrame,
    HistoryOutput, SummaryOutput, DSA_OUTPUT_VERSION,
};
pub use progress::ProgressCallback;
pub use resolver::{
    ComponentInfo, DocumentResolver, ResolutionError, StyleResolver, TextStyleInfo,
};
pub use resource::{parse_source, DesignSource, ResourceParseError};
pub use session::{
    AnalysisSession, FileHistoryStore, HistoryEntry, HistoryStore, MemoryHistoryStore,
};
pub use types::{
    AnalysisRecord, ColorOrigin, ColorUsage, ComponentReference, FontName, FontSize, FontUsage,
    FrameInfo, NodeKind, Paint, PaintColor, PaintKind, SceneNode, SummaryRecord, TextStyleUsage,
};
