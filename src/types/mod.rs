//! Core types used throughout the auditor.
//!
//! - [`node`] - the closed scene-node capability model
//! - [`analysis`] - extraction and summary records

mod analysis;
mod node;

pub use analysis::{
    AnalysisRecord, ColorOrigin, ColorUsage, ComponentReference, FontUsage, FrameInfo,
    SummaryRecord, TextStyleUsage,
};
pub use node::{
    FontName, FontSize, InstanceAttrs, NodeKind, Paint, PaintColor, PaintKind, SceneNode,
    TextAttrs,
};
