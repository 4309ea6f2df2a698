//! Analysis data model: the facts extracted from one subtree and the
//! cross-frame summary derived from them.
//!
//! These shapes are consumed read-only by the report renderer and are
//! part of the output contract; field names are stable.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One identity per underlying reusable component definition.
///
/// Created on first encounter of an instance whose resolved definition
/// key is new within one extraction pass; the count increments on
/// repeats. Never summed across frames by the aggregator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentReference {
    /// Stable identity: the component's persistent key, or its local
    /// id when no shared key exists
    pub variant_key: String,
    /// Top-level family name (the component-set name for variants)
    pub master_name: String,
    /// Specific variant name when the component belongs to a set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_name: Option<String>,
    pub is_variant: bool,
    /// Instances seen within one subtree walk; always >= 1
    pub instance_count: u32,
    pub is_icon: bool,
}

impl ComponentReference {
    /// Cross-record dedup key used by the aggregator.
    pub fn summary_key(&self) -> String {
        match (&self.variant_name, self.is_variant) {
            (Some(variant), true) => format!("{}:{}", self.master_name, variant),
            _ => self.master_name.clone(),
        }
    }
}

/// One entry per distinct (family, style, resolved-size) triple.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontUsage {
    pub font_key: String,
    pub font_family: String,
    pub font_style: String,
    /// Pixel size, or the "Mixed"/"Unknown" sentinels
    pub font_size: crate::types::FontSize,
    /// Named text style associated with this usage; backfilled with
    /// the first non-null observation and never overwritten by null
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_name: Option<String>,
}

impl FontUsage {
    /// Display string, also the aggregator's dedup key.
    pub fn display(&self) -> String {
        format!(
            "{} {} {}",
            self.font_family,
            self.font_style,
            self.font_size.label()
        )
    }
}

/// One entry per distinct (hex, opacity, fill-vs-stroke origin).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorUsage {
    /// Hex string, with a rounded-percentage suffix when opacity < 1
    pub color_key: String,
    /// 6-digit uppercase `#RRGGBB`
    pub hex: String,
    /// Always in (0, 1]; fully transparent paints are never stored
    pub opacity: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_name: Option<String>,
    /// Origin of the first observation; later observations of the
    /// other origin against the same key do not change it
    #[serde(rename = "type")]
    pub origin: ColorOrigin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorOrigin {
    Fill,
    Stroke,
}

/// A named text style together with the font it resolves to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyleUsage {
    pub style_name: String,
    pub font_family: String,
    pub font_style: String,
    pub font_size: crate::types::FontSize,
}

/// Basic facts about the analyzed subtree root.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameInfo {
    pub name: String,
    pub width: f32,
    pub height: f32,
    /// Nodes that passed the visibility/size gate
    pub element_count: usize,
}

/// The output of one extraction pass over one subtree.
///
/// Identified by the subtree's name at extraction time; a later rename
/// of the source does not retroactively update a stored record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    pub frame_info: FrameInfo,
    pub components: Vec<ComponentReference>,
    pub icons: Vec<ComponentReference>,
    pub fonts: Vec<FontUsage>,
    pub colors: Vec<ColorUsage>,
    pub color_style_names: BTreeSet<String>,
    pub text_styles: Vec<TextStyleUsage>,
    pub effect_style_names: BTreeSet<String>,
}

impl AnalysisRecord {
    /// Cache identity: the subtree's name at extraction time.
    pub fn identity(&self) -> &str {
        &self.frame_info.name
    }
}

/// Aggregate of all cached analysis records at call time.
///
/// Recomputed on demand; never persisted independently. Instance
/// counts are those of the first contributing frame, not totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRecord {
    /// Number of records contributing to this summary
    pub frame_count: usize,
    pub components: Vec<ComponentReference>,
    pub icons: Vec<ComponentReference>,
    pub fonts: Vec<FontUsage>,
    pub colors: Vec<ColorUsage>,
}
