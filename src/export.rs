//! LVGL stylesheet export.
//!
//! Flattens cached analysis records into a `{colors, typography}`
//! document keyed by sanitized identifiers, carrying both raw values
//! (hex, RGB565, font metrics) and ready-to-paste LVGL reference and
//! declaration forms. Field names are an external contract consumed by
//! firmware tooling and must not change.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::codec;
use crate::types::{AnalysisRecord, ColorUsage, FontUsage};

/// The exported stylesheet document, serialized as-is to JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StylesheetExport {
    pub colors: BTreeMap<String, ColorExportEntry>,
    pub typography: BTreeMap<String, FontExportEntry>,
}

impl StylesheetExport {
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty() && self.typography.is_empty()
    }
}

/// One exported color. Field names are part of the external contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorExportEntry {
    pub figma_style_name: Option<String>,
    pub hex: String,
    pub rgb565: String,
    pub lvgl_color: String,
    pub lvgl_macro: String,
}

/// One exported font. Field names are part of the external contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontExportEntry {
    pub figma_style_name: Option<String>,
    pub font_family: String,
    pub font_size: Option<f32>,
    pub font_weight: String,
    pub lvgl_font: String,
    pub lvgl_declaration: String,
}

/// Encode every record's fonts and colors into the export document.
///
/// Operates on raw per-record data rather than a summary, so the same
/// value may arrive multiple times; the first write for a sanitized
/// key wins and later arrivals are dropped silently.
pub fn encode(records: &[AnalysisRecord]) -> StylesheetExport {
    let mut export = StylesheetExport::default();

    for record in records {
        for color in &record.colors {
            let key = color_export_key(color);
            export
                .colors
                .entry(key)
                .or_insert_with(|| color_entry(color));
        }

        for font in &record.fonts {
            let key = font_export_key(font);
            export
                .typography
                .entry(key)
                .or_insert_with(|| font_entry(font));
        }
    }

    export
}

/// Style name when present, otherwise `color_RRGGBB`, sanitized.
fn color_export_key(color: &ColorUsage) -> String {
    let source = match &color.style_name {
        Some(name) => name.clone(),
        None => format!("color_{}", color.hex.trim_start_matches('#')),
    };
    codec::sanitize_identifier(&source)
}

/// Style name when present, otherwise `family_style_size`, sanitized.
fn font_export_key(font: &FontUsage) -> String {
    let source = match &font.style_name {
        Some(name) => name.clone(),
        None => format!(
            "{}_{}_{}",
            font.font_family,
            font.font_style,
            font.font_size.label()
        ),
    };
    codec::sanitize_identifier(&source)
}

fn color_entry(color: &ColorUsage) -> ColorExportEntry {
    let rgb565 = codec::hex_to_rgb565(&color.hex);
    let raw = color.hex.trim_start_matches('#');
    let macro_name = format!(
        "COLOR_{}",
        color_export_key(color).to_uppercase()
    );

    ColorExportEntry {
        figma_style_name: color.style_name.clone(),
        hex: color.hex.clone(),
        rgb565: rgb565.clone(),
        lvgl_color: format!("lv_color_hex(0x{raw})"),
        lvgl_macro: format!("#define {macro_name} {rgb565}"),
    }
}

fn font_entry(font: &FontUsage) -> FontExportEntry {
    let family = codec::sanitize_identifier(&font.font_family);
    let size = font.font_size.label().to_lowercase();
    let font_name = format!("lv_font_{family}_{size}");

    FontExportEntry {
        figma_style_name: font.style_name.clone(),
        font_family: font.font_family.clone(),
        font_size: font.font_size.as_px(),
        font_weight: font.font_style.clone(),
        lvgl_font: format!("&{font_name}"),
        lvgl_declaration: format!("LV_FONT_DECLARE({font_name});"),
    }
}
