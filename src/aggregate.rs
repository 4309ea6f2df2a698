//! Cross-frame aggregation.
//!
//! Combines cached analysis records into one summary. Records are
//! first reclassified with the relaxed icon rule so the summary's
//! icon/component split follows a single rule even when records were
//! produced at different times. Dedup is first-occurrence-wins in
//! record iteration order, and instance counts are deliberately NOT
//! summed across records: a summary count answers "how often does this
//! appear in the first frame that used it", not "how often overall".

use std::collections::HashSet;

use crate::classify;
use crate::types::{
    AnalysisRecord, ColorUsage, ComponentReference, FontUsage, SummaryRecord,
};

/// Build a summary over the given records.
pub fn aggregate(records: &[AnalysisRecord]) -> SummaryRecord {
    let mut seen_components: HashSet<String> = HashSet::new();
    let mut seen_fonts: HashSet<String> = HashSet::new();
    let mut seen_colors: HashSet<String> = HashSet::new();

    let mut components: Vec<ComponentReference> = Vec::new();
    let mut icons: Vec<ComponentReference> = Vec::new();
    let mut fonts: Vec<FontUsage> = Vec::new();
    let mut colors: Vec<ColorUsage> = Vec::new();

    for record in records {
        for reference in record.components.iter().chain(record.icons.iter()) {
            let key = reference.summary_key();
            if !seen_components.insert(key) {
                continue;
            }

            let mut reference = reference.clone();
            reference.is_icon = reclassify(&reference);
            if reference.is_icon {
                icons.push(reference);
            } else {
                components.push(reference);
            }
        }

        for font in &record.fonts {
            if seen_fonts.insert(font.display()) {
                fonts.push(font.clone());
            }
        }

        // opacity variants of one hex collapse at summary level
        for color in &record.colors {
            if seen_colors.insert(color.hex.clone()) {
                colors.push(color.clone());
            }
        }
    }

    SummaryRecord {
        frame_count: records.len(),
        components,
        icons,
        fonts,
        colors,
    }
}

/// Relaxed reconciliation: trust an existing icon flag, then check
/// every recorded display name.
fn reclassify(reference: &ComponentReference) -> bool {
    let mut names: Vec<&str> = vec![&reference.master_name];
    if let Some(variant) = &reference.variant_name {
        names.push(variant);
    }
    classify::is_icon_relaxed(reference.is_icon, &names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ColorOrigin, FontSize, FrameInfo};
    use std::collections::BTreeSet;

    fn record(name: &str) -> AnalysisRecord {
        AnalysisRecord {
            frame_info: FrameInfo {
                name: name.to_string(),
                width: 800.0,
                height: 480.0,
                element_count: 1,
            },
            components: vec![],
            icons: vec![],
            fonts: vec![],
            colors: vec![],
            color_style_names: BTreeSet::new(),
            text_styles: vec![],
            effect_style_names: BTreeSet::new(),
        }
    }

    fn component(master: &str, variant: Option<&str>, count: u32) -> ComponentReference {
        ComponentReference {
            variant_key: format!("{master}-{}", variant.unwrap_or("plain")),
            master_name: master.to_string(),
            variant_name: variant.map(str::to_string),
            is_variant: variant.is_some(),
            instance_count: count,
            is_icon: false,
        }
    }

    fn color(hex: &str, opacity: f32) -> ColorUsage {
        ColorUsage {
            color_key: if opacity < 1.0 {
                format!("{hex}@{:.0}%", opacity * 100.0)
            } else {
                hex.to_string()
            },
            hex: hex.to_string(),
            opacity,
            style_name: None,
            origin: ColorOrigin::Fill,
        }
    }

    fn font(family: &str, size: f32) -> FontUsage {
        FontUsage {
            font_key: format!("{family}_Regular_{size}"),
            font_family: family.to_string(),
            font_style: "Regular".to_string(),
            font_size: FontSize::Px(size),
            style_name: None,
        }
    }

    #[test]
    fn first_record_wins_on_component_collisions() {
        let mut first = record("A");
        first.components = vec![component("Button", None, 5)];
        let mut second = record("B");
        second.components = vec![component("Button", None, 9)];

        let summary = aggregate(&[first.clone(), second.clone()]);
        assert_eq!(summary.frame_count, 2);
        assert_eq!(summary.components.len(), 1);
        // counts are never summed across records
        assert_eq!(summary.components[0].instance_count, 5);

        let reversed = aggregate(&[second, first]);
        assert_eq!(reversed.components[0].instance_count, 9);
    }

    #[test]
    fn key_set_is_invariant_to_record_order() {
        let mut first = record("A");
        first.components = vec![
            component("Button", Some("State=Hover"), 1),
            component("Card", None, 2),
        ];
        let mut second = record("B");
        second.components = vec![component("Button", Some("State=Hover"), 3)];

        let keys = |summary: &SummaryRecord| {
            let mut keys: Vec<String> = summary
                .components
                .iter()
                .chain(summary.icons.iter())
                .map(ComponentReference::summary_key)
                .collect();
            keys.sort();
            keys
        };

        let forward = aggregate(&[first.clone(), second.clone()]);
        let backward = aggregate(&[second, first]);
        assert_eq!(keys(&forward), keys(&backward));
    }

    #[test]
    fn reclassification_moves_substring_matches_to_icons() {
        let mut rec = record("A");
        rec.components = vec![component("iconography_panel", None, 1)];

        let summary = aggregate(&[rec]);
        assert!(summary.components.is_empty());
        assert_eq!(summary.icons.len(), 1);
        assert_eq!(summary.icons[0].master_name, "iconography_panel");
    }

    #[test]
    fn existing_icon_flag_is_trusted() {
        let mut rec = record("A");
        let mut flagged = component("Mystery", None, 1);
        flagged.is_icon = true;
        rec.icons = vec![flagged];

        let summary = aggregate(&[rec]);
        assert_eq!(summary.icons.len(), 1);
        assert!(summary.components.is_empty());
    }

    #[test]
    fn colors_dedup_on_hex_alone() {
        let mut first = record("A");
        first.colors = vec![color("#336699", 0.5)];
        let mut second = record("B");
        second.colors = vec![color("#336699", 1.0), color("#FF0000", 1.0)];

        let summary = aggregate(&[first, second]);
        assert_eq!(summary.colors.len(), 2);
        let entry = summary.colors.iter().find(|c| c.hex == "#336699").unwrap();
        // first occurrence's opacity metadata is kept
        assert!((entry.opacity - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn fonts_dedup_on_display_string() {
        let mut first = record("A");
        first.fonts = vec![font("Inter", 14.0), font("Inter", 16.0)];
        let mut second = record("B");
        second.fonts = vec![font("Inter", 14.0)];

        let summary = aggregate(&[first, second]);
        assert_eq!(summary.fonts.len(), 2);
    }

    #[test]
    fn empty_input_summarizes_to_zero() {
        let summary = aggregate(&[]);
        assert_eq!(summary.frame_count, 0);
        assert!(summary.components.is_empty());
        assert!(summary.icons.is_empty());
        assert!(summary.fonts.is_empty());
        assert!(summary.colors.is_empty());
    }
}
