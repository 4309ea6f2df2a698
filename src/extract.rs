//! Single-pass frame extraction.
//!
//! Walks one subtree exactly once per node, classifying each node's
//! contributions into four deduplicated collections (components,
//! icons, fonts, colors) and three named-style sets. Per-node
//! resolution failures are logged and skipped; the only hard failure
//! is an inaccessible root, which the caller surfaces before invoking
//! the extractor.

use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::debug;

use crate::classify::{self, ComponentFacts};
use crate::codec;
use crate::progress::ProgressCallback;
use crate::resolver::{ComponentInfo, StyleResolver};
use crate::types::{
    AnalysisRecord, ColorOrigin, ColorUsage, ComponentReference, FontSize, FontUsage, FrameInfo,
    NodeKind, Paint, PaintKind, SceneNode, TextStyleUsage,
};

/// Default number of nodes processed between progress reports.
pub const DEFAULT_BATCH_SIZE: usize = 50;

pub struct FrameExtractor<'a, R: StyleResolver> {
    resolver: &'a R,
    batch_size: usize,
    progress: Option<ProgressCallback>,
}

impl<'a, R: StyleResolver> FrameExtractor<'a, R> {
    pub fn new(resolver: &'a R) -> Self {
        Self {
            resolver,
            batch_size: DEFAULT_BATCH_SIZE,
            progress: None,
        }
    }

    /// Batch size only affects progress-report cadence, never output.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn with_progress(mut self, progress: ProgressCallback) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Extract one analysis record from one subtree.
    pub fn extract(&self, root: &SceneNode) -> AnalysisRecord {
        let mut flat: Vec<&SceneNode> = Vec::new();
        flatten(root, &mut flat);
        let total = flat.len();

        // Guards against a node reachable twice through host API
        // inconsistencies; scoped to this one extraction.
        let mut processed: HashSet<&str> = HashSet::with_capacity(total);
        let mut acc = Accumulator::default();
        let mut element_count = 0usize;

        for (index, node) in flat.iter().enumerate() {
            if !processed.insert(node.id.as_str()) {
                continue;
            }
            if !classify::passes_visibility_gate(node.visible, node.width, node.height) {
                continue;
            }

            element_count += 1;
            self.process_node(node, &mut acc);

            if (index + 1) % self.batch_size == 0 {
                if let Some(progress) = &self.progress {
                    progress(&format!("Processed {}/{} nodes", index + 1, total));
                }
            }
        }

        if let Some(progress) = &self.progress {
            progress(&format!("Processed {total}/{total} nodes"));
        }

        acc.into_record(FrameInfo {
            name: root.name.clone(),
            width: root.width,
            height: root.height,
            element_count,
        })
    }

    fn process_node(&self, node: &SceneNode, acc: &mut Accumulator) {
        match &node.kind {
            NodeKind::Instance(attrs) => {
                if let Some(component_id) = &attrs.component_id {
                    match self.resolver.resolve_component(component_id) {
                        Ok(info) => acc.record_component(&info),
                        Err(err) => {
                            debug!(node = %node.id, %err, "skipping unresolvable instance");
                        }
                    }
                }
            }
            NodeKind::Text(attrs) => {
                if let Some(font) = &attrs.font {
                    let (size, style_name) = self.resolve_text_facts(
                        node,
                        attrs.font_size,
                        attrs.text_style_id.as_deref(),
                    );
                    acc.record_font(&font.family, &font.style, size, style_name.as_deref());
                }
            }
            NodeKind::Container | NodeKind::Shape => {}
        }

        self.record_paints(node, acc);

        if let Some(style_id) = &node.effect_style_id {
            match self.resolver.effect_style_name(style_id) {
                Ok(name) => {
                    acc.effect_style_names.insert(name);
                }
                Err(err) => debug!(node = %node.id, %err, "skipping effect style"),
            }
        }
    }

    /// Size precedence: direct numeric, then the mixed sentinel, then
    /// the associated text style's size, then unknown.
    fn resolve_text_facts(
        &self,
        node: &SceneNode,
        declared: FontSize,
        text_style_id: Option<&str>,
    ) -> (FontSize, Option<String>) {
        let style_info = text_style_id.and_then(|id| match self.resolver.text_style(id) {
            Ok(info) => Some(info),
            Err(err) => {
                debug!(node = %node.id, %err, "skipping text style");
                None
            }
        });

        let size = match declared {
            FontSize::Px(_) | FontSize::Mixed => declared,
            FontSize::Unknown => style_info
                .as_ref()
                .and_then(|info| info.font_size)
                .map(FontSize::Px)
                .unwrap_or(FontSize::Unknown),
        };

        (size, style_info.map(|info| info.name))
    }

    fn record_paints(&self, node: &SceneNode, acc: &mut Accumulator) {
        let fill_style = self.resolve_paint_style(node, node.fill_style_id.as_deref());
        for paint in &node.fills {
            acc.record_paint(paint, ColorOrigin::Fill, fill_style.as_deref());
        }
        if let Some(name) = fill_style {
            acc.color_style_names.insert(name);
        }

        let stroke_style = self.resolve_paint_style(node, node.stroke_style_id.as_deref());
        for paint in &node.strokes {
            acc.record_paint(paint, ColorOrigin::Stroke, stroke_style.as_deref());
        }
        if let Some(name) = stroke_style {
            acc.color_style_names.insert(name);
        }
    }

    fn resolve_paint_style(&self, node: &SceneNode, style_id: Option<&str>) -> Option<String> {
        let style_id = style_id?;
        match self.resolver.paint_style_name(style_id) {
            Ok(name) => Some(name),
            Err(err) => {
                debug!(node = %node.id, %err, "skipping paint style");
                None
            }
        }
    }
}

fn flatten<'n>(node: &'n SceneNode, out: &mut Vec<&'n SceneNode>) {
    out.push(node);
    for child in &node.children {
        flatten(child, out);
    }
}

#[derive(Default)]
struct Accumulator {
    components: Vec<ComponentReference>,
    component_index: HashMap<String, usize>,
    fonts: HashMap<String, FontUsage>,
    colors: HashMap<String, ColorUsage>,
    color_style_names: BTreeSet<String>,
    text_styles: HashMap<String, TextStyleUsage>,
    effect_style_names: BTreeSet<String>,
}

impl Accumulator {
    fn record_component(&mut self, info: &ComponentInfo) {
        let key = info.stable_key();
        if let Some(&slot) = self.component_index.get(&key) {
            self.components[slot].instance_count += 1;
            return;
        }

        let facts = ComponentFacts {
            name: &info.name,
            set_name: info.set_name.as_deref(),
            variant_properties: info.variant_properties.as_ref(),
        };
        let is_icon = classify::is_icon(&facts);

        let (master_name, variant_name, is_variant) = match &info.set_name {
            Some(set_name) => (set_name.clone(), Some(info.name.clone()), true),
            None => (info.name.clone(), None, false),
        };

        self.component_index.insert(key.clone(), self.components.len());
        self.components.push(ComponentReference {
            variant_key: key,
            master_name,
            variant_name,
            is_variant,
            instance_count: 1,
            is_icon,
        });
    }

    fn record_font(
        &mut self,
        family: &str,
        style: &str,
        size: FontSize,
        style_name: Option<&str>,
    ) {
        let font_key = format!("{}_{}_{}", family, style, size.label());
        let entry = self.fonts.entry(font_key.clone()).or_insert_with(|| FontUsage {
            font_key,
            font_family: family.to_string(),
            font_style: style.to_string(),
            font_size: size,
            style_name: None,
        });

        // first non-null style name wins, never overwritten by null
        if entry.style_name.is_none() {
            entry.style_name = style_name.map(str::to_string);
        }

        if let Some(name) = style_name {
            self.text_styles
                .entry(name.to_string())
                .or_insert_with(|| TextStyleUsage {
                    style_name: name.to_string(),
                    font_family: family.to_string(),
                    font_style: style.to_string(),
                    font_size: size,
                });
        }
    }

    fn record_paint(&mut self, paint: &Paint, origin: ColorOrigin, style_name: Option<&str>) {
        if paint.kind != PaintKind::Solid || !paint.visible {
            return;
        }
        let Some(color) = paint.color else {
            return;
        };
        let opacity = paint.opacity;
        if opacity <= 0.0 {
            return;
        }

        let hex = codec::rgb_to_hex(color.r, color.g, color.b);
        let color_key = if opacity < 1.0 {
            format!("{}@{:.0}%", hex, opacity * 100.0)
        } else {
            hex.clone()
        };

        let entry = self.colors.entry(color_key.clone()).or_insert_with(|| ColorUsage {
            color_key,
            hex,
            opacity,
            style_name: None,
            origin,
        });

        if entry.style_name.is_none() {
            entry.style_name = style_name.map(str::to_string);
        }
    }

    fn into_record(self, frame_info: FrameInfo) -> AnalysisRecord {
        let (icons, components): (Vec<_>, Vec<_>) =
            self.components.into_iter().partition(|c| c.is_icon);

        let mut fonts: Vec<FontUsage> = self.fonts.into_values().collect();
        fonts.sort_by(|a, b| {
            a.font_family
                .cmp(&b.font_family)
                .then_with(|| a.font_style.cmp(&b.font_style))
                .then_with(|| match (a.font_size.as_px(), b.font_size.as_px()) {
                    (Some(x), Some(y)) => {
                        x.partial_cmp(&y).unwrap_or(std::cmp::Ordering::Equal)
                    }
                    _ => std::cmp::Ordering::Equal,
                })
        });

        let mut colors: Vec<ColorUsage> = self.colors.into_values().collect();
        colors.sort_by(|a, b| a.hex.cmp(&b.hex).then_with(|| a.color_key.cmp(&b.color_key)));

        let mut text_styles: Vec<TextStyleUsage> = self.text_styles.into_values().collect();
        text_styles.sort_by(|a, b| a.style_name.cmp(&b.style_name));

        AnalysisRecord {
            frame_info,
            components,
            icons,
            fonts,
            colors,
            color_style_names: self.color_style_names,
            text_styles,
            effect_style_names: self.effect_style_names,
        }
    }
}
