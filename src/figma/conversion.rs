//! Mapping from raw API payloads to the typed scene tree and the
//! document index the resolver answers lookups from.

use std::collections::{BTreeMap, HashMap};

use crate::types::{
    FontName, FontSize, InstanceAttrs, NodeKind, Paint, PaintColor, PaintKind, SceneNode,
    TextAttrs,
};

use super::api_types::{FileResponse, NodeData, PaintData, StyleMeta, TypeStyle};

/// Lookup tables built once per loaded document.
#[derive(Debug, Default, Clone)]
pub struct DocumentIndex {
    /// Component node id -> metadata
    pub components: HashMap<String, IndexedComponent>,
    /// Component-set node id -> family name
    pub component_sets: HashMap<String, String>,
    /// Named-style id -> metadata
    pub styles: HashMap<String, IndexedStyle>,
    /// Text-style id -> concrete size learned from nodes using the
    /// style with a directly-set size; first observation wins
    pub text_style_sizes: HashMap<String, f32>,
}

#[derive(Debug, Clone)]
pub struct IndexedComponent {
    pub key: String,
    pub name: String,
    pub component_set_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct IndexedStyle {
    pub name: String,
    pub style_type: String,
}

/// Build the document index from a file response plus its node tree.
pub fn build_document_index(file: &FileResponse) -> DocumentIndex {
    let mut index = DocumentIndex::default();

    for (id, meta) in &file.components {
        index.components.insert(
            id.clone(),
            IndexedComponent {
                key: meta.key.clone(),
                name: meta.name.clone(),
                component_set_id: meta.component_set_id.clone(),
            },
        );
    }
    for (id, meta) in &file.component_sets {
        index.component_sets.insert(id.clone(), meta.name.clone());
    }
    for (id, meta) in &file.styles {
        index.styles.insert(id.clone(), map_style(meta));
    }

    learn_text_style_sizes(&file.document, &mut index.text_style_sizes);

    index
}

/// Merge node-endpoint tables into an existing index (nodes responses
/// carry their own component/style tables).
pub fn merge_node_tables(
    index: &mut DocumentIndex,
    components: &HashMap<String, super::api_types::ComponentMeta>,
    component_sets: &HashMap<String, super::api_types::ComponentSetMeta>,
    styles: &HashMap<String, StyleMeta>,
) {
    for (id, meta) in components {
        index
            .components
            .entry(id.clone())
            .or_insert_with(|| IndexedComponent {
                key: meta.key.clone(),
                name: meta.name.clone(),
                component_set_id: meta.component_set_id.clone(),
            });
    }
    for (id, meta) in component_sets {
        index
            .component_sets
            .entry(id.clone())
            .or_insert_with(|| meta.name.clone());
    }
    for (id, meta) in styles {
        index.styles.entry(id.clone()).or_insert_with(|| map_style(meta));
    }
}

fn map_style(meta: &StyleMeta) -> IndexedStyle {
    IndexedStyle {
        name: meta.name.clone(),
        style_type: meta.style_type.clone(),
    }
}

fn learn_text_style_sizes(node: &NodeData, sizes: &mut HashMap<String, f32>) {
    if let (Some(style_id), Some(style)) = (node.styles.get("text"), node.style.as_ref()) {
        if let Some(size) = style.font_size {
            sizes.entry(style_id.clone()).or_insert(size);
        }
    }
    for child in &node.children {
        learn_text_style_sizes(child, sizes);
    }
}

/// Convert a raw node subtree into the typed scene model.
pub fn build_scene_tree(node: &NodeData) -> SceneNode {
    let (width, height) = node
        .absolute_bounding_box
        .map(|bb| (bb.width, bb.height))
        .unwrap_or((0.0, 0.0));

    SceneNode {
        id: node.id.clone(),
        name: node.name.clone(),
        kind: map_kind(node),
        visible: node.visible,
        width,
        height,
        fills: node.fills.iter().map(map_paint).collect(),
        strokes: node.strokes.iter().map(map_paint).collect(),
        fill_style_id: node.styles.get("fill").cloned(),
        stroke_style_id: node.styles.get("stroke").cloned(),
        effect_style_id: node.styles.get("effect").cloned(),
        children: node.children.iter().map(build_scene_tree).collect(),
    }
}

fn map_kind(node: &NodeData) -> NodeKind {
    match node.node_type.as_str() {
        "TEXT" => NodeKind::Text(map_text_attrs(node)),
        "INSTANCE" => NodeKind::Instance(InstanceAttrs {
            component_id: node.component_id.clone(),
        }),
        "FRAME" | "GROUP" | "SECTION" | "COMPONENT" | "COMPONENT_SET" | "CANVAS" | "DOCUMENT" => {
            NodeKind::Container
        }
        "RECTANGLE" | "ELLIPSE" | "VECTOR" | "LINE" | "STAR" | "REGULAR_POLYGON"
        | "BOOLEAN_OPERATION" => NodeKind::Shape,
        _ if !node.children.is_empty() => NodeKind::Container,
        _ => NodeKind::Shape,
    }
}

fn map_text_attrs(node: &NodeData) -> TextAttrs {
    let base = node.style.as_ref();
    let font = base.and_then(|style| {
        style.font_family.as_ref().map(|family| FontName {
            family: family.clone(),
            style: font_style_name(style),
        })
    });

    TextAttrs {
        font,
        font_size: resolve_declared_size(node),
        text_style_id: node.styles.get("text").cloned(),
    }
}

fn resolve_declared_size(node: &NodeData) -> FontSize {
    let base_size = node.style.as_ref().and_then(|s| s.font_size);

    if has_mixed_sizes(node, base_size) {
        return FontSize::Mixed;
    }

    match base_size {
        Some(size) => FontSize::Px(size),
        None => FontSize::Unknown,
    }
}

fn has_mixed_sizes(node: &NodeData, base_size: Option<f32>) -> bool {
    if node.character_style_overrides.is_empty() {
        return false;
    }
    node.style_override_table.values().any(|over| {
        match (over.font_size, base_size) {
            (Some(o), Some(b)) => (o - b).abs() > f32::EPSILON,
            (Some(_), None) => true,
            _ => false,
        }
    })
}

/// Derive a display style name ("Bold", "Medium Italic", ...) from the
/// numeric weight and italic flag.
pub fn font_style_name(style: &TypeStyle) -> String {
    let weight = match style.font_weight.map(|w| w.round() as u16) {
        Some(100) => "Thin",
        Some(200) => "ExtraLight",
        Some(300) => "Light",
        Some(500) => "Medium",
        Some(600) => "SemiBold",
        Some(700) => "Bold",
        Some(800) => "ExtraBold",
        Some(900) => "Black",
        _ => "Regular",
    };

    if style.italic {
        if weight == "Regular" {
            "Italic".to_string()
        } else {
            format!("{weight} Italic")
        }
    } else {
        weight.to_string()
    }
}

fn map_paint(paint: &PaintData) -> Paint {
    let kind = match paint.paint_type.to_uppercase().as_str() {
        "SOLID" => PaintKind::Solid,
        "IMAGE" => PaintKind::Image,
        t if t.starts_with("GRADIENT") => PaintKind::Gradient,
        _ => PaintKind::Gradient,
    };

    Paint {
        kind,
        visible: paint.visible,
        opacity: paint.opacity.unwrap_or(1.0),
        color: paint.color.map(|c| PaintColor {
            r: c.r,
            g: c.g,
            b: c.b,
        }),
    }
}

/// Parse `Prop=Value, Prop2=Value2` variant names into a property map.
///
/// Returns None when the name carries no `=` pairs (standalone
/// components name themselves freely).
pub fn parse_variant_properties(name: &str) -> Option<BTreeMap<String, String>> {
    let mut props = BTreeMap::new();
    for part in name.split(',') {
        let mut kv = part.splitn(2, '=');
        let key = kv.next().map(str::trim).unwrap_or_default();
        let value = kv.next().map(str::trim);
        match value {
            Some(value) if !key.is_empty() => {
                props.insert(key.to_string(), value.to_string());
            }
            _ => {}
        }
    }
    if props.is_empty() {
        None
    } else {
        Some(props)
    }
}
