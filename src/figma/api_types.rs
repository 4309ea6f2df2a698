//! Figma REST API response types for parsing design-file JSON.
//!
//! Only the slice of the API surface the auditor reads is modeled:
//! the node tree with paints and style references, and the file-level
//! component / component-set / style tables.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

fn default_true() -> bool {
    true
}

/// A file response from the files endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileResponse {
    pub name: String,
    #[serde(default)]
    pub last_modified: Option<String>,
    pub document: NodeData,
    #[serde(default)]
    pub components: HashMap<String, ComponentMeta>,
    #[serde(default)]
    pub component_sets: HashMap<String, ComponentSetMeta>,
    #[serde(default)]
    pub styles: HashMap<String, StyleMeta>,
}

/// File-level component table entry, keyed by node id.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentMeta {
    #[serde(default)]
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub component_set_id: Option<String>,
}

/// File-level component-set table entry.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSetMeta {
    #[serde(default)]
    pub key: String,
    pub name: String,
}

/// File-level named-style table entry.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleMeta {
    #[serde(default)]
    pub key: String,
    pub name: String,
    /// FILL, TEXT, EFFECT, or GRID
    #[serde(default)]
    pub style_type: String,
}

/// Raw node data from the API.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub children: Vec<NodeData>,
    pub absolute_bounding_box: Option<Bounds>,
    #[serde(default)]
    pub fills: Vec<PaintData>,
    #[serde(default)]
    pub strokes: Vec<PaintData>,
    /// Text nodes: base typography for the whole node
    pub style: Option<TypeStyle>,
    /// Per-character style override ids; non-empty means the node
    /// deviates from its base style somewhere
    #[serde(default)]
    pub character_style_overrides: Vec<u32>,
    #[serde(default)]
    pub style_override_table: HashMap<String, TypeStyle>,
    /// Map from style slot ("fill", "stroke", "text", "effect") to the
    /// referenced named-style id
    #[serde(default)]
    pub styles: HashMap<String, String>,
    /// Instances: id of the main component
    pub component_id: Option<String>,
    pub characters: Option<String>,
}

/// Bounding box coordinates.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Paint/fill data.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaintData {
    #[serde(rename = "type")]
    pub paint_type: String,
    #[serde(default = "default_true")]
    pub visible: bool,
    pub opacity: Option<f32>,
    pub color: Option<ColorData>,
}

/// RGBA color, 0.0-1.0 channels.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct ColorData {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Typography attributes of a text node or override entry.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TypeStyle {
    pub font_family: Option<String>,
    pub font_weight: Option<f32>,
    pub font_size: Option<f32>,
    #[serde(default)]
    pub italic: bool,
}

/// Response from the nodes endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodesResponse {
    #[serde(default)]
    pub nodes: HashMap<String, NodeWrapper>,
}

/// Wrapper containing the document (and local tables) for one node.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeWrapper {
    pub document: NodeData,
    #[serde(default)]
    pub components: HashMap<String, ComponentMeta>,
    #[serde(default)]
    pub component_sets: HashMap<String, ComponentSetMeta>,
    #[serde(default)]
    pub styles: HashMap<String, StyleMeta>,
}

/// Response from the images export endpoint.
#[derive(Debug, Deserialize)]
pub struct ImageResponse {
    #[serde(default)]
    pub images: HashMap<String, String>,
    #[serde(default)]
    pub err: Option<String>,
}
