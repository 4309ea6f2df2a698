//! Figma host adapter: REST API client, raw payload types, and
//! conversion into the typed scene model.

pub mod api_types;
mod client;
mod conversion;

pub use api_types::{FileResponse, NodeData, NodesResponse};
pub use client::{FigmaAuth, FigmaClient};
pub use conversion::{
    build_document_index, build_scene_tree, font_style_name, merge_node_tables,
    parse_variant_properties, DocumentIndex, IndexedComponent, IndexedStyle,
};
