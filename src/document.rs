//! Loaded-document wrapper: typed scene trees plus the lookup index,
//! and the selection preconditions checked before any extraction work
//! starts.

use crate::error::{DsaError, Result};
use crate::figma::{
    build_document_index, build_scene_tree, DocumentIndex, FileResponse,
};
use crate::types::{NodeKind, SceneNode};

/// A design document ready for analysis.
pub struct LoadedDocument {
    pub name: String,
    pub index: DocumentIndex,
    /// Root of the converted scene tree (the document node)
    pub root: SceneNode,
}

impl LoadedDocument {
    pub fn from_file_response(file: &FileResponse) -> Self {
        let index = build_document_index(file);
        let root = build_scene_tree(&file.document);
        Self {
            name: file.name.clone(),
            index,
            root,
        }
    }

    /// Resolve the frames to analyze.
    ///
    /// With explicit ids, each must exist (a stale id is a root-access
    /// failure) and must be an analyzable frame. Without ids, all
    /// top-level frames of the first page are selected; an empty
    /// document is a selection error. All precondition failures are
    /// reported before any extraction starts.
    pub fn select_frames(&self, node_ids: &[String]) -> Result<Vec<&SceneNode>> {
        if node_ids.is_empty() {
            let frames = self.top_level_frames();
            if frames.is_empty() {
                return Err(DsaError::selection(
                    "No frames found in the document; nothing to analyze",
                ));
            }
            return Ok(frames);
        }

        let mut frames = Vec::with_capacity(node_ids.len());
        for id in node_ids {
            let node = find_node(&self.root, id).ok_or_else(|| {
                DsaError::RootAccess(format!(
                    "node {id} is not reachable in document '{}'",
                    self.name
                ))
            })?;
            check_analyzable(node)?;
            frames.push(node);
        }
        Ok(frames)
    }

    /// Top-level frames of the first page.
    fn top_level_frames(&self) -> Vec<&SceneNode> {
        let Some(page) = self
            .root
            .children
            .iter()
            .find(|child| matches!(child.kind, NodeKind::Container))
        else {
            return Vec::new();
        };

        page.children
            .iter()
            .filter(|child| matches!(child.kind, NodeKind::Container))
            .collect()
    }
}

fn check_analyzable(node: &SceneNode) -> Result<()> {
    if !matches!(node.kind, NodeKind::Container) {
        return Err(DsaError::selection(format!(
            "'{}' is not a frame; select frames or groups",
            node.name
        )));
    }
    if node.children.is_empty() {
        return Err(DsaError::selection(format!(
            "frame '{}' is empty; nothing to analyze",
            node.name
        )));
    }
    Ok(())
}

fn find_node<'n>(node: &'n SceneNode, id: &str) -> Option<&'n SceneNode> {
    if node.id == id {
        return Some(node);
    }
    node.children.iter().find_map(|child| find_node(child, id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document() -> LoadedDocument {
        let file: FileResponse = serde_json::from_value(serde_json::json!({
            "name": "HMI Screens",
            "document": {
                "id": "0:0",
                "name": "Document",
                "type": "DOCUMENT",
                "children": [{
                    "id": "0:1",
                    "name": "Page 1",
                    "type": "CANVAS",
                    "children": [
                        {
                            "id": "1:1",
                            "name": "Home",
                            "type": "FRAME",
                            "children": [
                                {"id": "1:2", "name": "bg", "type": "RECTANGLE"}
                            ]
                        },
                        {
                            "id": "1:3",
                            "name": "Empty",
                            "type": "FRAME"
                        },
                        {"id": "1:4", "name": "loose text", "type": "TEXT"}
                    ]
                }]
            }
        }))
        .unwrap();
        LoadedDocument::from_file_response(&file)
    }

    #[test]
    fn default_selection_takes_top_level_frames() {
        let doc = document();
        let frames = doc.select_frames(&[]).unwrap();
        let names: Vec<&str> = frames.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Home", "Empty"]);
    }

    #[test]
    fn stale_id_is_a_root_access_error() {
        let doc = document();
        assert!(matches!(
            doc.select_frames(&["9:9".to_string()]),
            Err(DsaError::RootAccess(_))
        ));
    }

    #[test]
    fn non_frame_selection_is_rejected() {
        let doc = document();
        assert!(matches!(
            doc.select_frames(&["1:4".to_string()]),
            Err(DsaError::Selection(_))
        ));
    }

    #[test]
    fn empty_frame_selection_is_rejected() {
        let doc = document();
        assert!(matches!(
            doc.select_frames(&["1:3".to_string()]),
            Err(DsaError::Selection(_))
        ));
    }

    #[test]
    fn explicit_selection_resolves_nested_ids() {
        let doc = document();
        let frames = doc.select_frames(&["1:1".to_string()]).unwrap();
        assert_eq!(frames[0].name, "Home");
    }
}
