//! Scene-tree node model used by the extractor.
//!
//! Design files are converted into this closed set of node kinds
//! before analysis. Each kind exposes only the fields it legitimately
//! has; the extractor pattern-matches on the kind instead of probing
//! for property presence.

use serde::{Deserialize, Serialize};

/// A single node in an analyzed design subtree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneNode {
    /// Host-assigned node id, unique within one document
    pub id: String,
    /// Display name as authored in the design tool
    pub name: String,
    pub kind: NodeKind,
    pub visible: bool,
    pub width: f32,
    pub height: f32,
    /// Solid/gradient/image paints applied as fills
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fills: Vec<Paint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub strokes: Vec<Paint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_style_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_style_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effect_style_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SceneNode>,
}

/// Closed set of node kinds relevant to extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NodeKind {
    /// Frames, groups, sections, component definitions
    Container,
    /// Text layers with font attributes
    Text(TextAttrs),
    /// Vector shapes, rectangles, ellipses, lines
    Shape,
    /// Placements of a reusable component definition
    Instance(InstanceAttrs),
}

/// Font attributes carried by a text node.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAttrs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<FontName>,
    pub font_size: FontSize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_style_id: Option<String>,
}

/// Reference from an instance to its component definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceAttrs {
    /// Id of the main component; resolution may still fail if the
    /// definition lives in an inaccessible external library
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_id: Option<String>,
}

/// Family + style pair as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontName {
    pub family: String,
    pub style: String,
}

/// Resolved font size of a text node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FontSize {
    /// Single concrete pixel size
    Px(f32),
    /// The node spans multiple sizes
    Mixed,
    /// Size could not be resolved
    Unknown,
}

impl FontSize {
    /// Display label used in identity keys and export key synthesis.
    pub fn label(&self) -> String {
        match self {
            FontSize::Px(v) => {
                if (v.fract()).abs() < f32::EPSILON {
                    format!("{}", *v as i64)
                } else {
                    format!("{v}")
                }
            }
            FontSize::Mixed => "Mixed".to_string(),
            FontSize::Unknown => "Unknown".to_string(),
        }
    }

    pub fn as_px(&self) -> Option<f32> {
        match self {
            FontSize::Px(v) => Some(*v),
            _ => None,
        }
    }
}

/// A single paint entry from a fill or stroke list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paint {
    pub kind: PaintKind,
    pub visible: bool,
    /// 0.0-1.0; 1.0 when the host omits it
    pub opacity: f32,
    /// Solid paints carry a color; gradients and images do not
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<PaintColor>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaintKind {
    Solid,
    Gradient,
    Image,
}

/// RGB color of a solid paint, 0.0-1.0 channels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PaintColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl SceneNode {
    /// Count of this node plus all descendants, ignoring visibility.
    pub fn subtree_size(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(SceneNode::subtree_size)
            .sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_size_labels() {
        assert_eq!(FontSize::Px(24.0).label(), "24");
        assert_eq!(FontSize::Px(13.5).label(), "13.5");
        assert_eq!(FontSize::Mixed.label(), "Mixed");
        assert_eq!(FontSize::Unknown.label(), "Unknown");
    }

    #[test]
    fn subtree_size_counts_all_descendants() {
        let leaf = SceneNode {
            id: "2".into(),
            name: "leaf".into(),
            kind: NodeKind::Shape,
            visible: true,
            width: 10.0,
            height: 10.0,
            fills: vec![],
            strokes: vec![],
            fill_style_id: None,
            stroke_style_id: None,
            effect_style_id: None,
            children: vec![],
        };
        let root = SceneNode {
            id: "1".into(),
            name: "root".into(),
            kind: NodeKind::Container,
            visible: true,
            width: 100.0,
            height: 100.0,
            fills: vec![],
            strokes: vec![],
            fill_style_id: None,
            stroke_style_id: None,
            effect_style_id: None,
            children: vec![leaf.clone(), leaf],
        };
        assert_eq!(root.subtree_size(), 3);
    }
}
