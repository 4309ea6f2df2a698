//! Lookup layer between the extractor and the loaded document.
//!
//! Every host lookup returns `Result`; the extractor treats each `Err`
//! as "no contribution from this node for that facet". The recovery
//! policy lives in the extractor, visibly, instead of inside scattered
//! catch blocks.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

use crate::figma::DocumentIndex;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("component {0} is not in the document's component table")]
    UnknownComponent(String),

    #[error("style {0} is not in the document's style table")]
    UnknownStyle(String),

    #[error("style {id} is a {actual} style, expected {expected}")]
    StyleKindMismatch {
        id: String,
        expected: &'static str,
        actual: String,
    },
}

/// A component definition resolved to its top-level master.
#[derive(Debug, Clone)]
pub struct ComponentInfo {
    /// Persistent shared key; empty for purely local components
    pub key: String,
    pub id: String,
    pub name: String,
    /// Family name of the parent variant set, when there is one
    pub set_name: Option<String>,
    pub variant_properties: Option<BTreeMap<String, String>>,
}

impl ComponentInfo {
    /// Stable identity for dedup: the shared key, or the local id.
    pub fn stable_key(&self) -> String {
        if self.key.is_empty() {
            self.id.clone()
        } else {
            self.key.clone()
        }
    }
}

/// Named text style with the size it resolves to, if known.
#[derive(Debug, Clone)]
pub struct TextStyleInfo {
    pub name: String,
    pub font_size: Option<f32>,
}

/// Resolution interface the extractor depends on.
pub trait StyleResolver {
    fn resolve_component(&self, component_id: &str) -> Result<ComponentInfo, ResolutionError>;
    fn paint_style_name(&self, style_id: &str) -> Result<String, ResolutionError>;
    fn text_style(&self, style_id: &str) -> Result<TextStyleInfo, ResolutionError>;
    fn effect_style_name(&self, style_id: &str) -> Result<String, ResolutionError>;
}

/// Resolver over a fully-loaded document index.
///
/// Text-style lookups are memoized; repeated lookups for the same id
/// share the first computed result.
pub struct DocumentResolver<'a> {
    index: &'a DocumentIndex,
    text_style_cache: RefCell<HashMap<String, TextStyleInfo>>,
}

impl<'a> DocumentResolver<'a> {
    pub fn new(index: &'a DocumentIndex) -> Self {
        Self {
            index,
            text_style_cache: RefCell::new(HashMap::new()),
        }
    }
}

impl StyleResolver for DocumentResolver<'_> {
    fn resolve_component(&self, component_id: &str) -> Result<ComponentInfo, ResolutionError> {
        let meta = self
            .index
            .components
            .get(component_id)
            .ok_or_else(|| ResolutionError::UnknownComponent(component_id.to_string()))?;

        let set_name = meta
            .component_set_id
            .as_ref()
            .and_then(|set_id| self.index.component_sets.get(set_id))
            .cloned();

        Ok(ComponentInfo {
            key: meta.key.clone(),
            id: component_id.to_string(),
            name: meta.name.clone(),
            set_name,
            variant_properties: crate::figma::parse_variant_properties(&meta.name),
        })
    }

    fn paint_style_name(&self, style_id: &str) -> Result<String, ResolutionError> {
        let style = self
            .index
            .styles
            .get(style_id)
            .ok_or_else(|| ResolutionError::UnknownStyle(style_id.to_string()))?;
        if style.style_type != "FILL" {
            return Err(ResolutionError::StyleKindMismatch {
                id: style_id.to_string(),
                expected: "FILL",
                actual: style.style_type.clone(),
            });
        }
        Ok(style.name.clone())
    }

    fn text_style(&self, style_id: &str) -> Result<TextStyleInfo, ResolutionError> {
        if let Some(cached) = self.text_style_cache.borrow().get(style_id) {
            return Ok(cached.clone());
        }

        let style = self
            .index
            .styles
            .get(style_id)
            .ok_or_else(|| ResolutionError::UnknownStyle(style_id.to_string()))?;
        if style.style_type != "TEXT" {
            return Err(ResolutionError::StyleKindMismatch {
                id: style_id.to_string(),
                expected: "TEXT",
                actual: style.style_type.clone(),
            });
        }

        let info = TextStyleInfo {
            name: style.name.clone(),
            font_size: self.index.text_style_sizes.get(style_id).copied(),
        };
        self.text_style_cache
            .borrow_mut()
            .insert(style_id.to_string(), info.clone());
        Ok(info)
    }

    fn effect_style_name(&self, style_id: &str) -> Result<String, ResolutionError> {
        let style = self
            .index
            .styles
            .get(style_id)
            .ok_or_else(|| ResolutionError::UnknownStyle(style_id.to_string()))?;
        if style.style_type != "EFFECT" {
            return Err(ResolutionError::StyleKindMismatch {
                id: style_id.to_string(),
                expected: "EFFECT",
                actual: style.style_type.clone(),
            });
        }
        Ok(style.name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figma::{DocumentIndex, IndexedComponent, IndexedStyle};

    fn index_with_styles() -> DocumentIndex {
        let mut index = DocumentIndex::default();
        index.styles.insert(
            "s:fill".into(),
            IndexedStyle {
                name: "Primary Color".into(),
                style_type: "FILL".into(),
            },
        );
        index.styles.insert(
            "s:text".into(),
            IndexedStyle {
                name: "Body/Large".into(),
                style_type: "TEXT".into(),
            },
        );
        index.text_style_sizes.insert("s:text".into(), 18.0);
        index.components.insert(
            "c:1".into(),
            IndexedComponent {
                key: "sharedkey".into(),
                name: "State=Hover".into(),
                component_set_id: Some("set:1".into()),
            },
        );
        index.component_sets.insert("set:1".into(), "Button".into());
        index
    }

    #[test]
    fn resolves_component_through_variant_set() {
        let index = index_with_styles();
        let resolver = DocumentResolver::new(&index);
        let info = resolver.resolve_component("c:1").unwrap();
        assert_eq!(info.name, "State=Hover");
        assert_eq!(info.set_name.as_deref(), Some("Button"));
        assert_eq!(info.stable_key(), "sharedkey");
        assert_eq!(
            info.variant_properties.unwrap().get("State").unwrap(),
            "Hover"
        );
    }

    #[test]
    fn unknown_component_is_an_error() {
        let index = index_with_styles();
        let resolver = DocumentResolver::new(&index);
        assert!(matches!(
            resolver.resolve_component("missing"),
            Err(ResolutionError::UnknownComponent(_))
        ));
    }

    #[test]
    fn text_style_carries_learned_size() {
        let index = index_with_styles();
        let resolver = DocumentResolver::new(&index);
        let info = resolver.text_style("s:text").unwrap();
        assert_eq!(info.name, "Body/Large");
        assert_eq!(info.font_size, Some(18.0));
        // second lookup comes from the memo
        let again = resolver.text_style("s:text").unwrap();
        assert_eq!(again.name, "Body/Large");
    }

    #[test]
    fn kind_mismatch_is_an_error() {
        let index = index_with_styles();
        let resolver = DocumentResolver::new(&index);
        assert!(matches!(
            resolver.paint_style_name("s:text"),
            Err(ResolutionError::StyleKindMismatch { .. })
        ));
    }
}
