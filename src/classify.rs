//! Per-node decision functions: the visibility/size gate and the
//! component-vs-icon heuristic.
//!
//! Two icon rules coexist on purpose. The strict rule (word-boundary
//! match) runs during extraction; the relaxed rule (substring
//! fallback) runs during aggregation so that records produced at
//! different times reconcile under one consistent split. Unifying the
//! two would reclassify names like `iconography_panel` between the
//! per-frame and summary views.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Token boundaries: start/end of string, underscore, hyphen, slash,
/// whitespace.
fn icon_word_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)(^|[_\-/\s])(ic|icon)([_\-/\s]|$)").expect("icon pattern compiles")
    })
}

/// Whether a node participates in extraction at all.
///
/// Invisible nodes and nodes whose width and height both round below
/// one layout unit are skipped. This is a noise filter for sub-pixel
/// decorative artifacts, not a correctness requirement.
pub fn passes_visibility_gate(visible: bool, width: f32, height: f32) -> bool {
    if !visible {
        return false;
    }
    width.round() >= 1.0 || height.round() >= 1.0
}

/// Resolved component definition attributes fed to the classifier.
#[derive(Debug, Clone, Default)]
pub struct ComponentFacts<'a> {
    pub name: &'a str,
    /// Name of the parent variant set, if the component belongs to one
    pub set_name: Option<&'a str>,
    pub variant_properties: Option<&'a BTreeMap<String, String>>,
}

/// Strict classification used during extraction.
///
/// `ic`/`icon` must appear as a whole word in the component's own name
/// or its set's name; failing that, any variant-property key or value
/// containing `icon` as a substring also qualifies. Size is never a
/// deciding factor.
pub fn is_icon(facts: &ComponentFacts<'_>) -> bool {
    if icon_word_pattern().is_match(facts.name) {
        return true;
    }
    if let Some(set_name) = facts.set_name {
        if icon_word_pattern().is_match(set_name) {
            return true;
        }
    }

    if let Some(props) = facts.variant_properties {
        for (key, value) in props {
            if key.to_lowercase().contains("icon") || value.to_lowercase().contains("icon") {
                return true;
            }
        }
    }

    false
}

/// Relaxed classification used by the aggregator's reconciliation
/// pass.
///
/// Trusts a pre-existing icon flag, applies the strict word rule, and
/// additionally accepts `icon` as a bare substring so compound
/// identifiers reconcile consistently.
pub fn is_icon_relaxed(already_icon: bool, names: &[&str]) -> bool {
    if already_icon {
        return true;
    }
    names.iter().any(|name| {
        icon_word_pattern().is_match(name) || name.to_lowercase().contains("icon")
    })
}
