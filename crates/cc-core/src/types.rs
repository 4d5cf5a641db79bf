use serde::Serialize;

/// Top-level ordered rule sequence parsed from CSS text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stylesheet {
    pub rules: Vec<Rule>,
}

/// One rule of a stylesheet or media body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Rule {
    Style(StyleRule),
    FontFace(StyleRule),
    Media(MediaRule),
    Keyframes(KeyframesRule),
    Import(String),
    Charset(String),
}

/// Selector list plus declaration block. Also carries `@font-face`
/// bodies, which parse with the marker as their single selector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleRule {
    pub selectors: Vec<String>,
    pub declarations: Vec<Declaration>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaRule {
    pub condition: String,
    pub rules: Vec<Rule>,
}

/// `@keyframes` block. The vendor prefix (`-webkit-` etc.) is kept
/// verbatim and never merged across vendors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyframesRule {
    pub name: String,
    pub vendor: Option<String>,
    pub keyframes: Vec<Keyframe>,
}

/// A single frame: `from`, `to` or `N%` selectors plus declarations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Keyframe {
    pub selectors: Vec<String>,
    pub declarations: Vec<Declaration>,
}

/// Property/value pair. `index` is the pre-sort position, used only to
/// break sort ties between declarations of the same property.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Declaration {
    pub property: String,
    pub value: String,
    pub index: usize,
}

impl Declaration {
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
            index: 0,
        }
    }
}

/// Canonical cache key for a declaration list: the ordered
/// property/value pairs, nothing else. Two rules merge when their keys
/// are equal, so `index` must stay out of it.
pub fn declarations_key(declarations: &[Declaration]) -> String {
    let pairs: Vec<(&str, &str)> = declarations
        .iter()
        .map(|d| (d.property.as_str(), d.value.as_str()))
        .collect();
    serde_json::to_string(&pairs).unwrap_or_default()
}

/// Canonical cache key for a selector list.
pub fn selectors_key(selectors: &[String]) -> String {
    serde_json::to_string(selectors).unwrap_or_default()
}
