//! Fragment values returned by segment functions.
//!
//! The cache layer stores and returns these verbatim; only the renderer
//! interprets highlight groups and gradient levels.

use serde::{Deserialize, Serialize};

/// One highlighted piece of a segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentPart {
    pub contents: String,
    /// Highlight groups, first match wins
    #[serde(default)]
    pub highlight_group: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub divider_highlight_group: Option<String>,
    /// Position on a color ramp, in [0, 100]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradient_level: Option<f64>,
}

impl SegmentPart {
    pub fn new(contents: impl Into<String>) -> Self {
        SegmentPart {
            contents: contents.into(),
            highlight_group: Vec::new(),
            divider_highlight_group: None,
            gradient_level: None,
        }
    }

    pub fn with_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.highlight_group = groups.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_divider(mut self, group: impl Into<String>) -> Self {
        self.divider_highlight_group = Some(group.into());
        self
    }

    pub fn with_gradient(mut self, level: f64) -> Self {
        self.gradient_level = Some(level);
        self
    }
}

/// A present segment value: plain text or highlighted parts.
///
/// Absence is `Option::None` at the segment boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Fragment {
    Text(String),
    Parts(Vec<SegmentPart>),
}

impl Fragment {
    pub fn text(text: impl Into<String>) -> Self {
        Fragment::Text(text.into())
    }

    pub fn part(part: SegmentPart) -> Self {
        Fragment::Parts(vec![part])
    }

    /// Concatenated contents, ignoring highlighting
    pub fn contents(&self) -> String {
        match self {
            Fragment::Text(text) => text.clone(),
            Fragment::Parts(parts) => parts.iter().map(|p| p.contents.as_str()).collect(),
        }
    }

    pub fn parts(&self) -> Option<&[SegmentPart]> {
        match self {
            Fragment::Text(_) => None,
            Fragment::Parts(parts) => Some(parts),
        }
    }
}
