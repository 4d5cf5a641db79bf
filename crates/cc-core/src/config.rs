use serde::{Deserialize, Serialize};

/// Pipeline options.
///
/// `safe` disables the three consolidation merges (media, declarations,
/// selectors) while still normalizing and compressing values. `sort`
/// gates selector and declaration sorting only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    pub compress: bool,
    pub safe: bool,
    pub sort: bool,
    pub line_breaks: bool,
    pub debug: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            compress: true,
            safe: false,
            sort: true,
            line_breaks: false,
            debug: false,
        }
    }
}

impl Options {
    /// Readable output instead of compact.
    pub fn pretty() -> Self {
        Self {
            compress: false,
            ..Self::default()
        }
    }

    /// No merging of structurally-equivalent rules.
    pub fn safe() -> Self {
        Self {
            safe: true,
            ..Self::default()
        }
    }
}
