//! Condense pipeline — stylesheet text in, condensed text out.

use crate::comments::{prepare, restore_ie5_hacks};
use crate::context::condense_context;
use crate::stringify::stringify;
use cc_core::Options;
use tracing::debug;

/// Condense result with statistics.
#[derive(Debug, Clone)]
pub struct CondenseResult {
    pub output: String,
    pub original_len: usize,
    pub condensed_len: usize,
    pub reduction_pct: f64,
}

impl CondenseResult {
    pub fn ratio(&self) -> f64 {
        if self.original_len == 0 {
            return 1.0;
        }
        self.condensed_len as f64 / self.original_len as f64
    }
}

/// The condenser pipeline.
pub struct CondensePipeline {
    pub options: Options,
}

impl CondensePipeline {
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    /// Run the full pipeline over one stylesheet.
    pub fn condense(&self, text: &str) -> CondenseResult {
        let original_len = text.len();

        let parts = prepare(text);

        let mut tree = cc_parser::parse(&parts.code);
        debug!(rules = tree.rules.len(), "parsed stylesheet");

        condense_context(&mut tree.rules, &self.options);
        debug!(rules = tree.rules.len(), "consolidated stylesheet");

        let mut output = if self.options.compress {
            stringify(&tree, true)
        } else {
            stringify(&tree, false).trim().to_string()
        };

        output = restore_ie5_hacks(&output);
        if self.options.line_breaks {
            output = output.replace('}', "}\n");
        }
        if self.options.debug {
            let dump = serde_json::to_string_pretty(&tree).unwrap_or_default();
            output = format!("/*\n{dump}\n*/\n{output}");
        }

        let mut full = parts.comments.concat();
        full.push_str(&output);

        let condensed_len = full.len();
        let reduction_pct = if original_len > 0 {
            (original_len.saturating_sub(condensed_len) as f64 / original_len as f64) * 100.0
        } else {
            0.0
        };
        debug!(original_len, condensed_len, "condense complete");

        CondenseResult {
            output: full,
            original_len,
            condensed_len,
            reduction_pct,
        }
    }
}

impl Default for CondensePipeline {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

/// Condense CSS text with the given options.
pub fn compress(text: &str, options: &Options) -> String {
    CondensePipeline::new(options.clone()).condense(text).output
}
