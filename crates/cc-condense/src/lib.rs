//! CSS condenser — parses a stylesheet, consolidates equivalent rules,
//! compresses property values and serializes the result.
//!
//! Stages:
//! 1. Bang-comment extraction and IE5/Mac hack protection (`comments`)
//! 2. Comment stripping
//! 3. Parse (`cc-parser`)
//! 4. Consolidation passes per context (`context`)
//! 5. Serialization, compact or readable (`stringify`)

pub mod comments;
pub mod context;
pub mod pipeline;
pub mod stringify;
pub mod values;

pub use pipeline::{compress, CondensePipeline, CondenseResult};

#[cfg(test)]
mod tests;
