//! Shared types for the CSS condenser.

pub mod config;
pub mod error;
pub mod types;

pub use config::Options;
pub use error::{CondenseError, Result};
pub use types::{
    Declaration, Keyframe, KeyframesRule, MediaRule, Rule, StyleRule, Stylesheet,
};
