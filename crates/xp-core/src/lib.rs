//! Data model, configuration and errors shared by the crosspost detector.

pub mod config;
pub mod error;
pub mod post;
pub mod types;

pub use config::{Blocking, DetectorConfig, ScoreFn};
pub use error::{Result, XpError};
pub use post::Post;
pub use types::*;

#[cfg(test)]
mod tests;
