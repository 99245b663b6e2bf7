use std::path::Path;

use anyhow::{Context, Result};
use xp_core::DetectorConfig;

use crate::AnalyzeArgs;

/// Read a detector config from a TOML file.
pub fn load_config_file(path: &Path) -> Result<DetectorConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("Failed to parse config file {}", path.display()))
}

/// Defaults, then the TOML file, then command-line flags.
pub fn resolve_config(args: &AnalyzeArgs) -> Result<DetectorConfig> {
    let mut config = match &args.config {
        Some(path) => load_config_file(path)?,
        None => DetectorConfig::default(),
    };
    if let Some(t) = args.threshold {
        config.title_similarity_threshold = t;
    }
    if let Some(limit) = args.candidate_limit {
        config.candidate_limit = Some(limit);
    }
    if let Some(score_fn) = args.score_fn {
        config.score_fn = score_fn.into();
    }
    if let Some(n) = args.min_word_length {
        config.min_word_length = n;
    }
    if let Some(n) = args.top_n {
        config.top_n = n;
    }
    if let Some(min) = args.min_score {
        config.min_score = Some(min);
    }
    config.validate().context("Invalid detector configuration")?;
    Ok(config)
}
