//! Session configuration assembled from a TOML file and command-line flags.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use maze_explorer_core::SessionConfig;

/// Flag values that override the configuration file.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Overrides {
    pub(crate) constrained: bool,
    pub(crate) seed: Option<u64>,
    pub(crate) width: Option<u32>,
    pub(crate) height: Option<u32>,
    pub(crate) reward_probability: Option<f64>,
}

/// Loads the base configuration and applies flag overrides.
///
/// Without a file the constrained or standard preset is used. Values present
/// in the file replace the preset's.
pub(crate) fn resolve(path: Option<&Path>, overrides: Overrides) -> Result<SessionConfig> {
    let mut config = match path {
        Some(path) => load(path)?,
        None if overrides.constrained => SessionConfig::constrained(),
        None => SessionConfig::standard(),
    };

    if let Some(seed) = overrides.seed {
        config.seed = seed;
    }
    if let Some(width) = overrides.width {
        config.width = width;
    }
    if let Some(height) = overrides.height {
        config.height = height;
    }
    if let Some(probability) = overrides.reward_probability {
        config.reward_probability = probability;
    }

    config
        .validate()
        .context("session configuration is invalid")?;
    Ok(config)
}

fn load(path: &Path) -> Result<SessionConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read session config {}", path.display()))?;
    parse(&contents).with_context(|| format!("failed to parse session config {}", path.display()))
}

fn parse(contents: &str) -> Result<SessionConfig> {
    let config: SessionConfig =
        toml::from_str(contents).context("failed to parse session config toml contents")?;
    Ok(config)
}
