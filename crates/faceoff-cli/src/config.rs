//! Configuration loading from TOML files.
//!
//! Lookup order:
//! 1. `$FACEOFF_CONFIG` environment variable
//! 2. `~/.config/faceoff/config.toml`
//! 3. Built-in defaults (everything is optional)

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub comparison: ComparisonConfig,
    pub ranking: RankingConfig,
}

/// Pairwise comparison settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ComparisonConfig {
    /// Score deltas below this count as ties.
    pub epsilon: f64,
    /// Matchup highlights to surface.
    pub highlight_limit: usize,
}

/// Bradley–Terry solver settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    pub max_iterations: usize,
    pub tolerance: f64,
}

// --- Defaults ---

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            epsilon: faceoff_core::DEFAULT_EPSILON,
            highlight_limit: faceoff_core::DEFAULT_HIGHLIGHT_LIMIT,
        }
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        let defaults = faceoff_core::SolverOptions::default();
        Self {
            max_iterations: defaults.max_iterations,
            tolerance: defaults.tolerance,
        }
    }
}

/// Load config from disk. Returns defaults if no config file exists.
pub fn load_config() -> Result<Config> {
    let path = config_path();

    if let Some(p) = &path {
        if p.exists() {
            let content =
                std::fs::read_to_string(p).with_context(|| format!("reading {}", p.display()))?;
            let config: Config =
                toml::from_str(&content).with_context(|| format!("parsing {}", p.display()))?;
            return Ok(config);
        }
    }

    Ok(Config::default())
}

/// Resolve the config file path.
fn config_path() -> Option<PathBuf> {
    // 1. Environment variable
    if let Ok(p) = std::env::var("FACEOFF_CONFIG") {
        return Some(PathBuf::from(p));
    }

    // 2. ~/.config/faceoff/config.toml
    if let Some(home) = dirs_home() {
        let p = home.join(".config").join("faceoff").join("config.toml");
        return Some(p);
    }

    None
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}

/// Show the active config path (for `faceoff config`).
pub fn show_config_path() -> String {
    match config_path() {
        Some(p) if p.exists() => format!("{} (loaded)", p.display()),
        Some(p) => format!("{} (not found, using defaults)", p.display()),
        None => "no config path resolved (using defaults)".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.comparison.epsilon, 1e-6);
        assert_eq!(config.comparison.highlight_limit, 3);
        assert_eq!(config.ranking.max_iterations, 200);
    }

    #[test]
    fn test_parse_minimal_toml() {
        let toml_str = r#"
[comparison]
epsilon = 0.001
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.comparison.epsilon, 0.001);
        // Other fields should be defaults
        assert_eq!(config.comparison.highlight_limit, 3);
        assert_eq!(config.ranking.tolerance, 1e-6);
    }

    #[test]
    fn test_parse_full_toml() {
        let toml_str = r#"
[comparison]
epsilon = 0.0001
highlight_limit = 5

[ranking]
max_iterations = 500
tolerance = 1e-8
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.comparison.highlight_limit, 5);
        assert_eq!(config.ranking.max_iterations, 500);
        assert_eq!(config.ranking.tolerance, 1e-8);
    }
}
