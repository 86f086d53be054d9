//! Engine configuration
//!
//! All settings have defaults, so a configuration file only needs the values it changes:
//! ```toml
//! log_filter = "graphkit=debug"
//!
//! [hybrid]
//! density_factor = 1.5
//!
//! [codec]
//! header = false
//! ```

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    error::{GraphError, Result},
    repr::{HybridGraph, HybridPolicy},
};

/// Output options shared by the graph6 and sparse6 writers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Write the `>>graph6<<` / `>>sparse6<<` header
    pub header: bool,
    /// End every file with `\n`
    pub trailing_newline: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            header: true,
            trailing_newline: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// When a [`HybridGraph`] switches representations
    pub hybrid: HybridPolicy,
    pub codec: CodecConfig,
    /// Default filter of [`init_logging`](crate::logging::init_logging)
    pub log_filter: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hybrid: HybridPolicy::default(),
            codec: CodecConfig::default(),
            log_filter: "graphkit=info".to_string(),
        }
    }
}

impl EngineConfig {
    /// Parses and validates a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig =
            toml::from_str(content).map_err(|err| GraphError::InvalidConfig(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|err| GraphError::io(path, err))?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|err| GraphError::InvalidConfig(format!("failed to serialize config: {err}")))
    }

    /// Save configuration to a file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_toml_string()?).map_err(|err| GraphError::io(path, err))
    }

    /// Creates an empty [`HybridGraph`] following this configuration
    pub fn hybrid_graph(&self) -> HybridGraph {
        HybridGraph::with_policy(self.hybrid)
    }

    fn validate(&self) -> Result<()> {
        let factor = self.hybrid.density_factor;
        if !factor.is_finite() || factor <= 0.0 {
            return Err(GraphError::InvalidConfig(format!(
                "hybrid.density_factor must be positive, found {factor}"
            )));
        }
        if self.log_filter.trim().is_empty() {
            return Err(GraphError::InvalidConfig("log_filter must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::{error::Severity, ops::Graph, repr::Representation};

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.hybrid, HybridPolicy::default());
        assert_eq!(config.hybrid.density_factor, 1.1);
        assert_eq!(config.hybrid.min_nodes, 3);
        assert!(config.codec.header);
        assert!(config.codec.trailing_newline);
        assert_eq!(config.log_filter, "graphkit=info");

        assert_eq!(EngineConfig::from_toml_str("").unwrap(), config);
    }

    #[test]
    fn test_partial_config() {
        let config = EngineConfig::from_toml_str(
            "log_filter = \"graphkit=debug\"\n[hybrid]\nmin_nodes = 10\n[codec]\nheader = false\n",
        )
        .unwrap();
        assert_eq!(config.hybrid.min_nodes, 10);
        assert_eq!(config.hybrid.density_factor, 1.1);
        assert!(!config.codec.header);
        assert!(config.codec.trailing_newline);
        assert_eq!(config.log_filter, "graphkit=debug");

        let graph = config.hybrid_graph();
        assert_eq!(graph.policy().min_nodes, 10);
        assert_eq!(graph.representation(), Representation::Matrix);
    }

    #[test]
    fn test_invalid_config() {
        for content in [
            "[hybrid]\ndensity_factor = -1.0",
            "[hybrid]\nmin_nodes = \"three\"",
            "log_filter = \" \"",
            "not toml at all",
        ] {
            let err = EngineConfig::from_toml_str(content).unwrap_err();
            assert!(matches!(err, GraphError::InvalidConfig(_)), "{content}");
            assert_eq!(err.severity(), Severity::Elevated);
        }
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("graphkit.toml");

        let config = EngineConfig {
            codec: CodecConfig {
                header: false,
                trailing_newline: false,
            },
            ..Default::default()
        };
        config.save(&path).unwrap();
        assert_eq!(EngineConfig::from_file(&path).unwrap(), config);

        assert!(matches!(
            EngineConfig::from_file(dir.path().join("missing.toml")),
            Err(GraphError::Io { .. })
        ));
    }
}
