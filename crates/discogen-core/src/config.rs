//! Configuration management for discogen code generation.
//!
//! This module defines the `Config` struct and related functionality for
//! managing code generation settings. The configuration can be loaded from a
//! YAML file, created programmatically, or assembled from command-line
//! arguments.
//!
//! # Examples
//!
//! ```no_run
//! use discogen_core::config::Config;
//!
//! // Create a new config programmatically
//! let mut config = Config::new("my-client", "calendar.json", "output");
//! config.include_all = true;
//! ```

// Internal imports (std, crate)
use std::path::Path;

// External imports (alphabetized)
use serde::{Deserialize, Serialize};
use tokio::fs;
use url::Url;

/// Configuration for discogen client generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Project name
    pub project_name: String,

    /// Path to the discovery document
    pub discovery_doc_path: String,

    /// Output directory for generated code
    pub output_dir: String,

    /// Whether to include all resources by default
    #[serde(default)]
    pub include_all: bool,

    /// List of top-level resources to include (if include_all is false)
    #[serde(default)]
    pub include_resources: Vec<String>,

    /// List of top-level resources to exclude
    #[serde(default)]
    pub exclude_resources: Vec<String>,

    /// Base URI override for the generated service (Optional)
    pub base_url: Option<Url>,
}

impl Config {
    /// Create a new Config with default values
    pub fn new(
        project_name: impl Into<String>,
        discovery_doc_path: impl Into<String>,
        output_dir: impl Into<String>,
    ) -> Self {
        Self {
            project_name: project_name.into(),
            discovery_doc_path: discovery_doc_path.into(),
            output_dir: output_dir.into(),
            include_all: false,
            include_resources: Vec::new(),
            exclude_resources: Vec::new(),
            base_url: None,
        }
    }

    /// Load configuration from a file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = fs::read_to_string(path).await?;
        let config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a file
    pub async fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let content = serde_yaml::to_string(self)?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// Whether a top-level resource is selected for generation
    pub fn selects(&self, resource: &str) -> bool {
        if self.exclude_resources.iter().any(|r| r == resource) {
            return false;
        }
        self.include_all
            || self.include_resources.is_empty()
            || self.include_resources.iter().any(|r| r == resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_config_roundtrip() -> crate::Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("config.yaml");

        let config = Config::new("calendar-client", "calendar.json", "output");
        config.save(&file_path).await?;

        let loaded = Config::from_file(&file_path).await?;
        assert_eq!(loaded.project_name, "calendar-client");
        assert_eq!(loaded.discovery_doc_path, "calendar.json");
        assert_eq!(loaded.output_dir, "output");
        assert!(!loaded.include_all);
        assert_eq!(loaded.include_resources, Vec::<String>::new());
        assert_eq!(loaded.exclude_resources, Vec::<String>::new());
        assert_eq!(loaded.base_url, None);

        Ok(())
    }

    #[test]
    fn test_selects() {
        let mut config = Config::new("p", "d", "o");
        assert!(config.selects("events"));

        config.include_resources.push("events".to_string());
        assert!(config.selects("events"));
        assert!(!config.selects("calendars"));

        config.include_all = true;
        assert!(config.selects("calendars"));

        config.exclude_resources.push("calendars".to_string());
        assert!(!config.selects("calendars"));
    }
}
