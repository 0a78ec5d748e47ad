//! Configuration management for the magician
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. Environment variables (MAGICIAN_*)
//! 2. Config file (~/.config/magician/config.toml)
//! 3. Default values

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::membership::{TrustedContributors, DEFAULT_MEMBER_ORGS};
use crate::rotation::ReviewerRotation;
use crate::{Error, Result};

/// Where the reviewer rotation comes from
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RotationConfig {
    /// Rotation document path; the embedded document is used when unset
    pub path: Option<PathBuf>,
}

/// Contributor classification settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MembershipConfig {
    /// Organizations whose members count as Googlers
    pub orgs: Vec<String>,

    /// Handles trusted in addition to the built-in allowlist
    pub trusted_contributors: Vec<String>,
}

impl Default for MembershipConfig {
    fn default() -> Self {
        Self {
            orgs: DEFAULT_MEMBER_ORGS.iter().map(|org| org.to_string()).collect(),
            trusted_contributors: Vec::new(),
        }
    }
}

/// Repository the bot works on
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GitHubConfig {
    pub owner: String,
    pub repo: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            owner: "GoogleCloudPlatform".to_string(),
            repo: "magic-modules".to_string(),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub rotation: RotationConfig,
    pub membership: MembershipConfig,
    pub github: GitHubConfig,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();

        if let Some(path) = config_path {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        let config = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/magician/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("magician").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - MAGICIAN_ROTATION_PATH: Reviewer rotation document
    /// - MAGICIAN_GITHUB_OWNER: Repository owner
    /// - MAGICIAN_GITHUB_REPO: Repository name
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(path) = std::env::var("MAGICIAN_ROTATION_PATH") {
            if !path.is_empty() {
                self.rotation.path = Some(PathBuf::from(path));
            }
        }

        if let Ok(owner) = std::env::var("MAGICIAN_GITHUB_OWNER") {
            self.github.owner = owner;
        }

        if let Ok(repo) = std::env::var("MAGICIAN_GITHUB_REPO") {
            self.github.repo = repo;
        }

        self
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: env > config file > defaults
    pub fn load_with_overrides() -> Result<Self> {
        Ok(Self::load()?.with_env_overrides())
    }

    /// Load the configured reviewer rotation
    pub fn load_rotation(&self) -> Result<ReviewerRotation> {
        match &self.rotation.path {
            Some(path) => ReviewerRotation::load(path),
            None => ReviewerRotation::embedded(),
        }
    }

    /// Built-in trusted contributors plus configured ones
    pub fn trusted_contributors(&self) -> TrustedContributors {
        TrustedContributors::builtin()
            .with_handles(self.membership.trusted_contributors.iter().cloned())
    }
}
