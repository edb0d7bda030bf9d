//! Configuration persistence for nazotte settings

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// How a finished drag path is turned into a selection polygon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClosurePolicy {
    /// Convex hull of every collected point (concavity is lost)
    #[default]
    ConvexHull,
    /// The drawn ring itself; falls back to the convex hull when it crosses itself
    Drawn,
}

impl ClosurePolicy {
    /// Get the config/CLI name for this policy
    pub fn name(self) -> &'static str {
        match self {
            ClosurePolicy::ConvexHull => "convex_hull",
            ClosurePolicy::Drawn => "drawn",
        }
    }
}

impl FromStr for ClosurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "convex_hull" => Ok(ClosurePolicy::ConvexHull),
            "drawn" => Ok(ClosurePolicy::Drawn),
            _ => Err(format!("unknown closure policy '{s}' (expected convex_hull or drawn)")),
        }
    }
}

/// Point-in-polygon algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainmentMethod {
    /// Integer winding number, inside when non-zero
    #[default]
    WindingNumber,
    /// Sum of signed subtended angles, inside when |sum| > π
    AngleSum,
}

impl ContainmentMethod {
    /// Get the config/CLI name for this method
    pub fn name(self) -> &'static str {
        match self {
            ContainmentMethod::WindingNumber => "winding_number",
            ContainmentMethod::AngleSum => "angle_sum",
        }
    }
}

impl FromStr for ContainmentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "winding_number" => Ok(ContainmentMethod::WindingNumber),
            "angle_sum" => Ok(ContainmentMethod::AngleSum),
            _ => Err(format!(
                "unknown containment method '{s}' (expected winding_number or angle_sum)"
            )),
        }
    }
}

/// Application configuration persisted between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NazotteConfig {
    /// Polygon closure policy applied at gesture end
    pub closure: ClosurePolicy,
    /// Point-in-polygon algorithm used for candidates
    pub containment: ContainmentMethod,
    /// Don't send a query when the gesture produced no usable polygon
    pub skip_degenerate_queries: bool,
    /// Capacity of the channel carrying query responses back to the session
    pub query_channel_capacity: usize,
}

impl Default for NazotteConfig {
    fn default() -> Self {
        Self {
            closure: ClosurePolicy::ConvexHull,
            containment: ContainmentMethod::WindingNumber,
            // The listing backend is queried even for empty selections
            skip_degenerate_queries: false,
            query_channel_capacity: 32,
        }
    }
}

impl NazotteConfig {
    /// Configuration directory name
    pub const ID: &'static str = "nazotte";

    /// Default location of the config file
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::ID).join("config.json"))
    }

    /// Load configuration from disk, or return defaults if unavailable
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            log::warn!("No config directory available, using defaults");
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Error loading config, using defaults: {:?}", err);
                Self::default()
            }
        }
    }

    /// Save configuration to disk
    pub fn save(&self) {
        let Some(path) = Self::path() else {
            log::error!("No config directory available for saving");
            return;
        };
        if let Err(err) = self.save_to(&path) {
            log::error!("Failed to save config: {:?}", err);
        }
    }

    /// Read a config file at an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Write a config file at an explicit path, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config dir: {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = NazotteConfig {
            closure: ClosurePolicy::Drawn,
            containment: ContainmentMethod::AngleSum,
            skip_degenerate_queries: true,
            query_channel_capacity: 4,
        };
        config.save_to(&path).unwrap();
        assert_eq!(NazotteConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "closure": "drawn" }"#).unwrap();
        let config = NazotteConfig::load_from(&path).unwrap();
        assert_eq!(config.closure, ClosurePolicy::Drawn);
        assert_eq!(config.containment, ContainmentMethod::WindingNumber);
        assert!(!config.skip_degenerate_queries);
        assert_eq!(config.query_channel_capacity, 32);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();
        let err = NazotteConfig::load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config file"));
    }

    #[test]
    fn test_names_match_serde() {
        for policy in [ClosurePolicy::ConvexHull, ClosurePolicy::Drawn] {
            let json = serde_json::to_string(&policy).unwrap();
            assert_eq!(json, format!("\"{}\"", policy.name()));
        }
        for method in [ContainmentMethod::WindingNumber, ContainmentMethod::AngleSum] {
            let json = serde_json::to_string(&method).unwrap();
            assert_eq!(json, format!("\"{}\"", method.name()));
        }
        assert_eq!("drawn".parse::<ClosurePolicy>(), Ok(ClosurePolicy::Drawn));
        assert_eq!(
            "angle_sum".parse::<ContainmentMethod>(),
            Ok(ContainmentMethod::AngleSum)
        );
        assert!("lasso".parse::<ClosurePolicy>().is_err());
    }
}
