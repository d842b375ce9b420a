//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading benefit
//! policies from YAML files.

use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{BenefitConfig, BenefitPolicy, SchemeMetadata};

/// Loads and provides access to benefit configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/
/// ├── scheme.yaml          # Scheme metadata
/// └── policies/
///     └── 2023-08-01.yaml  # Policy effective from this date
/// ```
///
/// # Example
///
/// ```no_run
/// use childcare_benefit_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config").unwrap();
///
/// let date = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
/// let policy = loader.policy_for(date).unwrap();
/// println!("Standard daily wage cap: {}", policy.standard_upper_limit);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: BenefitConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any loaded policy fails [`BenefitPolicy::validate`]
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let scheme_path = path.join("scheme.yaml");
        let metadata = Self::load_yaml::<SchemeMetadata>(&scheme_path)?;

        let policies_dir = path.join("policies");
        let policies = Self::load_policies(&policies_dir)?;

        debug!(
            scheme = %metadata.code,
            policies = policies.len(),
            "Loaded benefit configuration"
        );

        Ok(Self {
            config: BenefitConfig::new(metadata, policies),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads and validates all policy files from the policies directory.
    fn load_policies(policies_dir: &Path) -> EngineResult<Vec<BenefitPolicy>> {
        let policies_dir_str = policies_dir.display().to_string();

        if !policies_dir.exists() {
            return Err(EngineError::ConfigNotFound {
                path: policies_dir_str,
            });
        }

        let entries = fs::read_dir(policies_dir).map_err(|_| EngineError::ConfigNotFound {
            path: policies_dir_str.clone(),
        })?;

        let mut policies = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: policies_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let policy = Self::load_yaml::<BenefitPolicy>(&path)?;
                policy.validate()?;
                policies.push(policy);
            }
        }

        if policies.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no policy files found)", policies_dir_str),
            });
        }

        Ok(policies)
    }

    /// Returns the underlying benefit configuration.
    pub fn config(&self) -> &BenefitConfig {
        &self.config
    }

    /// Returns the scheme metadata.
    pub fn scheme(&self) -> &SchemeMetadata {
        self.config.scheme()
    }

    /// Gets the policy in force on a given date.
    ///
    /// Finds the most recent policy whose effective date is on or before
    /// `date`; callers normally pass the leave start date.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use childcare_benefit_engine::config::ConfigLoader;
    /// use chrono::NaiveDate;
    ///
    /// let loader = ConfigLoader::load("./config")?;
    /// let date = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
    /// let policy = loader.policy_for(date)?;
    /// # Ok::<(), childcare_benefit_engine::error::EngineError>(())
    /// ```
    pub fn policy_for(&self, date: NaiveDate) -> EngineResult<&BenefitPolicy> {
        self.config
            .policies()
            .iter()
            .rfind(|p| p.effective_date <= date)
            .ok_or(EngineError::PolicyNotFound { date })
    }
}
