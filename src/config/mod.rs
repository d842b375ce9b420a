//! Configuration loading and management for the Childcare Benefit Engine.
//!
//! This module provides functionality to load benefit policies from YAML
//! files. Each policy carries the wage limits, rates and caps in force from
//! its effective date.
//!
//! # Example
//!
//! ```no_run
//! use childcare_benefit_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config").unwrap();
//! println!("Loaded scheme: {}", config.scheme().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{BenefitConfig, BenefitPolicy, SchemeMetadata};
