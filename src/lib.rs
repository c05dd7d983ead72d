//! Loader and validator for metrics scrape job configurations.
//!
//! A configuration document lists resources to monitor, either as discovery
//! rules matched against a service type or as statically named resources.
//! [`load_config`] reads such a YAML document, fills in context dependent
//! defaults and rejects incomplete job descriptions before any scraping
//! starts. Risky but legal settings are reported as `tracing` warnings.

mod config;
mod error;
mod normalizer;
mod services;
mod validator;

pub use config::{Dimension, Discovery, DiscoveryJob, Metric, ScrapeConfig, StaticJob, Tag};
pub use error::{Error, io_error};
pub use normalizer::{
    AMBIENT_ROLE, LoadOptions, LoadedConfig, load_config, load_config_with, parse_config,
    parse_config_with,
};
pub use services::{SUPPORTED_SERVICES, is_supported_service};
pub use validator::{EMPTY_CONFIGURATION, ValidationMode, ValidationReport, Validator};
