// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Loading pipeline: read, decode, normalize, validate.
//!
//! Each call produces a fresh [`ScrapeConfig`] owned by the caller. Nothing is
//! cached between calls, so loading the same document twice yields two equal
//! trees.

use std::{fs, path::Path};

use tracing::{debug, info};

use crate::{
    config::ScrapeConfig,
    error::{self, Error},
    validator::{ValidationMode, Validator},
};

/// Credential role meaning "use the ambient identity of the process".
pub const AMBIENT_ROLE: &str = "";

/// Options controlling a load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq,)]
pub struct LoadOptions
{
    /// How validation violations are reported.
    pub mode: ValidationMode,
}

/// A validated configuration together with the warnings raised while
/// validating it.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct LoadedConfig
{
    /// Normalized and validated configuration.
    pub config:   ScrapeConfig,
    /// Non-fatal findings, also emitted through `tracing`.
    pub warnings: Vec<String,>,
}

impl ScrapeConfig
{
    /// Fills in defaults that depend on surrounding context.
    ///
    /// Jobs without credential roles receive a single [`AMBIENT_ROLE`]. No
    /// other value is rewritten; period and length inheritance is resolved on
    /// read by [`DiscoveryJob`](crate::DiscoveryJob).
    pub fn normalize(&mut self,)
    {
        let discovery = self.discovery.jobs.iter_mut().map(|job| &mut job.role_arns,);
        let statics = self.static_jobs.iter_mut().map(|job| &mut job.role_arns,);
        for roles in discovery.chain(statics,) {
            if roles.is_empty() {
                roles.push(AMBIENT_ROLE.to_owned(),);
            }
        }
    }
}

/// Loads a configuration from the provided YAML file path.
///
/// # Errors
///
/// Returns [`Error::Io`](Error::Io) when the file cannot be read,
/// [`Error::Parse`](Error::Parse) when it cannot be decoded, and
/// [`Error::Validation`](Error::Validation) when it violates a rule.
pub fn load_config(path: &Path,) -> Result<ScrapeConfig, Error,>
{
    load_config_with(path, LoadOptions::default(),).map(|loaded| loaded.config,)
}

/// Loads a configuration file using explicit [`LoadOptions`].
///
/// # Errors
///
/// Same as [`load_config`].
pub fn load_config_with(path: &Path, options: LoadOptions,) -> Result<LoadedConfig, Error,>
{
    debug!("Reading config from {}", path.display());
    let contents = fs::read_to_string(path,).map_err(|source| error::io_error(path, source,),)?;
    parse_config_with(&contents, options,)
}

/// Parses a configuration from the provided YAML document string.
///
/// # Examples
///
/// ```
/// use scrapeconf::parse_config;
///
/// let yaml = r#"
/// static:
///   - name: orders
///     namespace: AWS/SQS
///     regions: [us-east-1]
///     metrics:
///       - name: NumberOfMessagesSent
///         statistics: [Sum]
///         period: 60
///         length: 60
/// "#;
/// let config = parse_config(yaml,)?;
/// assert_eq!(config.static_jobs[0].role_arns, vec![String::new()]);
/// # Ok::<(), scrapeconf::Error>(())
/// ```
///
/// # Errors
///
/// Propagates [`Error::Parse`](Error::Parse) when the YAML cannot be decoded
/// and [`Error::Validation`](Error::Validation) when a rule is violated.
pub fn parse_config(contents: &str,) -> Result<ScrapeConfig, Error,>
{
    parse_config_with(contents, LoadOptions::default(),).map(|loaded| loaded.config,)
}

/// Parses a configuration document using explicit [`LoadOptions`].
///
/// # Errors
///
/// Same as [`parse_config`].
pub fn parse_config_with(contents: &str, options: LoadOptions,) -> Result<LoadedConfig, Error,>
{
    debug!("Parsing YAML configuration");
    let mut config: ScrapeConfig = serde_yaml::from_str(contents,)?;
    config.normalize();

    let report = Validator::new().with_mode(options.mode,).validate(&config,)?;
    info!(
        "Loaded {} discovery job(s) and {} static job(s) with {} warning(s)",
        config.discovery.jobs.len(),
        config.static_jobs.len(),
        report.warnings.len()
    );

    Ok(LoadedConfig {
        config,
        warnings: report.warnings,
    },)
}
