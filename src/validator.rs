// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Semantic checks applied to a decoded and normalized configuration.
//!
//! Checks run in a fixed order: the root rule, then discovery jobs, then
//! static jobs, with metrics checked in order inside each job. Messages name
//! the offending entry by kind, index and, when known, its type or name.

use tracing::{debug, warn};

use crate::{
    config::{DiscoveryJob, Metric, ScrapeConfig, StaticJob},
    error::Error,
    services::is_supported_service,
};

/// Message returned when the document defines no jobs at all.
pub const EMPTY_CONFIGURATION: &str = "At least 1 Discovery job or 1 Static must be defined";

/// How violations are reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq,)]
pub enum ValidationMode
{
    /// Stop at the first violation.
    #[default]
    FailFast,
    /// Record the first violation of every job and metric, then fail with all
    /// of them joined into one message.
    Collect,
}

/// Outcome of a successful validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq,)]
pub struct ValidationReport
{
    /// Non-fatal findings, already emitted through `tracing`.
    pub warnings: Vec<String,>,
}

/// Walks a [`ScrapeConfig`] and enforces its structural rules.
///
/// # Examples
///
/// ```
/// use scrapeconf::{ScrapeConfig, Validator};
///
/// let error = Validator::new().validate(&ScrapeConfig::default(),).unwrap_err();
/// assert!(error.to_string().contains("At least 1 Discovery job or 1 Static must be defined"));
/// ```
#[derive(Debug, Clone, Copy, Default,)]
pub struct Validator
{
    mode: ValidationMode,
}

impl Validator
{
    /// Creates a fail-fast validator.
    pub fn new() -> Self
    {
        Self::default()
    }

    /// Selects how violations are reported.
    pub fn with_mode(mut self, mode: ValidationMode,) -> Self
    {
        self.mode = mode;
        self
    }

    /// Validates `config`, returning the warnings raised along the way.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`](Error::Validation) describing the first
    /// violation, or every violation joined by `"; "` in
    /// [`ValidationMode::Collect`].
    pub fn validate(&self, config: &ScrapeConfig,) -> Result<ValidationReport, Error,>
    {
        let mut pass = Pass {
            mode: self.mode, errors: Vec::new(), report: ValidationReport::default(),
        };

        if config.is_empty() {
            return Err(Error::validation(EMPTY_CONFIGURATION,),);
        }

        for (index, job,) in config.discovery.jobs.iter().enumerate() {
            if pass.record(check_discovery_job(job, index,),)? {
                let parent = format!("Discovery job [{}/{index}]", job.service_type);
                for (metric_index, metric,) in job.metrics.iter().enumerate() {
                    let period = job.effective_period(metric,);
                    let length = job.effective_length(metric,);
                    pass.record_metric(check_metric(metric, metric_index, &parent, period, length,),)?;
                }
            }
        }

        for (index, job,) in config.static_jobs.iter().enumerate() {
            if pass.record(check_static_job(job, index,),)? {
                let parent = format!("Static job [{}/{index}]", job.name);
                for (metric_index, metric,) in job.metrics.iter().enumerate() {
                    pass.record_metric(check_metric(
                        metric,
                        metric_index,
                        &parent,
                        metric.period,
                        metric.length,
                    ),)?;
                }
            }
        }

        pass.finish()
    }
}

struct Pass
{
    mode:   ValidationMode,
    errors: Vec<String,>,
    report: ValidationReport,
}

impl Pass
{
    /// Returns `Ok(true)` when the entry passed and its children should be
    /// visited.
    fn record(&mut self, outcome: Result<(), String,>,) -> Result<bool, Error,>
    {
        match outcome {
            Ok((),) => Ok(true,),
            Err(message,) => match self.mode {
                ValidationMode::FailFast => Err(Error::validation(message,),),
                ValidationMode::Collect => {
                    debug!("recorded violation: {}", message);
                    self.errors.push(message,);
                    Ok(false,)
                }
            },
        }
    }

    fn record_metric(&mut self, outcome: Result<Option<String,>, String,>,) -> Result<(), Error,>
    {
        match outcome {
            Ok(Some(warning,),) => {
                warn!("{}", warning);
                self.report.warnings.push(warning,);
                Ok((),)
            }
            Ok(None,) => Ok((),),
            Err(message,) => self.record(Err(message,),).map(|_| (),),
        }
    }

    fn finish(self,) -> Result<ValidationReport, Error,>
    {
        if self.errors.is_empty() {
            Ok(self.report,)
        } else {
            Err(Error::validation(self.errors.join("; ",),),)
        }
    }
}

fn check_discovery_job(job: &DiscoveryJob, index: usize,) -> Result<(), String,>
{
    if job.service_type.is_empty() {
        return Err(format!("Discovery job [{index}]: Type should not be empty"),);
    }
    if !is_supported_service(&job.service_type,) {
        return Err(format!(
            "Discovery job [{index}]: Service is not in known list!: {}",
            job.service_type
        ),);
    }
    if job.regions.is_empty() {
        return Err(format!(
            "Discovery job [{}/{index}]: Regions should not be empty",
            job.service_type
        ),);
    }
    if job.metrics.is_empty() {
        return Err(format!(
            "Discovery job [{}/{index}]: Metrics should not be empty",
            job.service_type
        ),);
    }
    Ok((),)
}

fn check_static_job(job: &StaticJob, index: usize,) -> Result<(), String,>
{
    if job.name.is_empty() {
        return Err(format!("Static job [{index}]: Name should not be empty"),);
    }
    if job.namespace.is_empty() {
        return Err(format!("Static job [{}/{index}]: Namespace should not be empty", job.name),);
    }
    if job.regions.is_empty() {
        return Err(format!("Static job [{}/{index}]: Regions should not be empty", job.name),);
    }
    Ok((),)
}

/// Checks one metric against its already resolved period and length.
///
/// Returns `Ok(Some(_))` with a warning when the length is shorter than the
/// period.
fn check_metric(
    metric: &Metric,
    index: usize,
    parent: &str,
    period: i64,
    length: i64,
) -> Result<Option<String,>, String,>
{
    let prefix = format!("Metric [{}/{index}] in {parent}", metric.name);

    if metric.name.is_empty() {
        return Err(format!("{prefix}: Name should not be empty"),);
    }
    if metric.statistics.is_empty() {
        return Err(format!("{prefix}: Statistics should not be empty"),);
    }
    if period < 1 {
        return Err(format!("{prefix}: Period value should be a positive integer"),);
    }
    if length < period {
        return Ok(Some(format!(
            "{prefix}: length({length}) is smaller than period({period}). This can cause that \
             the data requested is not ready and generate data gaps"
        ),),);
    }
    Ok(None,)
}
