// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Configuration document types describing metrics scrape jobs.
//!
//! The types in this module mirror the structure of the YAML documents
//! consumed by the loader. Every field is optional at the decoding stage:
//! missing values take their zero value (empty collection, empty string,
//! `0`, `false`) and are judged later by the validator. Unknown keys are
//! ignored so newer documents still decode.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Root configuration document.
///
/// # Examples
///
/// ```
/// use scrapeconf::ScrapeConfig;
///
/// let yaml = r#"
/// discovery:
///   jobs:
///     - type: ec2
///       regions: [eu-west-1]
///       metrics:
///         - name: CPUUtilization
///           statistics: [Average]
///           period: 300
/// "#;
/// let config: ScrapeConfig = serde_yaml::from_str(yaml,).expect("valid configuration",);
/// assert_eq!(config.discovery.jobs.len(), 1);
/// assert!(config.static_jobs.is_empty());
/// ```
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq,)]
#[serde(default)]
pub struct ScrapeConfig
{
    /// Rules for auto-discovered resources.
    #[serde(deserialize_with = "null_as_default")]
    pub discovery:   Discovery,

    /// Explicitly named resources.
    #[serde(rename = "static", deserialize_with = "null_as_default")]
    pub static_jobs: Vec<StaticJob,>,
}

impl ScrapeConfig
{
    /// Returns `true` when neither discovery jobs nor static jobs are present.
    pub fn is_empty(&self,) -> bool
    {
        self.discovery.jobs.is_empty() && self.static_jobs.is_empty()
    }
}

/// Discovery block grouping auto-discovery jobs.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq,)]
#[serde(default, rename_all = "camelCase")]
pub struct Discovery
{
    /// Resource tags exported as metric labels, keyed by service type.
    #[serde(deserialize_with = "null_as_default")]
    pub exported_tags_on_metrics: BTreeMap<String, Vec<String,>,>,

    /// Discovery jobs in document order.
    #[serde(deserialize_with = "null_as_default")]
    pub jobs: Vec<DiscoveryJob,>,
}

impl Discovery
{
    /// Tag names exported as labels for the given service type.
    pub fn exported_tags(&self, service_type: &str,) -> &[String]
    {
        self.exported_tags_on_metrics.get(service_type,).map(Vec::as_slice,).unwrap_or_default()
    }
}

/// One class of resources found through discovery.
///
/// Job-level `period`, `length` and `delay` act as defaults for metrics that
/// leave the corresponding value at zero. They are resolved on read through
/// [`DiscoveryJob::effective_period`] and friends and never copied into the
/// metric.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq,)]
#[serde(default, rename_all = "camelCase")]
pub struct DiscoveryJob
{
    /// Regions searched for resources.
    #[serde(deserialize_with = "null_as_default")]
    pub regions: Vec<String,>,

    /// Service type identifier, checked against the supported catalog.
    #[serde(rename = "type")]
    pub service_type: String,

    /// Credential roles to assume; `""` means the ambient identity.
    #[serde(deserialize_with = "null_as_default")]
    pub role_arns: Vec<String,>,

    /// Dimension names used to filter discovered metrics.
    #[serde(deserialize_with = "null_as_default")]
    pub aws_dimensions: Vec<String,>,

    /// Tags a resource must carry to be selected.
    #[serde(deserialize_with = "null_as_default")]
    pub search_tags: Vec<Tag,>,

    /// Tags attached to every exported series.
    #[serde(deserialize_with = "null_as_default")]
    pub custom_tags: Vec<Tag,>,

    /// Metrics to query for each discovered resource.
    #[serde(deserialize_with = "null_as_default")]
    pub metrics: Vec<Metric,>,

    /// Default lookback length in seconds.
    #[serde(deserialize_with = "null_as_default")]
    pub length: i64,

    /// Default reporting delay in seconds.
    #[serde(deserialize_with = "null_as_default")]
    pub delay: i64,

    /// Default sampling period in seconds.
    #[serde(deserialize_with = "null_as_default")]
    pub period: i64,

    /// Tag exported samples with the provider timestamp.
    #[serde(deserialize_with = "null_as_default")]
    pub add_cloudwatch_timestamp: bool,
}

impl DiscoveryJob
{
    /// Period used for `metric`: its own value, or this job's when zero.
    pub fn effective_period(&self, metric: &Metric,) -> i64
    {
        inherit(metric.period, self.period,)
    }

    /// Lookback length used for `metric`: its own value, or this job's when
    /// zero.
    pub fn effective_length(&self, metric: &Metric,) -> i64
    {
        inherit(metric.length, self.length,)
    }

    /// Reporting delay used for `metric`: its own value, or this job's when
    /// zero.
    pub fn effective_delay(&self, metric: &Metric,) -> i64
    {
        inherit(metric.delay, self.delay,)
    }
}

/// An explicitly named resource.
///
/// Static jobs have no job-level defaults, so every metric must carry its own
/// period.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq,)]
#[serde(default, rename_all = "camelCase")]
pub struct StaticJob
{
    /// Identifier of the resource.
    pub name: String,

    /// Regions the resource lives in.
    #[serde(deserialize_with = "null_as_default")]
    pub regions: Vec<String,>,

    /// Credential roles to assume; `""` means the ambient identity.
    #[serde(deserialize_with = "null_as_default")]
    pub role_arns: Vec<String,>,

    /// Metric namespace queried for the resource.
    pub namespace: String,

    /// Tags attached to every exported series.
    #[serde(deserialize_with = "null_as_default")]
    pub custom_tags: Vec<Tag,>,

    /// Fixed dimensions identifying the resource.
    #[serde(deserialize_with = "null_as_default")]
    pub dimensions: Vec<Dimension,>,

    /// Metrics to query.
    #[serde(deserialize_with = "null_as_default")]
    pub metrics: Vec<Metric,>,
}

/// A single metric query.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq,)]
#[serde(default, rename_all = "camelCase")]
pub struct Metric
{
    /// Metric name.
    pub name: String,

    /// Aggregations requested, e.g. `Average` or `Sum`.
    #[serde(deserialize_with = "null_as_default")]
    pub statistics: Vec<String,>,

    /// Extra dimension filters.
    #[serde(deserialize_with = "null_as_default")]
    pub additional_dimensions: Vec<Dimension,>,

    /// Sampling period in seconds; `0` inherits from a discovery job.
    #[serde(deserialize_with = "null_as_default")]
    pub period: i64,

    /// Lookback length in seconds; `0` inherits from a discovery job.
    #[serde(deserialize_with = "null_as_default")]
    pub length: i64,

    /// Reporting delay in seconds; `0` inherits from a discovery job.
    #[serde(deserialize_with = "null_as_default")]
    pub delay: i64,

    /// Report missing datapoints as zero instead of dropping them.
    #[serde(deserialize_with = "null_as_default")]
    pub nil_to_zero: bool,

    /// Tag exported samples with the provider timestamp.
    #[serde(deserialize_with = "null_as_default")]
    pub add_cloudwatch_timestamp: bool,
}

/// Dimension name/value pair.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq,)]
#[serde(default)]
pub struct Dimension
{
    /// Dimension name.
    pub name:  String,
    /// Dimension value.
    pub value: String,
}

/// Resource tag as written in the document (`Key`/`Value`).
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq,)]
#[serde(default, rename_all = "PascalCase")]
pub struct Tag
{
    /// Tag key.
    pub key:   String,
    /// Tag value or pattern.
    pub value: String,
}

fn inherit(own: i64, fallback: i64,) -> i64
{
    if own == 0 { fallback } else { own }
}

/// Treats an explicit YAML `null` the same as an omitted key.
fn null_as_default<'de, D, T,>(deserializer: D,) -> Result<T, D::Error,>
where
    D: Deserializer<'de,>,
    T: Deserialize<'de,> + Default,
{
    Ok(Option::<T,>::deserialize(deserializer,)?.unwrap_or_default(),)
}

#[cfg(test)]
mod tests
{
    use super::{DiscoveryJob, Metric, ScrapeConfig, Tag};

    #[test]
    fn decodes_documented_field_names()
    {
        let yaml = r#"
discovery:
  exportedTagsOnMetrics:
    ec2: [Name, Team]
  jobs:
    - type: ec2
      regions: [us-east-1, eu-west-1]
      roleArns: ["arn:aws:iam::123456789012:role/reader"]
      awsDimensions: [InstanceId]
      searchTags:
        - Key: env
          Value: prod
      customTags:
        - Key: team
          Value: core
      period: 60
      length: 120
      delay: 30
      addCloudwatchTimestamp: true
      metrics:
        - name: CPUUtilization
          statistics: [Average, Maximum]
          nilToZero: true
          additionalDimensions:
            - name: AutoScalingGroupName
              value: web
static:
  - name: queue
    namespace: AWS/SQS
    regions: [us-east-1]
    dimensions:
      - name: QueueName
        value: jobs
    metrics:
      - name: NumberOfMessagesSent
        statistics: [Sum]
        period: 300
        length: 300
"#;

        let config: ScrapeConfig = serde_yaml::from_str(yaml,).expect("document should decode",);
        let job = &config.discovery.jobs[0];
        assert_eq!(job.service_type, "ec2");
        assert_eq!(job.regions, vec!["us-east-1", "eu-west-1"]);
        assert_eq!(job.role_arns.len(), 1);
        assert_eq!(job.aws_dimensions, vec!["InstanceId"]);
        assert_eq!(job.search_tags, vec![Tag {
            key: "env".to_owned(), value: "prod".to_owned(),
        }]);
        assert_eq!(job.custom_tags[0].key, "team");
        assert_eq!((job.period, job.length, job.delay), (60, 120, 30));
        assert!(job.add_cloudwatch_timestamp);

        let metric = &job.metrics[0];
        assert!(metric.nil_to_zero);
        assert!(!metric.add_cloudwatch_timestamp);
        assert_eq!(metric.additional_dimensions[0].value, "web");

        assert_eq!(config.discovery.exported_tags("ec2"), ["Name", "Team"]);
        assert!(config.discovery.exported_tags("rds").is_empty());

        let static_job = &config.static_jobs[0];
        assert_eq!(static_job.namespace, "AWS/SQS");
        assert_eq!(static_job.dimensions[0].name, "QueueName");
        assert_eq!(static_job.metrics[0].period, 300);
    }

    #[test]
    fn missing_fields_take_zero_values()
    {
        let yaml = r#"
static:
  - name: only-a-name
"#;

        let config: ScrapeConfig = serde_yaml::from_str(yaml,).expect("document should decode",);
        let job = &config.static_jobs[0];
        assert!(job.namespace.is_empty());
        assert!(job.regions.is_empty());
        assert!(job.role_arns.is_empty());
        assert!(job.metrics.is_empty());
        assert!(config.discovery.jobs.is_empty());
    }

    #[test]
    fn unknown_fields_are_ignored()
    {
        let yaml = r#"
apiVersion: v1alpha1
discovery:
  futureOption: true
  jobs:
    - type: s3
      regions: [us-east-1]
      somethingNew: [1, 2, 3]
      metrics:
        - name: BucketSizeBytes
          statistics: [Average]
          unit: Bytes
"#;

        let config: ScrapeConfig = serde_yaml::from_str(yaml,).expect("unknown keys should be skipped",);
        assert_eq!(config.discovery.jobs[0].metrics[0].name, "BucketSizeBytes");
    }

    #[test]
    fn explicit_nulls_decode_as_empty()
    {
        let yaml = r#"
discovery:
  jobs: ~
static:
"#;

        let config: ScrapeConfig = serde_yaml::from_str(yaml,).expect("nulls should decode",);
        assert!(config.is_empty());
    }

    #[test]
    fn empty_scalars_decode_as_zero_values()
    {
        let yaml = r#"
discovery:
  jobs:
    - type: ec2
      period: 300
      length: ~
      delay:
      addCloudwatchTimestamp:
      metrics:
        - name: CPUUtilization
          period:
          nilToZero: ~
          addCloudwatchTimestamp:
"#;

        let config: ScrapeConfig = serde_yaml::from_str(yaml,).expect("empty scalars should decode",);
        let job = &config.discovery.jobs[0];
        assert_eq!((job.length, job.delay), (0, 0));
        assert!(!job.add_cloudwatch_timestamp);

        let metric = &job.metrics[0];
        assert_eq!(metric.period, 0);
        assert!(!metric.nil_to_zero);
        assert!(!metric.add_cloudwatch_timestamp);
        assert_eq!(job.effective_period(metric), 300);
    }

    #[test]
    fn type_mismatch_is_a_decode_error()
    {
        let yaml = r#"
static:
  - name: x
    metrics:
      - name: m
        period: five-minutes
"#;

        assert!(serde_yaml::from_str::<ScrapeConfig,>(yaml,).is_err());
    }

    #[test]
    fn discovery_metric_inherits_only_zero_values()
    {
        let job = DiscoveryJob {
            period: 300, length: 600, delay: 120, ..DiscoveryJob::default()
        };
        let unset = Metric::default();
        let explicit = Metric {
            period: 60, length: 60, delay: 10, ..Metric::default()
        };

        assert_eq!(job.effective_period(&unset), 300);
        assert_eq!(job.effective_length(&unset), 600);
        assert_eq!(job.effective_delay(&unset), 120);
        assert_eq!(job.effective_period(&explicit), 60);
        assert_eq!(job.effective_length(&explicit), 60);
        assert_eq!(job.effective_delay(&explicit), 10);
    }

    #[test]
    fn negative_metric_values_are_not_replaced()
    {
        let job = DiscoveryJob {
            period: 300, ..DiscoveryJob::default()
        };
        let metric = Metric {
            period: -5, ..Metric::default()
        };

        assert_eq!(job.effective_period(&metric), -5);
    }
}
