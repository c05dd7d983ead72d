// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Closed catalog of service types that discovery jobs may target.

/// Service identifiers accepted in `discovery.jobs[].type`.
///
/// The slice is kept in byte-wise ascending order so membership can be tested
/// with a binary search. Matching is exact and case-sensitive.
pub const SUPPORTED_SERVICES: &[&str] = &[
    "alb",
    "apigateway",
    "appsync",
    "asg",
    "cf",
    "docdb",
    "dynamodb",
    "ebs",
    "ec",
    "ec2",
    "ec2Spot",
    "ecs-containerinsights",
    "ecs-svc",
    "efs",
    "elb",
    "emr",
    "es",
    "firehose",
    "fsx",
    "gamelift",
    "kafka",
    "kinesis",
    "lambda",
    "ngw",
    "nlb",
    "r53r",
    "rds",
    "redshift",
    "s3",
    "sfn",
    "sns",
    "sqs",
    "tgw",
    "tgwa",
    "vpn",
    "wafv2",
];

/// Returns `true` when `service` names a supported discovery target.
///
/// # Examples
///
/// ```
/// use scrapeconf::is_supported_service;
///
/// assert!(is_supported_service("ec2"));
/// assert!(!is_supported_service("EC2"));
/// ```
pub fn is_supported_service(service: &str,) -> bool
{
    SUPPORTED_SERVICES.binary_search(&service,).is_ok()
}

#[cfg(test)]
mod tests
{
    use proptest::prelude::*;

    use super::{SUPPORTED_SERVICES, is_supported_service};

    #[test]
    fn catalog_is_sorted_and_unique()
    {
        assert!(SUPPORTED_SERVICES.windows(2,).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn every_listed_service_is_supported()
    {
        for service in SUPPORTED_SERVICES {
            assert!(is_supported_service(service), "{service} should be supported");
        }
    }

    #[test]
    fn rejects_unknown_and_differently_cased_identifiers()
    {
        assert!(!is_supported_service("notarealservice"));
        assert!(!is_supported_service("Lambda"));
        assert!(!is_supported_service("ec2spot"));
        assert!(!is_supported_service(""));
        assert!(!is_supported_service(" ec2"));
    }

    proptest! {
        #[test]
        fn membership_matches_linear_scan(input in "[a-zA-Z0-9-]{0,24}") {
            let expected = SUPPORTED_SERVICES.iter().any(|service| *service == input);
            prop_assert_eq!(is_supported_service(&input), expected);
        }

        #[test]
        fn uppercased_catalog_entries_are_rejected(index in 0..SUPPORTED_SERVICES.len()) {
            let upper = SUPPORTED_SERVICES[index].to_ascii_uppercase();
            prop_assert!(!is_supported_service(&upper));
        }
    }
}
