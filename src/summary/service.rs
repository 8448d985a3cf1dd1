//! AWS service classification for Terraform resource types.
//!
//! Maps a resource type such as `aws_s3_bucket` to the platform subsystem
//! it belongs to (`s3`). The alias table is process-wide constant
//! configuration; it has no lifecycle beyond process start.

/// Vendor prefix carried by all platform resource types.
const AWS_PREFIX: &str = "aws_";

/// Service bucket for resource types outside the platform prefix.
pub const OTHER_SERVICE: &str = "other";

/// Alias table grouping resource-type tokens into service names.
///
/// Multi-token aliases (e.g. `security_group`) are matched against the
/// leading two tokens of the stripped resource type before the single
/// first token is tried.
const SERVICE_ALIASES: &[(&str, &str)] = &[
    ("instance", "ec2"),
    ("vpc", "vpc"),
    ("subnet", "vpc"),
    ("internet_gateway", "vpc"),
    ("nat_gateway", "vpc"),
    ("route_table", "vpc"),
    ("security_group", "ec2"),
    ("s3", "s3"),
    ("iam", "iam"),
    ("lambda", "lambda"),
    ("cloudwatch", "cloudwatch"),
    ("rds", "rds"),
    ("dynamodb", "dynamodb"),
    ("kinesis", "kinesis"),
    ("glue", "glue"),
    ("athena", "athena"),
    ("msk", "msk"),
    ("mwaa", "mwaa"),
    ("step_functions", "stepfunctions"),
    ("kms", "kms"),
    ("secretsmanager", "secretsmanager"),
    ("ssm", "ssm"),
    ("cloudtrail", "cloudtrail"),
    ("config", "config"),
    ("guardduty", "guardduty"),
    ("cloudformation", "cloudformation"),
    ("route53", "route53"),
    ("acm", "acm"),
    ("waf", "waf"),
    ("apigateway", "apigateway"),
    ("cognito", "cognito"),
    ("sns", "sns"),
    ("sqs", "sqs"),
    ("elasticsearch", "elasticsearch"),
    ("opensearch", "opensearch"),
];

/// Derives the service name for a Terraform resource type.
///
/// Types outside the `aws_` prefix classify as [`OTHER_SERVICE`]. Within
/// the prefix, the leading tokens are matched against the alias table;
/// unknown platform services fall back to their own first token verbatim so
/// they group under their literal name rather than being lumped together.
#[must_use]
pub fn service_name(resource_type: &str) -> &str {
    let Some(rest) = resource_type.strip_prefix(AWS_PREFIX) else {
        return OTHER_SERVICE;
    };

    let first = rest.split('_').next().unwrap_or(rest);

    // Two-token aliases first: "security_group", "route_table", ...
    if let Some(second) = rest.split('_').nth(1) {
        let two = &rest[..first.len() + 1 + second.len()];
        if let Some(service) = lookup(two) {
            return service;
        }
    }

    lookup(first).unwrap_or(first)
}

/// Looks up a token in the alias table.
fn lookup(token: &str) -> Option<&'static str> {
    SERVICE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == token)
        .map(|(_, service)| *service)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliased_first_token() {
        assert_eq!(service_name("aws_instance"), "ec2");
        assert_eq!(service_name("aws_subnet"), "vpc");
        assert_eq!(service_name("aws_s3_bucket"), "s3");
        assert_eq!(service_name("aws_lambda_function"), "lambda");
    }

    #[test]
    fn test_two_token_aliases() {
        assert_eq!(service_name("aws_security_group"), "ec2");
        assert_eq!(service_name("aws_security_group_rule"), "ec2");
        assert_eq!(service_name("aws_route_table_association"), "vpc");
        assert_eq!(service_name("aws_internet_gateway"), "vpc");
        assert_eq!(service_name("aws_nat_gateway"), "vpc");
        assert_eq!(service_name("aws_step_functions_state_machine"), "stepfunctions");
    }

    #[test]
    fn test_non_platform_type_is_other() {
        assert_eq!(service_name("custom_widget"), "other");
        assert_eq!(service_name("google_compute_instance"), "other");
        assert_eq!(service_name("null_resource"), "other");
    }

    #[test]
    fn test_unknown_platform_service_keeps_first_token() {
        assert_eq!(service_name("aws_unknown_thing"), "unknown");
        assert_eq!(service_name("aws_bedrock_agent"), "bedrock");
    }
}
