use regex::Regex;
use std::sync::LazyLock;

use crate::domain::{BucketName, Region, Tag, VALID_REGIONS};

static BUCKET_CHARSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9.-]*$").expect("bucket charset pattern"));
static IPV4_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\d+\.\d+\.\d+$").expect("ipv4 pattern"));
static TAG_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z_]+$").expect("tag name pattern"));
static TAG_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("tag value pattern"));

/// Checks that the region is one of the supported region codes
///
/// # Arguments
///
/// * `value` - Region code as typed on the command line
///
/// # Returns
///
/// * `Result<Region, String>` - The region or an error listing every allowed value
pub fn validate_aws_region(value: &str) -> Result<Region, String> {
    if VALID_REGIONS.contains(&value) {
        Ok(Region::new(value))
    } else {
        Err(format!(
            "Invalid AWS region. Allowed values are {}",
            VALID_REGIONS.join(", ")
        ))
    }
}

/// Checks the bucket naming rules and returns the first rule broken, if any.
///
/// Rules are checked in a fixed order so the reported message is stable.
#[must_use]
pub fn bucket_name_violation(value: &str) -> Option<&'static str> {
    if !(3..=63).contains(&value.len()) {
        return Some("Bucket name must be between 3 and 63 characters long.");
    }

    if !BUCKET_CHARSET.is_match(value) {
        return Some(
            "Bucket name can consist only of lowercase letters, numbers, dots (.), and hyphens (-).",
        );
    }

    let alnum = |c: Option<char>| c.is_some_and(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
    if !alnum(value.chars().next()) || !alnum(value.chars().last()) {
        return Some("Bucket name must begin and end with a letter or number.");
    }

    if value.contains("..") {
        return Some("Bucket name must not contain two adjacent periods.");
    }

    if IPV4_SHAPE.is_match(value) {
        return Some("Bucket name must not be formatted as an IP address.");
    }

    None
}

/// Checks a bucket name against [`bucket_name_violation`]
///
/// # Arguments
///
/// * `value` - Bucket name as typed on the command line
///
/// # Returns
///
/// * `Result<BucketName, String>` - The bucket name or the first broken rule
pub fn validate_bucket_name(value: &str) -> Result<BucketName, String> {
    match bucket_name_violation(value) {
        Some(msg) => Err(msg.to_string()),
        None => Ok(BucketName::new(value)),
    }
}

/// Parses a `TAG_NAME=TAG_VALUE` token
///
/// # Arguments
///
/// * `value` - A single tag token; exactly one `=` is allowed
///
/// # Returns
///
/// * `Result<Tag, String>` - The split tag or a description of what is wrong with it
pub fn validate_tag(value: &str) -> Result<Tag, String> {
    let parts: Vec<&str> = value.split('=').collect();
    let [name, tag_value] = parts.as_slice() else {
        return Err("Tags should be in the format TAG_NAME=TAG_VALUE.".to_string());
    };

    if !TAG_NAME.is_match(name) {
        return Err("TAG_NAME can have only alphabets and underscore.".to_string());
    }

    if !TAG_VALUE.is_match(tag_value) {
        return Err("TAG_VALUE can have only alphabets, numbers, and underscore.".to_string());
    }

    Ok(Tag::new(name, tag_value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_region_is_accepted_unchanged() {
        for region in VALID_REGIONS {
            let parsed = validate_aws_region(region).expect("listed region");
            assert_eq!(parsed.as_str(), region);
        }
    }

    #[test]
    fn region_error_lists_choices_in_order() {
        let err = validate_aws_region("US-EAST-1").unwrap_err();
        assert!(err.starts_with("Invalid AWS region. Allowed values are us-east-1, us-east-2, "));
        assert!(err.ends_with("il-central-1, af-south-1, ca-central-1"));
    }

    #[test]
    fn bucket_name_rules_in_order() {
        let too_long = "a".repeat(64);
        let cases = [
            ("ab", "between 3 and 63"),
            (too_long.as_str(), "between 3 and 63"),
            ("My-Bucket", "can consist only of"),
            ("bucket_name", "can consist only of"),
            ("-bucket", "begin and end"),
            ("bucket.", "begin and end"),
            ("my..bucket", "two adjacent periods"),
            ("192.168.1.10", "IP address"),
        ];
        for (name, expected) in cases {
            let msg = bucket_name_violation(name)
                .unwrap_or_else(|| panic!("{name} should be rejected"));
            assert!(msg.contains(expected), "{name}: {msg}");
        }
    }

    #[test]
    fn conforming_bucket_names_pass() {
        for name in ["abc", "my-test-bucket-1", "logs.example.com", "0bucket9"] {
            assert_eq!(bucket_name_violation(name), None, "{name}");
            assert_eq!(validate_bucket_name(name).unwrap().as_str(), name);
        }
        assert!(validate_bucket_name(&"a".repeat(63)).is_ok());
    }

    #[test]
    fn tag_needs_exactly_one_separator() {
        let format_err = "Tags should be in the format TAG_NAME=TAG_VALUE.";
        assert_eq!(validate_tag("BadTag").unwrap_err(), format_err);
        assert_eq!(validate_tag("a=b=c").unwrap_err(), format_err);
    }

    #[test]
    fn tag_charsets() {
        assert_eq!(
            validate_tag("Cost-Center=1").unwrap_err(),
            "TAG_NAME can have only alphabets and underscore."
        );
        assert_eq!(
            validate_tag("=Prod").unwrap_err(),
            "TAG_NAME can have only alphabets and underscore."
        );
        assert_eq!(
            validate_tag("Env=").unwrap_err(),
            "TAG_VALUE can have only alphabets, numbers, and underscore."
        );
        assert_eq!(
            validate_tag("Env=prod-1").unwrap_err(),
            "TAG_VALUE can have only alphabets, numbers, and underscore."
        );

        let tag = validate_tag("Cost_Center=team_42").unwrap();
        assert_eq!(tag.name(), "Cost_Center");
        assert_eq!(tag.value(), "team_42");
    }
}
