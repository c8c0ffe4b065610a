use clap::{Parser, ValueEnum};

use super::validators::{validate, validate_aws_region, validate_bucket_name, validate_tag};
use crate::domain::{BucketName, Region, Tag};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Create an S3 bucket if needed and lock it down", long_about = None)]
pub struct Args {
    /// AWS region the bucket lives in
    #[arg(long = "aws-region", value_name = "REGION", value_parser = validate_aws_region)]
    pub aws_region: Region,

    /// S3 bucket name
    #[arg(long = "bucket-name", value_name = "NAME", value_parser = validate_bucket_name)]
    pub bucket_name: BucketName,

    /// Tags to apply, replacing the bucket's current tag set
    #[arg(long, value_name = "NAME=VALUE", num_args = 1.., value_parser = validate_tag)]
    pub tags: Vec<Tag>,

    /// Print extra stuff (use -v -v or --verbose --verbose for even more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// What to do with the remaining steps once one step fails
    #[arg(long, value_enum, default_value_t = FailurePolicy::Continue)]
    pub on_failure: FailurePolicy,

    /// Format of the final report
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Exit non-zero when any step failed
    #[arg(long)]
    pub strict: bool,
}

/// Whether a failed step stops the run
#[derive(Clone, ValueEnum, Debug, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Run every step and report all failures at the end
    #[default]
    Continue,
    /// Skip the remaining steps after the first failure
    Stop,
}

#[derive(Clone, ValueEnum, Debug, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl Args {
    /// Validate constraints spanning more than one argument, without modifying the Args
    ///
    /// # Errors
    ///
    /// Returns an error if the tag set is unusable.
    pub fn validate(&self) -> Result<(), String> {
        validate(self)
    }
}
