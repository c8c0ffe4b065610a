use serde::Serialize;
use std::fmt;

/// Regions a bucket may be provisioned in, in the order they are reported.
pub const VALID_REGIONS: [&str; 28] = [
    "us-east-1",
    "us-east-2",
    "us-west-1",
    "us-west-2",
    "ap-southeast-1",
    "ap-southeast-2",
    "ap-southeast-3",
    "ap-southeast-4",
    "ap-northeast-1",
    "ap-northeast-2",
    "ap-northeast-3",
    "ap-south-1",
    "ap-south-2",
    "eu-west-1",
    "eu-west-2",
    "eu-west-3",
    "eu-north-1",
    "eu-south-1",
    "eu-south-2",
    "eu-central-1",
    "eu-central-2",
    "sa-east-1",
    "ap-east-1",
    "me-south-1",
    "me-central-1",
    "il-central-1",
    "af-south-1",
    "ca-central-1",
];

/// Region that needs no location constraint on bucket creation.
pub const DEFAULT_REGION: &str = "us-east-1";

/// A validated region identifier. Build one with `args::validate_aws_region`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Region(String);

impl Region {
    pub(crate) fn new(value: &str) -> Self {
        Self(value.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_REGION
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A bucket name that has passed `args::validate_bucket_name`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct BucketName(String);

impl BucketName {
    pub(crate) fn new(value: &str) -> Self {
        Self(value.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BucketName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A `name=value` pair applied to the bucket's tag set.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Tag {
    name: String,
    value: String,
}

impl Tag {
    pub(crate) fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// Outcome of the existence probe. `Unknown` means the probe itself failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BucketPresence {
    Present,
    Absent,
    Unknown,
}

/// Workflow steps, declared in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Step {
    ProbeExistence,
    CreateBucket,
    ApplyTags,
    BlockPublicAccess,
    DisableStaticWebsiteHosting,
    UpdateEncryption,
    UpdateOwnershipControl,
}

impl Step {
    /// Steps that run on every invocation, after existence is settled.
    pub const CONFIGURATION: [Step; 5] = [
        Step::ApplyTags,
        Step::BlockPublicAccess,
        Step::DisableStaticWebsiteHosting,
        Step::UpdateEncryption,
        Step::UpdateOwnershipControl,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Step::ProbeExistence => "probe-existence",
            Step::CreateBucket => "create-bucket",
            Step::ApplyTags => "apply-tags",
            Step::BlockPublicAccess => "block-public-access",
            Step::DisableStaticWebsiteHosting => "disable-static-website-hosting",
            Step::UpdateEncryption => "update-encryption",
            Step::UpdateOwnershipControl => "update-ownership-control",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum StepStatus {
    Succeeded,
    Skipped { reason: String },
    Failed { error: String },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StepReport {
    pub step: Step,
    #[serde(flatten)]
    pub status: StepStatus,
}

impl StepReport {
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self.status, StepStatus::Failed { .. })
    }
}

/// Aggregated result of one provisioning run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProvisionReport {
    pub region: Region,
    pub bucket: BucketName,
    pub presence: BucketPresence,
    pub steps: Vec<StepReport>,
}

impl ProvisionReport {
    pub fn failures(&self) -> impl Iterator<Item = &StepReport> {
        self.steps.iter().filter(|s| s.is_failure())
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures().next().is_none()
    }

    #[must_use]
    pub fn status_of(&self, step: Step) -> Option<&StepStatus> {
        self.steps
            .iter()
            .find(|s| s.step == step)
            .map(|s| &s.status)
    }
}
