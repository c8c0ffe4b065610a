use crate::args::FailurePolicy;
use crate::domain::{
    BucketName, BucketPresence, ProvisionReport, Region, Step, StepReport, StepStatus, Tag,
};
use crate::errors::{ProviderError, ProvisionerError, Result};
use crate::infra::S3BucketAdapter;
use crate::ports::BucketPort;
use crate::utils::log_utils::{LogLevel, Logger};

/// Drives one bucket in one region to the hardened configuration.
///
/// Every operation is a single provider request. Failures are logged and
/// returned to the caller; nothing here retries or panics.
pub struct BucketConfigurator {
    region: Region,
    port: Box<dyn BucketPort>,
    logger: Logger,
}

impl BucketConfigurator {
    pub fn new(region: Region, port: Box<dyn BucketPort>, logger: Logger) -> Self {
        Self {
            region,
            port,
            logger,
        }
    }

    /// Build a configurator backed by the AWS SDK.
    ///
    /// # Errors
    /// Returns an error if the async runtime for the SDK cannot start.
    pub fn connect(region: Region, logger: Logger) -> Result<Self> {
        let adapter = S3BucketAdapter::new(&region, &logger)?;
        Ok(Self::new(region, Box::new(adapter), logger))
    }

    /// Three-state existence probe. "Not found" is `Absent`; any other failure is `Unknown`.
    pub fn probe_bucket(&self, bucket: &BucketName) -> BucketPresence {
        match self.port.head_bucket(bucket.as_str()) {
            Ok(()) => {
                self.logger.normal(&format!("Bucket {bucket} exists."));
                BucketPresence::Present
            }
            Err(e) if e.is_not_found() => {
                self.logger
                    .normal(&format!("Bucket {bucket} does not exist. {e}"));
                BucketPresence::Absent
            }
            Err(e) => {
                self.logger.warn(&format!(
                    "Could not determine whether bucket {bucket} exists. {e}"
                ));
                BucketPresence::Unknown
            }
        }
    }

    /// True only when the bucket was positively found.
    pub fn bucket_exists(&self, bucket: &BucketName) -> bool {
        self.probe_bucket(bucket) == BucketPresence::Present
    }

    /// Create the bucket: owner-enforced ownership, object lock off, private ACL.
    ///
    /// # Errors
    /// Returns an error if the provider rejects the request or reports an
    /// unexpected location for the new bucket.
    pub fn create_bucket(&self, bucket: &BucketName) -> Result<()> {
        let outcome = self.port.create_bucket(bucket.as_str()).and_then(|location| {
            match location {
                Some(loc) if location_matches(bucket, &loc) => Ok(()),
                Some(loc) => Err(ProviderError::Request(format!(
                    "unexpected location {loc:?}"
                ))),
                None => Err(ProviderError::Request("no location reported".to_string())),
            }
        });
        self.finish(
            Step::CreateBucket,
            outcome,
            &format!("Bucket {bucket} created successfully."),
            &format!("Failed to create bucket {bucket}."),
        )
    }

    /// Replace the bucket's tag set with `tags`.
    ///
    /// # Errors
    /// Returns an error if the provider rejects the request.
    pub fn apply_tags(&self, bucket: &BucketName, tags: &[Tag]) -> Result<()> {
        if self.logger.enabled(LogLevel::Debug) {
            let rendered: Vec<String> = tags.iter().map(ToString::to_string).collect();
            self.logger
                .debug(&format!("Tag set for {bucket}: [{}]", rendered.join(", ")));
        }
        self.finish(
            Step::ApplyTags,
            self.port.put_bucket_tagging(bucket.as_str(), tags),
            &format!("Tags applied to bucket {bucket}."),
            &format!("Failed to apply tags to bucket {bucket}."),
        )
    }

    /// Turn on all four public-access-block flags.
    ///
    /// # Errors
    /// Returns an error if the provider rejects the request.
    pub fn block_public_access(&self, bucket: &BucketName) -> Result<()> {
        self.finish(
            Step::BlockPublicAccess,
            self.port.put_public_access_block(bucket.as_str()),
            &format!("Blocked all public access to bucket {bucket}."),
            &format!("Failed to block public access to bucket {bucket}."),
        )
    }

    /// Remove any website configuration. Succeeds on a bucket without one.
    ///
    /// # Errors
    /// Returns an error if the provider rejects the request.
    pub fn disable_static_website_hosting(&self, bucket: &BucketName) -> Result<()> {
        self.finish(
            Step::DisableStaticWebsiteHosting,
            self.port.delete_bucket_website(bucket.as_str()),
            &format!("Static website hosting disabled for bucket {bucket}."),
            &format!("Failed to disable static website hosting for bucket {bucket}."),
        )
    }

    /// Default encryption: SSE with AES256 and bucket key enabled.
    ///
    /// # Errors
    /// Returns an error if the provider rejects the request.
    pub fn update_encryption(&self, bucket: &BucketName) -> Result<()> {
        self.finish(
            Step::UpdateEncryption,
            self.port.put_bucket_encryption(bucket.as_str()),
            &format!("Bucket encryption updated for bucket {bucket}."),
            &format!("Failed to update bucket encryption for bucket {bucket}."),
        )
    }

    /// Enforce bucket-owner ownership of every object.
    ///
    /// # Errors
    /// Returns an error if the provider rejects the request.
    pub fn update_ownership_control(&self, bucket: &BucketName) -> Result<()> {
        self.finish(
            Step::UpdateOwnershipControl,
            self.port.put_bucket_ownership_controls(bucket.as_str()),
            &format!("Bucket ownership control updated for bucket {bucket}."),
            &format!("Failed to update bucket ownership control for bucket {bucket}."),
        )
    }

    /// Run the whole workflow and collect one report entry per step.
    ///
    /// Under `FailurePolicy::Continue` every step runs. Under
    /// `FailurePolicy::Stop` the steps after the first failure are skipped.
    pub fn provision(
        &self,
        bucket: &BucketName,
        tags: &[Tag],
        policy: FailurePolicy,
    ) -> ProvisionReport {
        let mut steps = Vec::with_capacity(7);

        let presence = self.probe_bucket(bucket);
        match presence {
            BucketPresence::Present => {
                steps.push(succeeded(Step::ProbeExistence));
                steps.push(StepReport {
                    step: Step::CreateBucket,
                    status: StepStatus::Skipped {
                        reason: "bucket already exists".to_string(),
                    },
                });
            }
            BucketPresence::Absent => {
                self.logger
                    .normal(&format!("Bucket '{bucket}' doesn't exist, creating it..."));
                steps.push(succeeded(Step::ProbeExistence));
                steps.push(outcome(Step::CreateBucket, self.create_bucket(bucket)));
            }
            BucketPresence::Unknown => {
                // Creating an owned bucket again is harmless, so still try
                steps.push(StepReport {
                    step: Step::ProbeExistence,
                    status: StepStatus::Failed {
                        error: "existence could not be determined".to_string(),
                    },
                });
                if policy == FailurePolicy::Continue {
                    steps.push(outcome(Step::CreateBucket, self.create_bucket(bucket)));
                }
            }
        }

        for step in Step::CONFIGURATION {
            if policy == FailurePolicy::Stop && steps.iter().any(StepReport::is_failure) {
                break;
            }
            let result = match step {
                Step::ApplyTags => self.apply_tags(bucket, tags),
                Step::BlockPublicAccess => self.block_public_access(bucket),
                Step::DisableStaticWebsiteHosting => self.disable_static_website_hosting(bucket),
                Step::UpdateEncryption => self.update_encryption(bucket),
                Step::UpdateOwnershipControl => self.update_ownership_control(bucket),
                Step::ProbeExistence | Step::CreateBucket => continue,
            };
            steps.push(outcome(step, result));
        }

        if policy == FailurePolicy::Stop {
            let ran: Vec<Step> = steps.iter().map(|s| s.step).collect();
            for step in all_steps().filter(|s| !ran.contains(s)) {
                self.logger
                    .info(&format!("Skipping {step} after an earlier failure"));
                steps.push(StepReport {
                    step,
                    status: StepStatus::Skipped {
                        reason: "an earlier step failed".to_string(),
                    },
                });
            }
        }

        ProvisionReport {
            region: self.region.clone(),
            bucket: bucket.clone(),
            presence,
            steps,
        }
    }

    fn finish(
        &self,
        step: Step,
        result: std::result::Result<(), ProviderError>,
        success: &str,
        failure: &str,
    ) -> Result<()> {
        match result {
            Ok(()) => {
                self.logger.normal(success);
                Ok(())
            }
            Err(source) => {
                self.logger.warn(&format!("{failure} {source}"));
                Err(ProvisionerError::Provider { step, source })
            }
        }
    }
}

fn all_steps() -> impl Iterator<Item = Step> {
    [Step::ProbeExistence, Step::CreateBucket]
        .into_iter()
        .chain(Step::CONFIGURATION)
}

fn succeeded(step: Step) -> StepReport {
    StepReport {
        step,
        status: StepStatus::Succeeded,
    }
}

fn outcome(step: Step, result: Result<()>) -> StepReport {
    let status = match result {
        Ok(()) => StepStatus::Succeeded,
        Err(ProvisionerError::Provider { source, .. }) => StepStatus::Failed {
            error: source.to_string(),
        },
        Err(e) => StepStatus::Failed {
            error: e.to_string(),
        },
    };
    StepReport { step, status }
}

/// `us-east-1` reports `/<bucket>`; other regions report a URL on the bucket's host.
pub(crate) fn location_matches(bucket: &BucketName, location: &str) -> bool {
    if location == format!("/{bucket}") {
        return true;
    }
    location
        .split_once("://")
        .is_some_and(|(_, rest)| rest.starts_with(&format!("{bucket}.")))
}
