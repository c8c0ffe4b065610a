use aws_config::BehaviorVersion;
use aws_config::retry::RetryConfig;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::Region as SdkRegion;
use aws_sdk_s3::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_s3::types::{
    BucketCannedAcl, BucketLocationConstraint, CreateBucketConfiguration, ObjectOwnership,
    OwnershipControls, OwnershipControlsRule, PublicAccessBlockConfiguration,
    ServerSideEncryption, ServerSideEncryptionByDefault, ServerSideEncryptionConfiguration,
    ServerSideEncryptionRule, Tag as SdkTag, Tagging,
};
use std::error::Error;
use std::fmt::Debug;

use crate::domain::{Region, Tag};
use crate::errors::{ProviderError, Result};
use crate::ports::BucketPort;
use crate::utils::log_utils::Logger;

/// `BucketPort` backed by the AWS SDK, bound to one region.
pub struct S3BucketAdapter {
    client: Client,
    runtime: tokio::runtime::Runtime,
    region: Region,
}

impl S3BucketAdapter {
    /// Build a client for `region` using the SDK's default credential chain.
    ///
    /// SDK retries are disabled: each port call is exactly one request.
    pub fn new(region: &Region, logger: &Logger) -> Result<Self> {
        // Runtime is reused for all operations
        let runtime = tokio::runtime::Runtime::new()?;

        logger.debug(&format!(
            "Creating S3 client for region {region} with retries disabled"
        ));

        let sdk_config = runtime.block_on(
            aws_config::defaults(BehaviorVersion::latest())
                .region(SdkRegion::new(region.to_string()))
                .retry_config(RetryConfig::disabled())
                .load(),
        );
        let client = Client::new(&sdk_config);

        logger.normal(&format!("Initialized S3 client with AWS region: {region}"));

        Ok(Self::with_runtime(client, runtime, region))
    }

    /// Wrap an already configured client; the adapter gets its own runtime.
    pub fn from_client(client: Client, region: &Region) -> Result<Self> {
        let runtime = tokio::runtime::Runtime::new()?;
        Ok(Self::with_runtime(client, runtime, region))
    }

    fn with_runtime(client: Client, runtime: tokio::runtime::Runtime, region: &Region) -> Self {
        Self {
            client,
            runtime,
            region: region.clone(),
        }
    }

    fn create_bucket_configuration(&self) -> Option<CreateBucketConfiguration> {
        if self.region.is_default() {
            return None;
        }
        Some(
            CreateBucketConfiguration::builder()
                .location_constraint(BucketLocationConstraint::from(self.region.as_str()))
                .build(),
        )
    }
}

/// Flatten an SDK failure into the provider error taxonomy
fn provider_error<E, R>(err: SdkError<E, R>) -> ProviderError
where
    E: ProvideErrorMetadata + Error + 'static,
    R: Debug,
{
    match &err {
        SdkError::ServiceError(context) => {
            let inner = context.err();
            ProviderError::Service {
                code: inner.code().unwrap_or("Unknown").to_string(),
                message: inner
                    .message()
                    .map_or_else(|| describe(&err), str::to_string),
            }
        }
        _ => ProviderError::Request(describe(&err)),
    }
}

/// One line for humans: the error itself plus its innermost cause.
fn describe(err: &dyn Error) -> String {
    let mut root = err.source();
    while let Some(next) = root.and_then(|cause| cause.source()) {
        root = Some(next);
    }
    match root {
        Some(cause) => format!("{err}: {cause}"),
        None => err.to_string(),
    }
}

fn invalid_request(e: impl Error) -> ProviderError {
    ProviderError::InvalidRequest(e.to_string())
}

impl BucketPort for S3BucketAdapter {
    fn head_bucket(&self, bucket: &str) -> std::result::Result<(), ProviderError> {
        match self
            .runtime
            .block_on(self.client.head_bucket().bucket(bucket).send())
        {
            Ok(_) => Ok(()),
            Err(SdkError::ServiceError(context)) if context.err().is_not_found() => {
                Err(ProviderError::NotFound(format!("bucket '{bucket}'")))
            }
            Err(e) => Err(provider_error(e)),
        }
    }

    fn create_bucket(&self, bucket: &str) -> std::result::Result<Option<String>, ProviderError> {
        let request = self
            .client
            .create_bucket()
            .bucket(bucket)
            .object_ownership(ObjectOwnership::BucketOwnerEnforced)
            .object_lock_enabled_for_bucket(false)
            .acl(BucketCannedAcl::Private)
            .set_create_bucket_configuration(self.create_bucket_configuration());

        let output = self
            .runtime
            .block_on(request.send())
            .map_err(provider_error)?;
        Ok(output.location().map(str::to_string))
    }

    fn put_bucket_tagging(
        &self,
        bucket: &str,
        tags: &[Tag],
    ) -> std::result::Result<(), ProviderError> {
        // An empty TagSet is refused, so "replace with nothing" is a delete
        if tags.is_empty() {
            self.runtime
                .block_on(self.client.delete_bucket_tagging().bucket(bucket).send())
                .map_err(provider_error)?;
            return Ok(());
        }

        let tag_set = tags
            .iter()
            .map(|tag| {
                SdkTag::builder()
                    .key(tag.name())
                    .value(tag.value())
                    .build()
                    .map_err(invalid_request)
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let tagging = Tagging::builder()
            .set_tag_set(Some(tag_set))
            .build()
            .map_err(invalid_request)?;

        self.runtime
            .block_on(
                self.client
                    .put_bucket_tagging()
                    .bucket(bucket)
                    .tagging(tagging)
                    .send(),
            )
            .map_err(provider_error)?;
        Ok(())
    }

    fn put_public_access_block(&self, bucket: &str) -> std::result::Result<(), ProviderError> {
        let configuration = PublicAccessBlockConfiguration::builder()
            .block_public_acls(true)
            .ignore_public_acls(true)
            .block_public_policy(true)
            .restrict_public_buckets(true)
            .build();

        self.runtime
            .block_on(
                self.client
                    .put_public_access_block()
                    .bucket(bucket)
                    .public_access_block_configuration(configuration)
                    .send(),
            )
            .map_err(provider_error)?;
        Ok(())
    }

    fn delete_bucket_website(&self, bucket: &str) -> std::result::Result<(), ProviderError> {
        self.runtime
            .block_on(self.client.delete_bucket_website().bucket(bucket).send())
            .map_err(provider_error)?;
        Ok(())
    }

    fn put_bucket_encryption(&self, bucket: &str) -> std::result::Result<(), ProviderError> {
        let default_encryption = ServerSideEncryptionByDefault::builder()
            .sse_algorithm(ServerSideEncryption::Aes256)
            .build()
            .map_err(invalid_request)?;
        let rule = ServerSideEncryptionRule::builder()
            .apply_server_side_encryption_by_default(default_encryption)
            .bucket_key_enabled(true)
            .build();
        let configuration = ServerSideEncryptionConfiguration::builder()
            .rules(rule)
            .build()
            .map_err(invalid_request)?;

        self.runtime
            .block_on(
                self.client
                    .put_bucket_encryption()
                    .bucket(bucket)
                    .server_side_encryption_configuration(configuration)
                    .send(),
            )
            .map_err(provider_error)?;
        Ok(())
    }

    fn put_bucket_ownership_controls(
        &self,
        bucket: &str,
    ) -> std::result::Result<(), ProviderError> {
        let rule = OwnershipControlsRule::builder()
            .object_ownership(ObjectOwnership::BucketOwnerEnforced)
            .build()
            .map_err(invalid_request)?;
        let controls = OwnershipControls::builder()
            .rules(rule)
            .build()
            .map_err(invalid_request)?;

        self.runtime
            .block_on(
                self.client
                    .put_bucket_ownership_controls()
                    .bucket(bucket)
                    .ownership_controls(controls)
                    .send(),
            )
            .map_err(provider_error)?;
        Ok(())
    }
}
