use crate::domain::Tag;
use crate::errors::ProviderError;
use mockall::automock;

/// The storage provider's bucket-management calls. One method is one request.
#[automock]
pub trait BucketPort: Send + Sync {
    /// Metadata-only existence probe. A missing bucket is `ProviderError::NotFound`.
    fn head_bucket(&self, bucket: &str) -> Result<(), ProviderError>;
    /// Returns the location the provider reports for the new bucket, if any.
    fn create_bucket(&self, bucket: &str) -> Result<Option<String>, ProviderError>;
    /// Replaces the whole tag set.
    fn put_bucket_tagging(&self, bucket: &str, tags: &[Tag]) -> Result<(), ProviderError>;
    fn put_public_access_block(&self, bucket: &str) -> Result<(), ProviderError>;
    fn delete_bucket_website(&self, bucket: &str) -> Result<(), ProviderError>;
    fn put_bucket_encryption(&self, bucket: &str) -> Result<(), ProviderError>;
    fn put_bucket_ownership_controls(&self, bucket: &str) -> Result<(), ProviderError>;
}
