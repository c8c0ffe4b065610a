use clap::Parser;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use s3_bucket_hardener::args::Args;
use s3_bucket_hardener::domain::{BucketPresence, Step, StepStatus, Tag};
use s3_bucket_hardener::errors::ProviderError;
use s3_bucket_hardener::ports::BucketPort;
use s3_bucket_hardener::run_with_port;

/// Bucket settings as the provider would hold them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct BucketState {
    tags: Vec<(String, String)>,
    public_access_blocked: bool,
    website_enabled: bool,
    default_encryption_aes256: bool,
    owner_enforced: bool,
}

/// In-memory provider that behaves like S3 for the calls the workflow makes.
#[derive(Default)]
struct FakeProvider {
    buckets: Mutex<HashMap<String, BucketState>>,
    create_calls: Mutex<usize>,
}

impl FakeProvider {
    fn with_bucket(name: &str, state: BucketState) -> Self {
        let fake = Self::default();
        fake.buckets
            .lock()
            .expect("lock")
            .insert(name.to_string(), state);
        fake
    }

    fn state(&self, name: &str) -> Option<BucketState> {
        self.buckets.lock().expect("lock").get(name).cloned()
    }

    fn create_calls(&self) -> usize {
        *self.create_calls.lock().expect("lock")
    }

    fn update(
        &self,
        bucket: &str,
        apply: impl FnOnce(&mut BucketState),
    ) -> Result<(), ProviderError> {
        let mut buckets = self.buckets.lock().expect("lock");
        let state = buckets
            .get_mut(bucket)
            .ok_or_else(|| ProviderError::NotFound(bucket.to_string()))?;
        apply(state);
        Ok(())
    }
}

struct SharedFake(Arc<FakeProvider>);

impl BucketPort for SharedFake {
    fn head_bucket(&self, bucket: &str) -> Result<(), ProviderError> {
        match self.0.state(bucket) {
            Some(_) => Ok(()),
            None => Err(ProviderError::NotFound(bucket.to_string())),
        }
    }

    fn create_bucket(&self, bucket: &str) -> Result<Option<String>, ProviderError> {
        *self.0.create_calls.lock().expect("lock") += 1;
        let mut buckets = self.0.buckets.lock().expect("lock");
        if buckets.contains_key(bucket) {
            return Err(ProviderError::Service {
                code: "BucketAlreadyOwnedByYou".to_string(),
                message: "already owned".to_string(),
            });
        }
        buckets.insert(
            bucket.to_string(),
            BucketState {
                owner_enforced: true,
                ..BucketState::default()
            },
        );
        Ok(Some(format!("/{bucket}")))
    }

    fn put_bucket_tagging(&self, bucket: &str, tags: &[Tag]) -> Result<(), ProviderError> {
        self.0.update(bucket, |s| {
            s.tags = tags
                .iter()
                .map(|t| (t.name().to_string(), t.value().to_string()))
                .collect();
        })
    }

    fn put_public_access_block(&self, bucket: &str) -> Result<(), ProviderError> {
        self.0.update(bucket, |s| s.public_access_blocked = true)
    }

    fn delete_bucket_website(&self, bucket: &str) -> Result<(), ProviderError> {
        self.0.update(bucket, |s| s.website_enabled = false)
    }

    fn put_bucket_encryption(&self, bucket: &str) -> Result<(), ProviderError> {
        self.0.update(bucket, |s| s.default_encryption_aes256 = true)
    }

    fn put_bucket_ownership_controls(&self, bucket: &str) -> Result<(), ProviderError> {
        self.0.update(bucket, |s| s.owner_enforced = true)
    }
}

fn args(extra: &[&str]) -> Args {
    let mut argv = vec!["s3-bucket-hardener", "--aws-region", "us-east-1"];
    argv.extend_from_slice(extra);
    Args::try_parse_from(argv).expect("valid test arguments")
}

fn hardened(tags: &[(&str, &str)]) -> BucketState {
    BucketState {
        tags: tags
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect(),
        public_access_blocked: true,
        website_enabled: false,
        default_encryption_aes256: true,
        owner_enforced: true,
    }
}

#[test]
fn second_run_is_a_no_op() -> Result<(), Box<dyn std::error::Error>> {
    let fake = Arc::new(FakeProvider::default());
    let args = args(&[
        "--bucket-name",
        "my-test-bucket-1",
        "--tags",
        "Env=Prod",
        "Team=storage",
    ]);

    let first = run_with_port(&args, Box::new(SharedFake(Arc::clone(&fake))))?;
    let after_first = fake.state("my-test-bucket-1");

    let second = run_with_port(&args, Box::new(SharedFake(Arc::clone(&fake))))?;
    let after_second = fake.state("my-test-bucket-1");

    assert!(first.is_clean());
    assert!(second.is_clean());
    assert_eq!(first.presence, BucketPresence::Absent);
    assert_eq!(second.presence, BucketPresence::Present);
    assert_eq!(fake.create_calls(), 1);
    assert_eq!(after_first, after_second);
    assert_eq!(
        after_second,
        Some(hardened(&[("Env", "Prod"), ("Team", "storage")]))
    );
    Ok(())
}

#[test]
fn existing_settings_are_replaced_not_merged() -> Result<(), Box<dyn std::error::Error>> {
    let fake = Arc::new(FakeProvider::with_bucket(
        "existing-bucket",
        BucketState {
            tags: vec![("Legacy".to_string(), "yes".to_string())],
            website_enabled: true,
            ..BucketState::default()
        },
    ));
    let args = args(&["--bucket-name", "existing-bucket", "--tags", "Env=Prod"]);

    let report = run_with_port(&args, Box::new(SharedFake(Arc::clone(&fake))))?;

    assert!(matches!(
        report.status_of(Step::CreateBucket),
        Some(StepStatus::Skipped { .. })
    ));
    assert_eq!(fake.create_calls(), 0);
    assert_eq!(
        fake.state("existing-bucket"),
        Some(hardened(&[("Env", "Prod")]))
    );
    Ok(())
}

#[test]
fn empty_tag_list_clears_tags() -> Result<(), Box<dyn std::error::Error>> {
    let fake = Arc::new(FakeProvider::with_bucket(
        "existing-bucket",
        BucketState {
            tags: vec![("Legacy".to_string(), "yes".to_string())],
            ..BucketState::default()
        },
    ));
    let args = args(&["--bucket-name", "existing-bucket"]);

    run_with_port(&args, Box::new(SharedFake(Arc::clone(&fake))))?;

    assert_eq!(fake.state("existing-bucket"), Some(hardened(&[])));
    Ok(())
}
