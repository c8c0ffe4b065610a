pub mod s3_adapter;

pub use s3_adapter::S3BucketAdapter;
