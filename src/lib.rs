pub mod app;
pub mod args;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod ports;
pub mod report;
pub mod utils {
    pub mod log_utils;
}

pub use app::BucketConfigurator;
pub use args::Args;
pub use domain::ProvisionReport;

use args::OutputFormat;
use errors::{ProvisionerError, Result};
use ports::BucketPort;
use utils::log_utils::Logger;

/// Logger matching the requested output: JSON keeps stdout for the report.
#[must_use]
pub fn logger_for(args: &Args) -> Logger {
    match args.output {
        OutputFormat::Json => Logger::stderr_only(args.verbose),
        OutputFormat::Text => Logger::new(args.verbose),
    }
}

/// Provision the bucket named in `args` against the real provider.
///
/// # Errors
/// Returns an error if the arguments fail cross-field validation or the
/// provider client cannot be built. Step failures are reported in the
/// returned `ProvisionReport`, not as errors.
pub fn run_app(args: &Args) -> Result<ProvisionReport> {
    args.validate().map_err(ProvisionerError::Validation)?;
    let logger = logger_for(args);
    announce(args, &logger);
    let configurator = BucketConfigurator::connect(args.aws_region.clone(), logger)?;
    Ok(configurator.provision(&args.bucket_name, &args.tags, args.on_failure))
}

/// Same workflow as [`run_app`], against an injected provider.
///
/// # Errors
/// Returns an error if the arguments fail cross-field validation; the
/// provider is not called in that case.
pub fn run_with_port(args: &Args, port: Box<dyn BucketPort>) -> Result<ProvisionReport> {
    args.validate().map_err(ProvisionerError::Validation)?;
    let logger = logger_for(args);
    announce(args, &logger);
    let configurator = BucketConfigurator::new(args.aws_region.clone(), port, logger);
    Ok(configurator.provision(&args.bucket_name, &args.tags, args.on_failure))
}

fn announce(args: &Args, logger: &Logger) {
    let tags: Vec<String> = args.tags.iter().map(ToString::to_string).collect();
    logger.normal(&format!("AWS Region: {}", args.aws_region));
    logger.normal(&format!("Bucket Name: {}", args.bucket_name));
    logger.normal(&format!("Tags: [{}]", tags.join(", ")));
    logger.debug(&format!(
        "Failure policy: {:?}, output: {:?}, strict: {}",
        args.on_failure, args.output, args.strict
    ));
}
