// Public modules
pub mod types;
mod validators;

// Re-export everything from the submodules
pub use types::*;
pub use validators::*;

use clap::Parser;
use std::process;

/// Parse command line arguments and run the cross-field checks
///
/// Per-value rules (region list, bucket naming, tag format) are enforced by
/// clap's value parsers, which exit with status 2 on failure.
///
/// # Returns
///
/// * `Args` - The validated arguments
#[must_use]
pub fn args_checks() -> Args {
    let args = Args::parse();

    if let Err(e) = args.validate() {
        eprintln!("Error: {e}");
        process::exit(1);
    }

    args
}
