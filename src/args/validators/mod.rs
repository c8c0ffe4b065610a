mod value_validators;

pub use value_validators::*;

use std::collections::HashSet;

use super::types::Args;

/// The provider refuses tag sets larger than this.
pub const MAX_TAGS: usize = 50;

/// Validate cross-field constraints that clap's per-value parsers cannot see
///
/// # Errors
///
/// Returns an error if the tag set would be refused by the provider.
pub fn validate(args: &Args) -> Result<(), String> {
    if args.tags.len() > MAX_TAGS {
        return Err(format!(
            "At most {MAX_TAGS} tags can be applied, got {}.",
            args.tags.len()
        ));
    }

    let mut seen = HashSet::new();
    for tag in &args.tags {
        if !seen.insert(tag.name()) {
            return Err(format!("Duplicate tag name '{}'.", tag.name()));
        }
    }
    Ok(())
}
