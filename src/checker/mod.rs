//! Latest-version resolution and outdated comparison.

mod resolver;
mod version;

pub use resolver::resolve_latest;
pub use version::{any_outdated, is_outdated};
