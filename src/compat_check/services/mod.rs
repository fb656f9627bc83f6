mod override_merger;
mod row_builder;
mod slug_resolver;
mod version_comparator;

pub use override_merger::{OverrideMerger, DEFAULT_STANDARD};
pub use row_builder::{RowBuilder, ALWAYS_UPGRADEABLE_TESTED_WP, NO_ISSUES, ZERO_THREADS};
pub use slug_resolver::SlugResolver;
pub use version_comparator::VersionComparator;
