// Constants for the configuration parser

use std::num::NonZeroUsize;

/// Maximum number of nested sections below the root.
/// Opening a section at this depth is a hard parse failure.
pub const MAX_DEPTH: usize = 16;

/// Bucket count of the hash table backing every section
pub const SECTION_TABLE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(256) {
    Some(n) => n,
    None => panic!("section table capacity must be nonzero"),
};

/// Name recorded for the root frame of the section stack
pub const ROOT_SECTION_NAME: &str = "root";
