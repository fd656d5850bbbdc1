// Public modules
pub mod defaults;
pub mod error;
pub mod local_files;
pub mod renumber;

// Internal modules - not part of public API
pub(crate) mod paths;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
pub use renumber::{
    standardize, standardize_with, ItemOutcome, ItemStatus, StandardizeOptions,
    StandardizeReport, StandardizeSummary,
};
