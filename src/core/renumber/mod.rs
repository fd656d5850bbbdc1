//! Exercise renumbering — rename `ex<digits>.py` files to a zero-padded sequence.
//!
//! Given a directory, this module:
//! 1. Lists its direct entries and keeps names matching `ex<digits>.py` (any case)
//! 2. Sorts them case-insensitively by name (embedded numbers are ignored)
//! 3. Derives a padding width from the number of matches
//! 4. Renames each file to `ex<padded sequence>.py`, or previews that with a dry run

mod apply;
mod discover;
mod plan;

pub use apply::{
    standardize, standardize_with, ItemOutcome, ItemStatus, StandardizeOptions,
    StandardizeReport, StandardizeSummary,
};
pub use discover::{discover, is_candidate, sort_candidates, CANDIDATE_PATTERN};
pub use plan::{padding_width, plan_renames, target_name, PlannedRename, RenamePlan};
