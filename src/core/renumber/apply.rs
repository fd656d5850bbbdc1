use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};

use super::discover::discover;
use super::plan::{plan_renames, PlannedRename, RenamePlan};
use crate::error::{Error, Result};
use crate::local_files::{local, FileSystem};

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    /// Already carried its canonical name; no filesystem call was made.
    Unchanged,
    Renamed,
    /// Dry run: would be renamed.
    Planned,
    /// Source vanished before it could be renamed.
    Missing,
    Failed,
}

/// What happened to a single candidate.
#[derive(Debug, Clone, Serialize)]
pub struct ItemOutcome {
    pub sequence: usize,
    pub from: String,
    pub to: String,
    pub status: ItemStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ItemOutcome {
    fn new(entry: &PlannedRename, status: ItemStatus, error: Option<String>) -> Self {
        Self {
            sequence: entry.sequence,
            from: entry.from.clone(),
            to: entry.to.clone(),
            status,
            error,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StandardizeSummary {
    pub total: usize,
    pub renamed: usize,
    pub planned: usize,
    pub unchanged: usize,
    pub missing: usize,
    pub failed: usize,
}

impl StandardizeSummary {
    fn from_items(items: &[ItemOutcome]) -> Self {
        let mut summary = Self {
            total: items.len(),
            ..Self::default()
        };
        for item in items {
            match item.status {
                ItemStatus::Unchanged => summary.unchanged += 1,
                ItemStatus::Renamed => summary.renamed += 1,
                ItemStatus::Planned => summary.planned += 1,
                ItemStatus::Missing => summary.missing += 1,
                ItemStatus::Failed => summary.failed += 1,
            }
        }
        summary
    }
}

/// Result of one renumbering pass over a directory.
#[derive(Debug, Clone, Serialize)]
pub struct StandardizeReport {
    pub directory: String,
    /// Number of candidates found.
    pub total: usize,
    /// Padding width used; 0 when nothing matched.
    pub width: usize,
    pub dry_run: bool,
    /// One entry per candidate, in sequence order.
    pub items: Vec<ItemOutcome>,
    pub summary: StandardizeSummary,
}

impl StandardizeReport {
    fn new(directory: &Path, width: usize, dry_run: bool, items: Vec<ItemOutcome>) -> Self {
        let summary = StandardizeSummary::from_items(&items);
        Self {
            directory: directory.display().to_string(),
            total: items.len(),
            width,
            dry_run,
            items,
            summary,
        }
    }

    pub fn renamed(&self) -> usize {
        self.summary.renamed
    }

    pub fn has_failures(&self) -> bool {
        self.summary.failed > 0
    }
}

#[derive(Debug, Clone, Default)]
pub struct StandardizeOptions {
    /// Compute the mapping without renaming anything.
    pub dry_run: bool,
}

// ============================================================================
// Entry points
// ============================================================================

/// Renumber candidates in `directory` on the local filesystem.
pub fn standardize(directory: &Path) -> Result<StandardizeReport> {
    standardize_with(&local(), directory, &StandardizeOptions::default())
}

/// Renumber candidates in `directory` through the given filesystem.
///
/// Fails only when `directory` is not an existing directory (no side effects)
/// or cannot be listed. Per-file problems are recorded in the report.
pub fn standardize_with(
    fs: &dyn FileSystem,
    directory: &Path,
    options: &StandardizeOptions,
) -> Result<StandardizeReport> {
    if !fs.is_dir(directory) {
        return Err(Error::directory_not_found(directory.display().to_string()));
    }

    let names = discover(fs, directory)?;
    if names.is_empty() {
        return Ok(StandardizeReport::new(directory, 0, options.dry_run, Vec::new()));
    }

    let plan = plan_renames(&names);
    log_status!(
        "renumber",
        "{} candidate(s) in {}, width {}, {} to rename",
        plan.entries.len(),
        directory.display(),
        plan.width,
        plan.changes().count()
    );

    let items = if options.dry_run {
        preview(&plan)
    } else {
        apply_plan(fs, directory, &plan)
    };

    Ok(StandardizeReport::new(directory, plan.width, options.dry_run, items))
}

// ============================================================================
// Preview / apply
// ============================================================================

fn preview(plan: &RenamePlan) -> Vec<ItemOutcome> {
    plan.entries
        .iter()
        .map(|entry| {
            let status = if entry.is_change() {
                ItemStatus::Planned
            } else {
                ItemStatus::Unchanged
            };
            ItemOutcome::new(entry, status, None)
        })
        .collect()
}

/// A file parked under a staging name until its target is free.
struct Staged {
    index: usize,
    staging: PathBuf,
}

/// Names still held by candidates that have not moved yet.
///
/// Tracked both exactly (case-sensitive filesystems) and case-folded with a
/// count (case-insensitive filesystems, where `EX1.py` and `ex1.py` share a
/// slot), so a case twin keeps its name reserved after the other one leaves.
struct Holders {
    exact: HashSet<String>,
    folded: HashMap<String, usize>,
}

impl Holders {
    fn new(plan: &RenamePlan) -> Self {
        let mut holders = Self {
            exact: HashSet::new(),
            folded: HashMap::new(),
        };
        for entry in &plan.entries {
            holders.exact.insert(entry.from.clone());
            *holders.folded.entry(entry.from.to_lowercase()).or_insert(0) += 1;
        }
        holders
    }

    /// Whether `entry.to` is held by some candidate other than `entry` itself.
    fn blocks(&self, entry: &PlannedRename) -> bool {
        if self.exact.contains(&entry.to) {
            return true;
        }
        let to_key = entry.to.to_lowercase();
        let own = usize::from(entry.from.to_lowercase() == to_key);
        self.folded.get(&to_key).copied().unwrap_or(0) > own
    }

    fn release(&mut self, name: &str) {
        if !self.exact.remove(name) {
            return;
        }
        if let Some(count) = self.folded.get_mut(&name.to_lowercase()) {
            *count = count.saturating_sub(1);
        }
    }
}

/// Execute the plan in sequence order.
///
/// A target still held by a candidate that has not moved yet is never
/// overwritten: the source is parked under a staging name and moved into
/// place once the pass is over.
fn apply_plan(fs: &dyn FileSystem, dir: &Path, plan: &RenamePlan) -> Vec<ItemOutcome> {
    let mut holders = Holders::new(plan);
    let mut items = Vec::with_capacity(plan.entries.len());
    let mut staged = Vec::new();

    for entry in &plan.entries {
        if !entry.is_change() {
            items.push(ItemOutcome::new(entry, ItemStatus::Unchanged, None));
            continue;
        }

        let from = dir.join(&entry.from);
        let to = dir.join(&entry.to);

        if holders.blocks(entry) {
            let staging = dir.join(staging_name());
            let outcome = match fs.rename(&from, &staging) {
                Ok(()) => {
                    log_status!(
                        "renumber",
                        "{} is still taken, parking {} until the pass ends",
                        entry.to,
                        entry.from
                    );
                    holders.release(&entry.from);
                    staged.push(Staged {
                        index: items.len(),
                        staging,
                    });
                    // Provisional; settled in finish_staged.
                    ItemOutcome::new(entry, ItemStatus::Planned, None)
                }
                Err(e) => failed_rename(entry, &e, &mut holders),
            };
            items.push(outcome);
            continue;
        }

        // A pure case change of the file itself "exists" on case-insensitive filesystems.
        let case_only = entry.from.to_lowercase() == entry.to.to_lowercase();
        if !case_only && fs.exists(&to) {
            items.push(ItemOutcome::new(
                entry,
                ItemStatus::Failed,
                Some(format!("target {} already exists", entry.to)),
            ));
            continue;
        }

        let outcome = match fs.rename(&from, &to) {
            Ok(()) => {
                holders.release(&entry.from);
                ItemOutcome::new(entry, ItemStatus::Renamed, None)
            }
            Err(e) => failed_rename(entry, &e, &mut holders),
        };
        items.push(outcome);
    }

    finish_staged(fs, dir, &staged, &mut items);
    items
}

/// Move parked files into place, or back where they came from.
///
/// After the main pass a parked file's target can only be held by a file
/// that is staying put, so such targets are permanently blocked. A parked
/// file going back to its original name takes that name away from any
/// parked file headed there, so blocking spreads along those chains.
fn finish_staged(fs: &dyn FileSystem, dir: &Path, staged: &[Staged], items: &mut [ItemOutcome]) {
    let mut blocked: Vec<bool> = staged
        .iter()
        .map(|parked| fs.exists(&dir.join(&items[parked.index].to)))
        .collect();

    loop {
        let mut changed = false;
        for i in 0..staged.len() {
            if blocked[i] {
                continue;
            }
            let target = items[staged[i].index].to.to_lowercase();
            let displaced = staged
                .iter()
                .zip(&blocked)
                .any(|(other, &b)| b && items[other.index].from.to_lowercase() == target);
            if displaced {
                blocked[i] = true;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    for (parked, _) in staged.iter().zip(&blocked).filter(|(_, b)| **b) {
        let item = &mut items[parked.index];
        let problem = format!("target {} is still taken", item.to);
        settle_failure(fs, dir, parked, item, problem);
    }

    for (parked, _) in staged.iter().zip(&blocked).filter(|(_, b)| !**b) {
        let item = &mut items[parked.index];
        let target = dir.join(&item.to);

        if fs.exists(&target) {
            let problem = format!("target {} is still taken", item.to);
            settle_failure(fs, dir, parked, item, problem);
            continue;
        }

        match fs.rename(&parked.staging, &target) {
            Ok(()) => item.status = ItemStatus::Renamed,
            Err(e) => {
                let problem = format!("rename {} -> {}: {}", item.from, item.to, e);
                settle_failure(fs, dir, parked, item, problem);
            }
        }
    }
}

/// Put a parked file back under its original name and mark it failed.
/// If the original name has been taken meanwhile the file stays parked.
fn settle_failure(
    fs: &dyn FileSystem,
    dir: &Path,
    parked: &Staged,
    item: &mut ItemOutcome,
    problem: String,
) {
    item.status = ItemStatus::Failed;
    let original = dir.join(&item.from);
    let restored = if fs.exists(&original) {
        Err(format!("{} is taken", item.from))
    } else {
        fs.rename(&parked.staging, &original)
            .map_err(|e| e.to_string())
    };
    item.error = Some(match restored {
        Ok(()) => format!("{}; restored {}", problem, item.from),
        Err(reason) => format!(
            "{}; left at {} ({})",
            problem,
            parked.staging.display(),
            reason
        ),
    });
}

fn failed_rename(entry: &PlannedRename, err: &io::Error, holders: &mut Holders) -> ItemOutcome {
    if err.kind() == io::ErrorKind::NotFound {
        holders.release(&entry.from);
        log_status!("renumber", "{} disappeared before it could be renamed", entry.from);
        ItemOutcome::new(entry, ItemStatus::Missing, None)
    } else {
        ItemOutcome::new(entry, ItemStatus::Failed, Some(err.to_string()))
    }
}

fn staging_name() -> String {
    format!(".renumber-{}.tmp", uuid::Uuid::new_v4())
}

// ============================================================================
// Tests
// ============================================================================
