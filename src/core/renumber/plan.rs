use serde::Serialize;

/// Digits used to pad sequence numbers for `count` candidates.
///
/// The number of digits in `count`, at least 2 above 9 and at least 3 above 99.
/// Nine files stay single-digit (`ex1.py`..`ex9.py`).
pub fn padding_width(count: usize) -> usize {
    let mut width = count.to_string().len();
    if count > 9 {
        width = width.max(2);
    }
    if count > 99 {
        width = width.max(3);
    }
    width
}

/// Canonical name for a sequence number at the given width.
pub fn target_name(sequence: usize, width: usize) -> String {
    format!("ex{:0width$}.py", sequence, width = width)
}

/// One candidate and the name it should end up with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedRename {
    /// 1-based position after sorting.
    pub sequence: usize,
    pub from: String,
    pub to: String,
}

impl PlannedRename {
    pub fn is_change(&self) -> bool {
        self.from != self.to
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RenamePlan {
    pub width: usize,
    pub entries: Vec<PlannedRename>,
}

impl RenamePlan {
    pub fn changes(&self) -> impl Iterator<Item = &PlannedRename> {
        self.entries.iter().filter(|e| e.is_change())
    }
}

/// Map already-sorted candidate names to their sequential names.
pub fn plan_renames(sorted: &[String]) -> RenamePlan {
    let width = padding_width(sorted.len());
    let entries = sorted
        .iter()
        .enumerate()
        .map(|(index, from)| {
            let sequence = index + 1;
            PlannedRename {
                sequence,
                from: from.clone(),
                to: target_name(sequence, width),
            }
        })
        .collect();

    RenamePlan { width, entries }
}
