use clap::Args;
use serde::Serialize;

use renumber::defaults;
use renumber::local_files::local;
use renumber::{ItemStatus, StandardizeOptions, StandardizeReport};

use super::CmdResult;

#[derive(Args, Default, Debug)]
pub struct StandardizeArgs {
    /// Directory to renumber (default: defaults.directory from renumber.json, else ./code-atividades)
    pub directory: Option<String>,

    /// Show what would be renamed without touching any file
    #[arg(long)]
    pub dry_run: bool,

    /// Print the JSON response envelope instead of the text report
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
pub struct StandardizeOutput {
    command: String,
    #[serde(flatten)]
    report: StandardizeReport,
}

pub fn run(args: StandardizeArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<StandardizeOutput> {
    let report = execute(&args)?;
    let exit_code = exit_code(&report);

    Ok((
        StandardizeOutput {
            command: "standardize".to_string(),
            report,
        },
        exit_code,
    ))
}

pub fn run_text(args: StandardizeArgs) -> renumber::Result<(String, i32)> {
    let report = execute(&args)?;
    Ok((render_text(&report), exit_code(&report)))
}

fn execute(args: &StandardizeArgs) -> renumber::Result<StandardizeReport> {
    let defaults = defaults::load_defaults();
    let directory = defaults::resolve_directory(args.directory.as_deref(), &defaults);

    renumber::standardize_with(
        &local(),
        &directory,
        &StandardizeOptions {
            dry_run: args.dry_run,
        },
    )
}

/// Missing sources are warnings; anything that failed outright is not.
fn exit_code(report: &StandardizeReport) -> i32 {
    if report.has_failures() {
        1
    } else {
        0
    }
}

pub fn render_text(report: &StandardizeReport) -> String {
    let mut lines = Vec::new();

    if report.total == 0 {
        lines.push(format!(
            "No files matching 'ex<number>.py' found in {}.",
            report.directory
        ));
        return lines.join("\n");
    }

    lines.push(format!(
        "Found {} file(s). Padding width: {} digit(s).",
        report.total, report.width
    ));

    for item in &report.items {
        match item.status {
            ItemStatus::Unchanged => {}
            ItemStatus::Renamed => lines.push(format!("Renamed: {} -> {}", item.from, item.to)),
            ItemStatus::Planned => {
                lines.push(format!("Would rename: {} -> {}", item.from, item.to))
            }
            ItemStatus::Missing => lines.push(format!(
                "Warning: {} not found, it may have already been renamed.",
                item.from
            )),
            ItemStatus::Failed => lines.push(format!(
                "Failed: {} -> {}: {}",
                item.from,
                item.to,
                item.error.as_deref().unwrap_or("unknown error")
            )),
        }
    }

    lines.push("-".repeat(30));

    let summary = &report.summary;
    if report.dry_run {
        if summary.planned > 0 {
            lines.push(format!("Dry run: {} file(s) would be renamed.", summary.planned));
        } else {
            lines.push("Dry run: no files need renaming.".to_string());
        }
    } else if summary.renamed > 0 {
        lines.push(format!("Done. {} file(s) renamed.", summary.renamed));
    } else {
        lines.push("No files needed renaming.".to_string());
    }

    if summary.failed > 0 {
        lines.push(format!("{} file(s) could not be renamed.", summary.failed));
    }

    lines.join("\n")
}
