//! Status command: the dashboard view of every asset.

use std::collections::BTreeMap;

use anyhow::{Result, bail};
use owo_colors::OwoColorize;
use serde::Serialize;

use super::args::StatusArgs;
use super::common::Session;
use crate::asset::FormatKey;
use crate::log;
use crate::manifest::CourseManifest;
use crate::resolve::{ResolutionStatus, WeekStatus};
use crate::utils::plural_count;

/// Settled statuses of one week, as printed by `--json`.
#[derive(Debug, Serialize)]
pub struct WeekReport {
    pub week: u32,
    pub title: String,
    pub available: usize,
    pub assets: BTreeMap<FormatKey, ResolutionStatus>,
}

impl WeekReport {
    fn new(status: WeekStatus, manifest: &CourseManifest) -> Self {
        let title = manifest
            .week(status.week)
            .map(|w| w.title.clone())
            .unwrap_or_default();
        Self {
            week: status.week,
            title,
            available: status.available_count(),
            assets: status.assets.into_iter().collect(),
        }
    }
}

/// Command that would register the missing asset.
pub fn register_hint(week: u32, format: FormatKey) -> String {
    match format.default_extension() {
        Some(ext) => format!(
            "coursedeck register --week {week} --format {format} --file <file>.{ext}"
        ),
        None => format!("coursedeck register --week {week} --format {format} --location <url>"),
    }
}

/// Execute status command
pub async fn run_status(args: &StatusArgs, session: &Session) -> Result<()> {
    let store = session.store();
    let manifest = store.snapshot();

    let statuses = match args.week {
        Some(week) => {
            if manifest.week(week).is_none() {
                bail!("week {week} is not part of `{}`", manifest.course_title);
            }
            vec![session.resolver.resolve_week(week).await]
        }
        None => session.resolver.resolve_course().await,
    };

    let reports: Vec<WeekReport> = statuses
        .into_iter()
        .map(|status| WeekReport::new(status, &manifest))
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    println!("{}", manifest.course_title.bold());
    for report in &reports {
        print_week(report);
    }

    let total: usize = reports.iter().map(|r| r.assets.len()).sum();
    let available: usize = reports.iter().map(|r| r.available).sum();
    log!(
        "status";
        "{} registered, {} of {} available",
        manifest.registered_count(),
        available,
        plural_count(total, "asset")
    );
    Ok(())
}

fn print_week(report: &WeekReport) {
    println!();
    println!(
        "{}{}{} {}",
        "[".dimmed(),
        format!("week {}", report.week).cyan(),
        "]".dimmed(),
        report.title
    );

    for (format, status) in &report.assets {
        match status {
            ResolutionStatus::Available(location) => {
                println!("{} {:<12} {}", "✓".green(), format.as_str(), location);
            }
            ResolutionStatus::Unavailable(reason) => {
                println!(
                    "{} {:<12} {} {}",
                    "→".red(),
                    format.as_str(),
                    "not yet available".red(),
                    format!("({reason})").dimmed()
                );
                println!("  {} {}", "hint:".yellow(), register_hint(report.week, *format));
            }
            ResolutionStatus::Verifying => {
                println!("{} {:<12} verifying", "…".dimmed(), format.as_str());
            }
        }
    }
}
