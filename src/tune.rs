//! Grid search over relevance parameters against curator-labeled disks.

use crate::analyze::relevance::{RelevanceEngine, RelevanceMap, RelevanceParams};
use crate::error::{Result, SysrecError};
use crate::scan::siegfried::load_report;
use crate::stats::{FormatStatistics, SystemCatalogStatistics};
use crate::types::disk::{is_unknown, DiskImage};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
struct LabelFile {
    #[serde(default)]
    disk: Vec<LabelEntry>,
}

#[derive(Debug, Deserialize)]
struct LabelEntry {
    report: String,
    expected: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TuningOutcome {
    pub best: RelevanceParams,
    pub score: usize,
    pub disks: usize,
}

pub fn default_grid() -> Vec<RelevanceParams> {
    let mut grid = Vec::new();
    for depth_penalty in [1.0, 0.9, 0.7, 0.5] {
        for pronom in [0.0, 0.5, 1.0] {
            for system in [0.0, 0.5, 1.0] {
                grid.push(RelevanceParams::new(depth_penalty, pronom, system));
            }
        }
    }
    grid
}

/// Loads `[[disk]]` entries; report paths are relative to the label file.
pub fn load_labels(path: &Path) -> Result<Vec<DiskImage>> {
    if !path.exists() {
        return Err(SysrecError::PathNotFound(path.display().to_string()));
    }
    let text = std::fs::read_to_string(path)?;
    let labels: LabelFile = toml::from_str(&text)
        .map_err(|e| SysrecError::ConfigParse(format!("{}: {}", path.display(), e)))?;

    let base = path.parent().unwrap_or_else(|| Path::new("."));
    labels
        .disk
        .into_iter()
        .map(|entry| {
            let scanned = load_report(&base.join(&entry.report))?;
            Ok(scanned.disk.with_label(entry.expected))
        })
        .collect()
}

/// Identified format with the strictly highest relevance; `None` without signal.
pub fn most_relevant(relevances: &RelevanceMap) -> Option<&str> {
    let mut best: Option<(&str, f64)> = None;
    for (format_id, relevance) in relevances {
        if is_unknown(format_id) {
            continue;
        }
        if *relevance > best.map_or(0.0, |(_, top)| top) {
            best = Some((format_id.as_str(), *relevance));
        }
    }
    best.map(|(format_id, _)| format_id)
}

/// Number of labeled disks whose top format matches the label under `params`.
pub fn score_option(
    disks: &mut [DiskImage],
    format_stats: &FormatStatistics,
    catalog_stats: &SystemCatalogStatistics,
    params: RelevanceParams,
) -> usize {
    let engine = RelevanceEngine::new(format_stats, catalog_stats, params);
    let mut hits = 0;
    for disk in disks.iter_mut() {
        let relevances = engine.relevances(disk);
        if let (Some(found), Some(expected)) = (most_relevant(&relevances), disk.label()) {
            if found == expected {
                hits += 1;
            }
        }
    }
    hits
}

/// Picks the option with the strictly highest score; the first option wins ties.
pub fn tune(
    disks: &mut [DiskImage],
    format_stats: &FormatStatistics,
    catalog_stats: &SystemCatalogStatistics,
    options: &[RelevanceParams],
) -> Result<TuningOutcome> {
    if disks.is_empty() {
        return Err(SysrecError::EmptyTuningSet("no labeled disks".to_string()));
    }
    let Some(first) = options.first() else {
        return Err(SysrecError::InvalidParameter(
            "no parameter options to try".to_string(),
        ));
    };

    let mut outcome = TuningOutcome {
        best: *first,
        score: score_option(disks, format_stats, catalog_stats, *first),
        disks: disks.len(),
    };
    for option in &options[1..] {
        let score = score_option(disks, format_stats, catalog_stats, *option);
        debug!(?option, score, "scored parameter option");
        if score > outcome.score {
            outcome.best = *option;
            outcome.score = score;
        }
    }

    info!(score = outcome.score, disks = outcome.disks, "tuning finished");
    Ok(outcome)
}
