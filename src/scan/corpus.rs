use crate::error::{Result, SysrecError};
use crate::scan::filesystem::list_reports;
use crate::scan::siegfried::load_report;
use crate::stats::FormatStatistics;
use crate::types::disk::DiskImage;
use std::path::Path;
use tracing::{info, warn};

/// Loads every Siegfried report below `dir`, skipping ones that fail to parse.
pub fn load_corpus(dir: &Path) -> Result<Vec<DiskImage>> {
    if !dir.is_dir() {
        return Err(SysrecError::PathNotFound(dir.display().to_string()));
    }

    let mut disks = Vec::new();
    for path in list_reports(dir) {
        match load_report(&path) {
            Ok(scanned) => disks.push(scanned.disk),
            Err(e) => warn!(path = %path.display(), error = %e, "skipping training report"),
        }
    }
    info!(dir = %dir.display(), disks = disks.len(), "loaded training corpus");
    Ok(disks)
}

/// Format statistics for the corpus at `dir`, or empty statistics without one.
pub fn training_statistics(dir: Option<&Path>) -> Result<FormatStatistics> {
    match dir {
        Some(dir) => {
            let stats = FormatStatistics::from_disks(&load_corpus(dir)?);
            info!(
                matches = stats.total_matches(),
                formats = stats.distinct_formats(),
                "built training statistics"
            );
            Ok(stats)
        }
        None => Ok(FormatStatistics::default()),
    }
}
