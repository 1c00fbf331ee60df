//! Format relevance scoring for a single disk image.
//!
//! Relevance starts as 1.0 at the disk root and flows down the folder tree in
//! proportion to (depth penalized) size. Each file shares its portion equally
//! among its format matches, the per-format sums are normalized, adjusted for
//! format rarity in the training corpus and in the system catalog, and
//! normalized again.

use crate::error::{Result, SysrecError};
use crate::stats::{FormatStatistics, SystemCatalogStatistics};
use crate::tree::FolderTree;
use crate::types::disk::{is_unknown, DiskImage, UNKNOWN_FORMAT};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Sums below this are treated as "no signal".
pub const EPSILON: f64 = 1e-10;

pub type RelevanceMap = BTreeMap<String, f64>;

/// Rarity weights are capped at 1: above that the blend `(1 - w) + w * factor`
/// turns negative for rare formats.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RelevanceParams {
    /// Attenuation per folder level, in (0, 1].
    pub depth_penalty: f64,
    /// Blend between no effect (0) and the full corpus rarity factor (1).
    pub pronom_rarity_weight: f64,
    /// Blend between no effect (0) and the full catalog support factor (1).
    pub system_rarity_weight: f64,
}

impl Default for RelevanceParams {
    fn default() -> Self {
        Self {
            depth_penalty: 0.9,
            pronom_rarity_weight: 0.5,
            system_rarity_weight: 0.5,
        }
    }
}

impl RelevanceParams {
    pub fn new(depth_penalty: f64, pronom_rarity_weight: f64, system_rarity_weight: f64) -> Self {
        Self {
            depth_penalty,
            pronom_rarity_weight,
            system_rarity_weight,
        }
    }

    /// Size and occurrence only, no rarity adjustments.
    #[cfg(test)]
    pub fn unweighted(depth_penalty: f64) -> Self {
        Self::new(depth_penalty, 0.0, 0.0)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.depth_penalty > 0.0 && self.depth_penalty <= 1.0) {
            return Err(SysrecError::InvalidParameter(format!(
                "depth_penalty must be in (0, 1], got {}",
                self.depth_penalty
            )));
        }
        for (name, weight) in [
            ("pronom_rarity_weight", self.pronom_rarity_weight),
            ("system_rarity_weight", self.system_rarity_weight),
        ] {
            if !(0.0..=1.0).contains(&weight) {
                return Err(SysrecError::InvalidParameter(format!(
                    "{name} must be in [0, 1], got {weight}"
                )));
            }
        }
        Ok(())
    }
}

pub struct RelevanceEngine<'a> {
    format_stats: &'a FormatStatistics,
    catalog_stats: &'a SystemCatalogStatistics,
    params: RelevanceParams,
}

impl<'a> RelevanceEngine<'a> {
    pub fn new(
        format_stats: &'a FormatStatistics,
        catalog_stats: &'a SystemCatalogStatistics,
        params: RelevanceParams,
    ) -> Self {
        Self {
            format_stats,
            catalog_stats,
            params,
        }
    }

    /// Scores every format on the disk and writes file and match relevances back.
    ///
    /// The result sums to 1 over identified formats, or is all zero when the
    /// disk carries no weight at all. `UNKNOWN` is kept as a key at 0.
    pub fn relevances(&self, disk: &mut DiskImage) -> RelevanceMap {
        let mut per_file = vec![0.0; disk.files().len()];
        distribute(disk.tree(), 1.0, self.params.depth_penalty, &mut per_file);
        disk.assign_relevances(&per_file);

        let mut relevances = aggregate(disk);
        if !normalize(&mut relevances) {
            debug!(formats = relevances.len(), "no relevance signal on disk");
            return relevances;
        }

        self.apply_pronom_rarity(&mut relevances);
        self.apply_system_rarity(&mut relevances);
        normalize(&mut relevances);

        debug!(
            formats = relevances.len(),
            files = disk.files().len(),
            "computed format relevances"
        );
        relevances
    }

    fn apply_pronom_rarity(&self, relevances: &mut RelevanceMap) {
        let weight = self.params.pronom_rarity_weight;
        if weight <= 0.0 {
            return;
        }
        for (format_id, value) in relevances.iter_mut() {
            if is_unknown(format_id) {
                continue;
            }
            let rarity = 1.0 - self.format_stats.relative_frequency(format_id);
            // A format making up the whole corpus keeps its value.
            if rarity < EPSILON {
                continue;
            }
            *value *= blend(weight, rarity);
        }
    }

    fn apply_system_rarity(&self, relevances: &mut RelevanceMap) {
        let weight = self.params.system_rarity_weight;
        if weight <= 0.0 || self.catalog_stats.is_empty() {
            return;
        }
        let total = self.catalog_stats.total();
        for (format_id, value) in relevances.iter_mut() {
            if is_unknown(format_id) {
                continue;
            }
            let Some(readers) = self.catalog_stats.lookup_reading(format_id) else {
                continue;
            };
            if readers == 0 {
                continue;
            }
            *value *= blend(weight, readers as f64 / total as f64);
        }
    }
}

fn blend(weight: f64, factor: f64) -> f64 {
    (1.0 - weight) + weight * factor
}

fn distribute(folder: &FolderTree, relevance: f64, depth_penalty: f64, per_file: &mut [f64]) {
    let folder_size = folder.size(depth_penalty);
    if folder_size <= 0.0 {
        return;
    }

    for file in folder.files() {
        if let Some(slot) = per_file.get_mut(file.index) {
            *slot = relevance * file.size / folder_size;
        }
    }
    for child in folder.folders() {
        let share = relevance * depth_penalty * child.size(depth_penalty) / folder_size;
        distribute(child, share, depth_penalty, per_file);
    }
}

fn aggregate(disk: &DiskImage) -> RelevanceMap {
    let mut relevances = RelevanceMap::new();
    for format_match in disk.files().iter().flat_map(|file| file.matches()) {
        *relevances
            .entry(format_match.format_id().to_string())
            .or_insert(0.0) += format_match.relevance();
    }
    relevances
}

/// Rescales identified formats to sum to 1 and zeroes `UNKNOWN`.
/// Returns false, leaving identified values untouched, when there is nothing to scale.
fn normalize(relevances: &mut RelevanceMap) -> bool {
    if let Some(unknown) = relevances.get_mut(UNKNOWN_FORMAT) {
        *unknown = 0.0;
    }
    let total: f64 = relevances.values().sum();
    if total < EPSILON {
        return false;
    }
    for value in relevances.values_mut() {
        *value /= total;
    }
    true
}
