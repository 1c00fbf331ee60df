pub mod relevance;
pub mod selection;

use crate::stats::{FormatStatistics, SystemCatalogStatistics};
use crate::types::disk::DiskImage;
use crate::types::system::SystemCatalog;
use relevance::{RelevanceEngine, RelevanceMap, RelevanceParams};
use selection::SystemChoice;

#[derive(Debug, Clone)]
pub struct Analysis {
    pub params: RelevanceParams,
    pub relevances: RelevanceMap,
    pub choice: Option<SystemChoice>,
}

/// Scores the disk's formats without choosing systems.
pub fn relevance_only(
    disk: &mut DiskImage,
    format_stats: &FormatStatistics,
    catalog: &SystemCatalog,
    params: RelevanceParams,
) -> Analysis {
    let catalog_stats = SystemCatalogStatistics::from_systems(catalog.systems());
    let relevances = RelevanceEngine::new(format_stats, &catalog_stats, params).relevances(disk);
    Analysis {
        params,
        relevances,
        choice: None,
    }
}

/// Scores the disk's formats and ranks the catalog against them.
pub fn recommend(
    disk: &mut DiskImage,
    format_stats: &FormatStatistics,
    catalog: &mut SystemCatalog,
    params: RelevanceParams,
    target: Option<usize>,
) -> Analysis {
    let mut analysis = relevance_only(disk, format_stats, catalog, params);
    let choice = SystemChoice::with_target(catalog.systems_mut(), &analysis.relevances, target);
    analysis.choice = Some(choice);
    analysis
}
