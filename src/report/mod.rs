pub mod json;
pub mod md;

use crate::analyze::Analysis;
use crate::error::SysrecError;
use crate::scan::siegfried::ScannedReport;
use crate::stats::SystemCatalogStatistics;
use crate::types::report::{
    FileRelevance, FormatRelevance, RecommendationReport, SelectionSummary, SystemScore,
};
use crate::types::system::{SystemCatalog, NO_SYSTEM};
use chrono::Utc;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

pub fn render(report: &RecommendationReport, format: OutputFormat) -> Result<String, SysrecError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(SysrecError::Json),
        OutputFormat::Md => Ok(md::to_markdown(report)),
    }
}

pub fn build_report(
    scanned: &ScannedReport,
    analysis: &Analysis,
    catalog: &SystemCatalog,
) -> RecommendationReport {
    let catalog_stats = SystemCatalogStatistics::from_systems(catalog.systems());
    let relevances = analysis
        .relevances
        .iter()
        .map(|(format_id, relevance)| FormatRelevance {
            format_id: format_id.clone(),
            relevance: *relevance,
            reading_systems: catalog_stats.reading_systems(format_id),
            writing_systems: catalog_stats.writing_systems(format_id),
        })
        .collect();
    let files = scanned
        .disk
        .files()
        .iter()
        .map(|file| FileRelevance {
            path: file.path().to_string(),
            size: file.size(),
            relevance: file.relevance(),
        })
        .collect();

    let selection = analysis.choice.as_ref().map(|choice| SelectionSummary {
        best_system: choice.best_system().map_or(NO_SYSTEM, |id| id.as_wire()),
        chosen: choice.choose_systems(),
        systems: choice
            .chosen()
            .iter()
            .filter_map(|id| catalog.get(*id))
            .map(|system| SystemScore {
                id: system.id().as_wire(),
                name: system.name().map(str::to_string),
                suitability: system.suitability(),
            })
            .collect(),
        catalog_size: catalog.len(),
    });

    let mut report = RecommendationReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        generated_at: Utc::now().to_rfc3339(),
        source: scanned.path.display().to_string(),
        source_sha256: scanned.sha256.clone(),
        file_count: scanned.disk.files().len(),
        parameters: analysis.params,
        relevances,
        files,
        selection,
    };
    report.sort_relevances();
    report
}
