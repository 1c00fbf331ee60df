use crate::analyze::relevance::RelevanceParams;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct FormatRelevance {
    pub format_id: String,
    pub relevance: f64,
    /// Catalog systems able to read the format.
    pub reading_systems: usize,
    pub writing_systems: usize,
}

/// Share of the disk's relevance carried by one file. Size is -1 when unknown.
#[derive(Debug, Clone, Serialize)]
pub struct FileRelevance {
    pub path: String,
    pub size: i64,
    pub relevance: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SystemScore {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub suitability: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SelectionSummary {
    pub best_system: i64,
    pub chosen: Vec<i64>,
    pub systems: Vec<SystemScore>,
    pub catalog_size: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationReport {
    pub version: String,
    pub generated_at: String,
    pub source: String,
    pub source_sha256: String,
    pub file_count: usize,
    pub parameters: RelevanceParams,
    pub relevances: Vec<FormatRelevance>,
    pub files: Vec<FileRelevance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection: Option<SelectionSummary>,
}

impl RecommendationReport {
    /// Most relevant first; equal formats keep id order.
    pub fn sort_relevances(&mut self) {
        self.relevances.sort_by(|a, b| {
            b.relevance
                .total_cmp(&a.relevance)
                .then_with(|| a.format_id.cmp(&b.format_id))
        });
        // Stable, so equal files keep observation order.
        self.files.sort_by(|a, b| b.relevance.total_cmp(&a.relevance));
    }
}
