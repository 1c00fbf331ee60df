use crate::types::report::RecommendationReport;

/// Files listed in the Markdown summary; JSON carries all of them.
const TOP_FILES: usize = 10;

pub fn to_markdown(report: &RecommendationReport) -> String {
    let mut output = String::new();
    output.push_str("# System Recommendation\n\n");
    output.push_str(&format!(
        "Source: {} (sha256 {})\n\nFiles: {}\n\n",
        report.source, report.source_sha256, report.file_count
    ));
    output.push_str(&format!(
        "Parameters: depth_penalty {:.3}, pronom_rarity_weight {:.3}, system_rarity_weight {:.3}\n\n",
        report.parameters.depth_penalty,
        report.parameters.pronom_rarity_weight,
        report.parameters.system_rarity_weight
    ));

    output.push_str("## Format Relevance\n\n");
    if report.relevances.is_empty() {
        output.push_str("- none\n\n");
    } else {
        for entry in &report.relevances {
            output.push_str(&format!(
                "- {}: {:.4} (read by {}, written by {})\n",
                entry.format_id, entry.relevance, entry.reading_systems, entry.writing_systems
            ));
        }
        output.push('\n');
    }

    output.push_str("## Most Relevant Files\n\n");
    let shown: Vec<_> = report
        .files
        .iter()
        .filter(|file| file.relevance > 0.0)
        .take(TOP_FILES)
        .collect();
    if shown.is_empty() {
        output.push_str("- none\n\n");
    } else {
        for file in shown {
            output.push_str(&format!("- {}: {:.4}\n", file.path, file.relevance));
        }
        output.push('\n');
    }

    if let Some(selection) = &report.selection {
        output.push_str("## Recommended Systems\n\n");
        if selection.systems.is_empty() {
            output.push_str(&format!(
                "- none (best system {}, catalog of {})\n",
                selection.best_system, selection.catalog_size
            ));
        } else {
            for system in &selection.systems {
                output.push_str(&format!(
                    "- #{} {}: suitability {:.4}\n",
                    system.id,
                    system.name.as_deref().unwrap_or("unnamed"),
                    system.suitability
                ));
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::relevance::RelevanceParams;
    use crate::types::report::{FileRelevance, FormatRelevance, SelectionSummary, SystemScore};

    #[test]
    fn markdown_report_contains_sections() {
        let report = RecommendationReport {
            version: "0.1.0".to_string(),
            generated_at: "2024-01-01T00:00:00+00:00".to_string(),
            source: "scan.json".to_string(),
            source_sha256: "abc".to_string(),
            file_count: 2,
            parameters: RelevanceParams::default(),
            relevances: vec![FormatRelevance {
                format_id: "fmt/18".to_string(),
                relevance: 0.75,
                reading_systems: 1,
                writing_systems: 0,
            }],
            files: vec![FileRelevance {
                path: "docs/a.pdf".to_string(),
                size: 6000,
                relevance: 0.75,
            }],
            selection: Some(SelectionSummary {
                best_system: 0,
                chosen: vec![0],
                systems: vec![SystemScore {
                    id: 0,
                    name: Some("pdf box".to_string()),
                    suitability: 0.75,
                }],
                catalog_size: 4,
            }),
        };

        let rendered = to_markdown(&report);
        assert!(rendered.contains("# System Recommendation"));
        assert!(rendered.contains("- fmt/18: 0.7500 (read by 1, written by 0)"));
        assert!(rendered.contains("## Most Relevant Files"));
        assert!(rendered.contains("- docs/a.pdf: 0.7500"));
        assert!(rendered.contains("## Recommended Systems"));
        assert!(rendered.contains("#0 pdf box"));
    }
}
