use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// All `.json` files below `root`, in a stable order.
pub fn list_reports(root: &Path) -> Vec<PathBuf> {
    let mut reports: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path().to_path_buf())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
        })
        .collect();
    reports.sort();
    reports
}
