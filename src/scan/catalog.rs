use crate::error::{Result, SysrecError};
use crate::types::system::SystemCatalog;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    system: Vec<SystemEntry>,
}

#[derive(Debug, Deserialize)]
struct SystemEntry {
    name: Option<String>,
    #[serde(default)]
    readable: Vec<String>,
    #[serde(default)]
    writable: Vec<String>,
}

fn clean(formats: Vec<String>) -> Vec<String> {
    formats
        .into_iter()
        .map(|format_id| format_id.trim().to_string())
        .filter(|format_id| !format_id.is_empty())
        .collect()
}

/// Parses `[[system]]` tables into a catalog; ids follow file order.
pub fn parse_catalog(text: &str) -> std::result::Result<SystemCatalog, toml::de::Error> {
    let file: CatalogFile = toml::from_str(text)?;
    let mut catalog = SystemCatalog::new();
    for entry in file.system {
        catalog.push(entry.name, clean(entry.readable), clean(entry.writable));
    }
    Ok(catalog)
}

pub fn load_catalog(path: &Path) -> Result<SystemCatalog> {
    if !path.exists() {
        return Err(SysrecError::PathNotFound(path.display().to_string()));
    }
    let text = std::fs::read_to_string(path)?;
    let catalog = parse_catalog(&text)
        .map_err(|e| SysrecError::CatalogParse(format!("{}: {}", path.display(), e)))?;
    if catalog.is_empty() {
        warn!(path = %path.display(), "catalog lists no systems");
    }
    debug!(path = %path.display(), systems = catalog.len(), "loaded system catalog");
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::system::SystemId;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn parse_catalog_assigns_ids_in_file_order() {
        let catalog = parse_catalog(
            r#"
[[system]]
name = "Windows 98 + Office 97"
readable = ["fmt/18", " x-fmt/111 ", ""]
writable = ["x-fmt/111"]

[[system]]
readable = ["fmt/17"]
"#,
        )
        .expect("catalog should parse");

        assert_eq!(catalog.len(), 2);
        let first = catalog.get(SystemId(0)).expect("first system");
        assert_eq!(first.name(), Some("Windows 98 + Office 97"));
        assert!(first.readable("x-fmt/111"));
        assert_eq!(first.readable_formats().len(), 2);
        assert!(first.writable_formats().contains("x-fmt/111"));

        let second = catalog.get(SystemId(1)).expect("second system");
        assert_eq!(second.name(), None);
        assert!(second.writable_formats().is_empty());
    }

    #[test]
    fn empty_catalog_file_has_no_systems() {
        assert!(parse_catalog("").expect("should parse").is_empty());
    }

    #[test]
    fn load_catalog_reports_errors() {
        let dir = TempDir::new().expect("temp dir should be created");
        let missing = load_catalog(&dir.path().join("none.toml")).expect_err("should fail");
        assert!(matches!(missing, SysrecError::PathNotFound(_)));

        let path = dir.path().join("bad.toml");
        fs::write(&path, "[[system]]\nreadable = 3\n").expect("catalog should write");
        let bad = load_catalog(&path).expect_err("should fail");
        assert!(matches!(bad, SysrecError::CatalogParse(_)));
    }
}
