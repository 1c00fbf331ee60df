use crate::error::{Result, SysrecError};
use crate::types::disk::{DiskImage, FileRecord, FormatMatch, UNKNOWN_FORMAT, UNKNOWN_SIZE};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Deserialize)]
struct SiegfriedReport {
    files: Option<Vec<SiegfriedFile>>,
}

#[derive(Debug, Deserialize)]
struct SiegfriedFile {
    filename: Option<String>,
    filesize: Option<i64>,
    matches: Option<Vec<SiegfriedMatch>>,
}

#[derive(Debug, Deserialize)]
struct SiegfriedMatch {
    id: Option<String>,
}

impl SiegfriedFile {
    fn into_record(self) -> FileRecord {
        let path = self.filename.unwrap_or_default();
        let mut record = FileRecord::new(self.filesize.unwrap_or(UNKNOWN_SIZE), &path);
        for found in self.matches.unwrap_or_default() {
            let format_id = found.id.unwrap_or_else(|| UNKNOWN_FORMAT.to_string());
            record.add_match(FormatMatch::new(format_id));
        }
        record
    }
}

/// A parsed report together with the fixity digest of its bytes.
#[derive(Debug)]
pub struct ScannedReport {
    pub path: PathBuf,
    pub sha256: String,
    pub disk: DiskImage,
}

/// Parses Siegfried JSON output into a disk image.
///
/// Missing sizes become unknown, matches without an id become `UNKNOWN`.
pub fn parse_report(json: &str) -> serde_json::Result<DiskImage> {
    let report: SiegfriedReport = serde_json::from_str(json)?;
    let files = report
        .files
        .unwrap_or_default()
        .into_iter()
        .map(SiegfriedFile::into_record)
        .collect();
    Ok(DiskImage::new(files))
}

pub fn load_report(path: &Path) -> Result<ScannedReport> {
    if !path.exists() {
        return Err(SysrecError::PathNotFound(path.display().to_string()));
    }
    let bytes = std::fs::read(path)?;
    let text = String::from_utf8_lossy(&bytes);
    let disk = parse_report(&text).map_err(|e| SysrecError::MalformedReport {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    if disk.is_empty() {
        warn!(path = %path.display(), "report lists no files");
    }

    Ok(ScannedReport {
        path: path.to_path_buf(),
        sha256: sha256_hex(&bytes),
        disk,
    })
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    format!("{digest:x}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"{
  "siegfried": "1.7.8",
  "identifiers": [{"name": "pronom"}],
  "files": [
    {
      "filename": "disk/docs/a.pdf",
      "filesize": 2048,
      "matches": [{"ns": "pronom", "id": "fmt/18", "format": "Acrobat PDF 1.4"}]
    },
    {
      "filename": "disk/mystery.bin",
      "filesize": 10,
      "matches": [{"ns": "pronom", "id": "UNKNOWN"}, {"ns": "pronom"}]
    },
    {
      "filename": "disk/nosize.txt",
      "matches": [{"id": "x-fmt/111"}]
    },
    {
      "filename": "disk/empty",
      "filesize": 0
    }
  ]
}"#;

    #[test]
    fn parse_report_extracts_sizes_paths_and_matches() {
        let disk = parse_report(SAMPLE).expect("sample should parse");
        let files = disk.files();
        assert_eq!(files.len(), 4);

        assert_eq!(files[0].size(), 2048);
        assert_eq!(files[0].directory(), ["disk", "docs"]);
        assert_eq!(files[0].matches()[0].format_id(), "fmt/18");

        let ids: Vec<&str> = files[1].matches().iter().map(|m| m.format_id()).collect();
        assert_eq!(ids, vec!["UNKNOWN", "UNKNOWN"]);

        assert_eq!(files[2].size(), UNKNOWN_SIZE);
        assert!(files[3].matches().is_empty());
        assert_eq!(files[3].path(), "disk/empty");
    }

    #[test]
    fn parse_report_without_files_is_empty() {
        assert!(parse_report("{}").expect("should parse").is_empty());
        assert!(parse_report(r#"{"files": null}"#)
            .expect("should parse")
            .is_empty());
    }

    #[test]
    fn parse_report_rejects_invalid_json() {
        assert!(parse_report("{ files: ").is_err());
    }

    #[test]
    fn load_report_computes_fixity_digest() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("scan.json");
        fs::write(&path, "{}").expect("report should write");

        let scanned = load_report(&path).expect("report should load");
        assert_eq!(
            scanned.sha256,
            "44136fa355b3678a1146ad16f7e8649e94fb4fc21fe77e8310c060f61caaff8a"
        );
        assert!(scanned.disk.is_empty());
    }

    #[test]
    fn load_report_reports_missing_and_malformed_files() {
        let dir = TempDir::new().expect("temp dir should be created");
        let missing = load_report(&dir.path().join("absent.json")).expect_err("should fail");
        assert!(matches!(missing, SysrecError::PathNotFound(_)));

        let path = dir.path().join("broken.json");
        fs::write(&path, "not json").expect("report should write");
        let malformed = load_report(&path).expect_err("should fail");
        assert!(matches!(malformed, SysrecError::MalformedReport { .. }));
    }
}
