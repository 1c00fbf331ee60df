use crate::tree::{FileRef, FolderTree};

/// Reserved format id for files the scanner could not identify.
pub const UNKNOWN_FORMAT: &str = "UNKNOWN";

/// Size reported for files whose size is not known.
pub const UNKNOWN_SIZE: i64 = -1;

pub fn is_unknown(format_id: &str) -> bool {
    format_id == UNKNOWN_FORMAT
}

/// One format guess for a file, plus the share of relevance it carries.
#[derive(Debug, Clone, PartialEq)]
pub struct FormatMatch {
    format_id: String,
    relevance: f64,
}

impl FormatMatch {
    pub fn new(format_id: impl Into<String>) -> Self {
        Self {
            format_id: format_id.into(),
            relevance: 0.0,
        }
    }

    pub fn format_id(&self) -> &str {
        &self.format_id
    }

    pub fn relevance(&self) -> f64 {
        self.relevance
    }

    pub fn is_unknown(&self) -> bool {
        is_unknown(&self.format_id)
    }

    fn set_relevance(&mut self, relevance: f64) {
        self.relevance = relevance;
    }
}

#[derive(Debug, Clone)]
pub struct FileRecord {
    size: i64,
    path: String,
    directory: Vec<String>,
    matches: Vec<FormatMatch>,
    relevance: f64,
}

impl FileRecord {
    /// Negative sizes are normalized to [`UNKNOWN_SIZE`].
    pub fn new(size: i64, path: &str) -> Self {
        let mut segments: Vec<String> = path.split('/').map(str::to_string).collect();
        // The last segment names the file itself.
        segments.pop();

        Self {
            size: if size >= 0 { size } else { UNKNOWN_SIZE },
            path: path.to_string(),
            directory: segments,
            matches: Vec::new(),
            relevance: 0.0,
        }
    }

    #[cfg(test)]
    pub fn with_matches<I, S>(size: i64, path: &str, format_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut record = Self::new(size, path);
        for format_id in format_ids {
            record.add_match(FormatMatch::new(format_id));
        }
        record
    }

    pub fn add_match(&mut self, format_match: FormatMatch) {
        self.matches.push(format_match);
    }

    pub fn size(&self) -> i64 {
        self.size
    }

    pub fn has_known_size(&self) -> bool {
        self.size != UNKNOWN_SIZE
    }

    /// Size used for weighting; unknown sizes weigh nothing.
    pub fn weight(&self) -> f64 {
        if self.has_known_size() {
            self.size as f64
        } else {
            0.0
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Folder names leading to the file. Entries may be empty.
    pub fn directory(&self) -> &[String] {
        &self.directory
    }

    pub fn matches(&self) -> &[FormatMatch] {
        &self.matches
    }

    pub fn relevance(&self) -> f64 {
        self.relevance
    }

    /// Overwrites the file relevance and shares it equally across all matches.
    pub fn set_relevance(&mut self, relevance: f64) {
        self.relevance = relevance;
        if self.matches.is_empty() {
            return;
        }
        let share = relevance / self.matches.len() as f64;
        for format_match in &mut self.matches {
            format_match.set_relevance(share);
        }
    }
}

/// The files observed on one storage medium together with their folder tree.
#[derive(Debug)]
pub struct DiskImage {
    files: Vec<FileRecord>,
    tree: FolderTree,
    label: Option<String>,
}

impl DiskImage {
    pub fn new(files: Vec<FileRecord>) -> Self {
        let mut tree = FolderTree::root();
        for (index, file) in files.iter().enumerate() {
            let mut folder = &mut tree;
            for segment in file.directory().iter().filter(|s| !s.is_empty()) {
                folder = folder.add_folder(segment);
            }
            folder.add_file(FileRef {
                index,
                size: file.weight(),
            });
        }

        Self {
            files,
            tree,
            label: None,
        }
    }

    /// Builds a disk from `(size, path, format ids)` tuples.
    #[cfg(test)]
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (i64, &'a str, Vec<&'a str>)>,
    {
        let files = entries
            .into_iter()
            .map(|(size, path, ids)| FileRecord::with_matches(size, path, ids))
            .collect();
        Self::new(files)
    }

    /// Attaches the format a curator considers the most relevant on this disk.
    pub fn with_label(mut self, format_id: impl Into<String>) -> Self {
        self.label = Some(format_id.into());
        self
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn files(&self) -> &[FileRecord] {
        &self.files
    }

    pub fn tree(&self) -> &FolderTree {
        &self.tree
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Writes one relevance value per file, in observation order.
    pub(crate) fn assign_relevances(&mut self, relevances: &[f64]) {
        for (file, relevance) in self.files.iter_mut().zip(relevances) {
            file.set_relevance(*relevance);
        }
    }
}
