use crate::types::disk::{DiskImage, FileRecord};
use std::collections::HashMap;

/// Relative frequency of each format id across a training corpus.
#[derive(Debug, Clone, Default)]
pub struct FormatStatistics {
    counts: HashMap<String, u64>,
    total_matches: u64,
}

impl FormatStatistics {
    pub fn from_disks<'a, I>(disks: I) -> Self
    where
        I: IntoIterator<Item = &'a DiskImage>,
    {
        Self::from_files(disks.into_iter().flat_map(|disk| disk.files()))
    }

    pub fn from_files<'a, I>(files: I) -> Self
    where
        I: IntoIterator<Item = &'a FileRecord>,
    {
        let mut stats = Self::default();
        for file in files {
            for format_match in file.matches().iter().filter(|m| !m.is_unknown()) {
                *stats
                    .counts
                    .entry(format_match.format_id().to_string())
                    .or_insert(0) += 1;
                stats.total_matches += 1;
            }
        }
        stats
    }

    /// Identified matches counted in the corpus.
    pub fn total_matches(&self) -> u64 {
        self.total_matches
    }

    pub fn distinct_formats(&self) -> usize {
        self.counts.len()
    }

    /// Observed frequency, or `None` when the corpus never saw the format.
    pub fn lookup(&self, format_id: &str) -> Option<f64> {
        self.counts
            .get(format_id)
            .map(|count| *count as f64 / self.total_matches as f64)
    }

    /// Unseen formats are treated as if they occurred exactly once.
    /// An empty corpus yields 0 for every format.
    pub fn relative_frequency(&self, format_id: &str) -> f64 {
        match self.lookup(format_id) {
            Some(frequency) => frequency,
            None if self.total_matches > 0 => 1.0 / self.total_matches as f64,
            None => 0.0,
        }
    }
}
