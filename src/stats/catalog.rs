use crate::types::system::SystemCapability;
use std::collections::HashMap;

/// How many catalog systems can read or write each format.
#[derive(Debug, Clone, Default)]
pub struct SystemCatalogStatistics {
    reading: HashMap<String, usize>,
    writing: HashMap<String, usize>,
    total: usize,
}

impl SystemCatalogStatistics {
    pub fn from_systems(systems: &[SystemCapability]) -> Self {
        let mut reading = HashMap::new();
        let mut writing = HashMap::new();
        for system in systems {
            for format_id in system.readable_formats() {
                *reading.entry(format_id.clone()).or_insert(0) += 1;
            }
            for format_id in system.writable_formats() {
                *writing.entry(format_id.clone()).or_insert(0) += 1;
            }
        }

        Self {
            reading,
            writing,
            total: systems.len(),
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Reading systems for the format, or `None` when no system reads it.
    pub fn lookup_reading(&self, format_id: &str) -> Option<usize> {
        self.reading.get(format_id).copied()
    }

    pub fn reading_systems(&self, format_id: &str) -> usize {
        self.lookup_reading(format_id).unwrap_or(0)
    }

    pub fn writing_systems(&self, format_id: &str) -> usize {
        self.writing.get(format_id).copied().unwrap_or(0)
    }
}
