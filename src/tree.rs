use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// A file as seen by the tree: its position in the disk image and its weighted size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FileRef {
    pub index: usize,
    pub size: f64,
}

#[derive(Debug, Clone, Copy)]
struct CachedSize {
    version: u64,
    depth_penalty: u64,
    size: f64,
}

/// Folder hierarchy with lazily cached, depth penalized aggregate sizes.
///
/// All nodes of one tree share a single version counter. Adding a file anywhere
/// bumps it, which invalidates every cached size in the tree at once.
#[derive(Debug)]
pub struct FolderTree {
    folders: BTreeMap<String, FolderTree>,
    files: Vec<FileRef>,
    journal: Rc<Cell<u64>>,
    cache: Cell<Option<CachedSize>>,
}

impl FolderTree {
    pub fn root() -> Self {
        Self::with_journal(Rc::new(Cell::new(0)))
    }

    fn with_journal(journal: Rc<Cell<u64>>) -> Self {
        Self {
            folders: BTreeMap::new(),
            files: Vec::new(),
            journal,
            cache: Cell::new(None),
        }
    }

    /// Returns the child of that name, creating an empty one if needed.
    pub fn add_folder(&mut self, name: &str) -> &mut FolderTree {
        let journal = Rc::clone(&self.journal);
        self.folders
            .entry(name.to_string())
            .or_insert_with(|| FolderTree::with_journal(journal))
    }

    pub fn add_file(&mut self, file: FileRef) {
        self.files.push(file);
        self.journal.set(self.journal.get() + 1);
    }

    #[cfg(test)]
    pub fn folder(&self, name: &str) -> Option<&FolderTree> {
        self.folders.get(name)
    }

    pub fn folders(&self) -> impl Iterator<Item = &FolderTree> {
        self.folders.values()
    }

    /// Files living directly in this folder.
    pub fn files(&self) -> &[FileRef] {
        &self.files
    }

    #[cfg(test)]
    pub fn version(&self) -> u64 {
        self.journal.get()
    }

    /// Aggregate size: own files plus `depth_penalty` times each subfolder's size.
    pub fn size(&self, depth_penalty: f64) -> f64 {
        let version = self.journal.get();
        let penalty_bits = depth_penalty.to_bits();
        if let Some(cached) = self.cache.get() {
            if cached.version == version && cached.depth_penalty == penalty_bits {
                return cached.size;
            }
        }

        let nested: f64 = self
            .folders
            .values()
            .map(|folder| depth_penalty * folder.size(depth_penalty))
            .sum();
        let direct: f64 = self.files.iter().map(|file| file.size).sum();
        let size = nested + direct;

        self.cache.set(Some(CachedSize {
            version,
            depth_penalty: penalty_bits,
            size,
        }));
        size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(index: usize, size: f64) -> FileRef {
        FileRef { index, size }
    }

    #[test]
    fn size_sums_root_and_subfolder_files() {
        let mut root = FolderTree::root();
        root.add_folder("sub").add_file(file(0, 20.0));
        root.add_file(file(1, 10.0));

        assert_eq!(root.size(1.0), 30.0);
        assert_eq!(root.folder("sub").map(|f| f.size(1.0)), Some(20.0));
    }

    #[test]
    fn depth_penalty_discounts_each_level() {
        let mut root = FolderTree::root();
        root.add_file(file(0, 10.0));
        let a = root.add_folder("a");
        a.add_file(file(1, 8.0));
        a.add_folder("b").add_file(file(2, 4.0));

        // 10 + 0.5 * (8 + 0.5 * 4)
        assert!((root.size(0.5) - 15.0).abs() < 1e-12);
        assert_eq!(root.size(1.0), 22.0);
    }

    #[test]
    fn size_is_stable_without_new_files() {
        let mut root = FolderTree::root();
        root.add_folder("a").add_file(file(0, 3.0));
        let version = root.version();

        let first = root.size(0.9);
        let second = root.size(0.9);
        assert_eq!(first, second);
        assert_eq!(root.version(), version);
    }

    #[test]
    fn size_updates_after_deep_insert() {
        let mut root = FolderTree::root();
        root.add_file(file(0, 10.0));
        assert_eq!(root.size(1.0), 10.0);

        root.add_folder("a").add_folder("b").add_file(file(1, 5.0));
        assert_eq!(root.size(1.0), 15.0);

        root.add_folder("a").add_file(file(2, 1.0));
        assert_eq!(root.size(1.0), 16.0);
        assert_eq!(root.folder("a").map(|f| f.size(1.0)), Some(6.0));
    }

    #[test]
    fn add_folder_is_idempotent() {
        let mut root = FolderTree::root();
        root.add_folder("docs").add_file(file(0, 1.0));
        root.add_folder("docs").add_file(file(1, 2.0));

        assert_eq!(root.folders().count(), 1);
        let docs = root.folder("docs").expect("docs should exist");
        assert_eq!(docs.files().len(), 2);
    }

    #[test]
    fn trees_do_not_share_version_counters() {
        let mut left = FolderTree::root();
        let right = FolderTree::root();
        left.add_file(file(0, 1.0));
        left.add_folder("x").add_file(file(1, 1.0));

        assert_eq!(left.version(), 2);
        assert_eq!(right.version(), 0);
        assert_eq!(right.size(1.0), 0.0);
    }

    #[test]
    fn empty_folder_has_zero_size() {
        let mut root = FolderTree::root();
        root.add_folder("empty");
        assert_eq!(root.size(0.7), 0.0);
    }
}
