pub mod catalog;
pub mod format;

pub use catalog::SystemCatalogStatistics;
pub use format::FormatStatistics;
