pub mod config;
pub mod disk;
pub mod report;
pub mod system;
