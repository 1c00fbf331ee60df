pub mod catalog;
pub mod corpus;
pub mod filesystem;
pub mod siegfried;
