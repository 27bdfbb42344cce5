//! Git object access: repository handle and history walker.

pub mod repository;
pub mod walker;

pub use repository::GitRepo;
pub use walker::{join_path, FileTuple, HistoryWalker};
