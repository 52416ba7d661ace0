//! Domain logic - pure business rules independent of git operations

pub mod commit;
pub mod level;
pub mod tag;
pub mod version;

pub use commit::{Commit, Revert};
pub use level::Level;
pub use tag::{is_pre_major, Tag};
