//! External collaborators
//!
//! The engine consumes two providers: the file-tree resolver that turns
//! configured roots into the concrete target set, and the version-control
//! diff collector behind incremental runs. Both fail terminally; there is
//! no meaningful partial substitute for a broken file set or diff.

pub mod files;
pub mod vcs;

pub use files::{FileResolver, ResolvedPaths};
pub use vcs::{collect_changes, parse_unified_diff};
