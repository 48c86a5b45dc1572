//! Command implementations for the lintmux CLI
//!
//! Two commands cover the workflows: `run` resolves the active analysis set,
//! executes it over the tree, and reports the processed findings with a
//! CI-friendly exit code, while `catalog` prints the registry so users can
//! see what a name, alias, group, or preset expands to.

pub mod catalog;
pub mod run;
