//! Batch execution layer
//!
//! Takes the resolved analysis set and a frozen context and produces raw
//! findings plus per-analysis statuses. Scheduling, deadlines, panic
//! isolation, and output silencing live here and nowhere else.

pub mod runner;
pub mod silence;

pub use runner::{AnalysisStatus, Outcome, RunReport, Runner};
pub use silence::SilenceGuard;
