//! Core abstractions for the orchestration engine
//!
//! Fundamental building blocks shared by every layer: the Analysis trait all
//! diagnostic passes implement, the descriptor metadata the resolver selects
//! on, the frozen run configuration, the shared run context with its
//! build-once source index, and the error taxonomies that separate
//! unsatisfiable configuration from infrastructure failures.

pub mod analysis;
pub mod config;
pub mod context;
pub mod error;
pub mod finding;
pub mod index;

pub use analysis::{Analysis, AnalysisDescriptor, Speed};
pub use config::{
    ChangeSource, Config, PathStyle, Settings, SortKey, DEFAULT_EXCLUDE_PATTERNS,
    DEFAULT_EXTENSIONS, DEFAULT_SKIP_DIRS,
};
pub use context::RunContext;
pub use error::{ConfigError, PipelineError, ProviderError};
pub use finding::Finding;
pub use index::{IndexedFile, SourceIndex, SymbolDef};
