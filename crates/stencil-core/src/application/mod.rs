//! Application layer for Stencil.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (pre-commit sync, dependency sync, smoke test)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer sequences the run (validate, extract, rewrite,
//! mirror, report). How a particular file format is read or rewritten lives
//! behind the format ports.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    DependencySyncService, PrecommitSyncService, SmokeOutcome, SmokeStep, SmokeTestService,
};

// Re-export port traits (for adapter implementation)
pub use ports::{
    Filesystem, HookConfigFormat, ManifestFormat, ProjectGenerator, TaskRunner, TaskStatus,
};

pub use error::{ApplicationError, PathKind};
