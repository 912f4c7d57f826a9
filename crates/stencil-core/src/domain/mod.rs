// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Stencil.
//!
//! This module contains pure data and rules with no I/O. Extracting values
//! from text and rewriting text are format concerns handled by adapters via
//! the ports in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, process, or network calls
//! - **No heavy crates**: Only std library + thiserror + serde derives
//! - **Ephemeral entities**: Rebuilt from the source files on every run
//!
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod value_objects;

// Re-exports for convenience
pub use entities::{
    dependency_set::{DependencyGroup, DependencySet, PackageEntry, VersionValue},
    hook_pins::{HookPin, HookPins, repo_display_name},
    layout::SyncLayout,
    smoke::{SmokePlan, slugify},
    sync_report::{Change, ChangeStatus, LockfileOutcome, Rewrite, SyncKind, SyncReport},
};

pub use error::{DomainError, ErrorCategory};

pub use value_objects::{
    ComparisonOperator, GroupName, ManifestScheme, PackageName, ReplaceScope, SyncMode,
};
