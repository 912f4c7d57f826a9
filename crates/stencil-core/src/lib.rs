//! Stencil Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Stencil
//! template synchronisation tool, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           stencil-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (PrecommitSync, DependencySync, Smoke) │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, Formats, Generator, Runner)│
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    stencil-adapters (Infrastructure)    │
//! │ (LocalFilesystem, Pep621Format, etc)    │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  (HookPins, DependencySet, SyncReport)  │
//! │         No External Dependencies        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stencil_core::prelude::*;
//!
//! let layout = SyncLayout::new(".", "example-package", "{{ cookiecutter.project_slug }}");
//!
//! // Adapters are injected; see `stencil-adapters`.
//! let service = PrecommitSyncService::new(filesystem, format);
//! let report = service.sync(&layout, ".pre-commit-config.yaml".as_ref(), SyncMode::Write)?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        DependencySyncService, PrecommitSyncService, SmokeTestService,
        ports::{Filesystem, HookConfigFormat, ManifestFormat, ProjectGenerator, TaskRunner},
    };
    pub use crate::domain::{
        Change, ChangeStatus, DependencyGroup, DependencySet, GroupName, HookPin, HookPins,
        LockfileOutcome, ManifestScheme, PackageEntry, PackageName, ReplaceScope, Rewrite,
        SmokePlan, SyncKind, SyncLayout, SyncMode, SyncReport, VersionValue,
    };
    pub use crate::error::{StencilError, StencilResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
