//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `stencil-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File reads, writes and copies
//!   - `HookConfigFormat` / `ManifestFormat`: Extract and rewrite versioned files
//!   - `ProjectGenerator`: Expand the template into a project
//!   - `TaskRunner`: Run lifecycle subcommands in a generated project
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{
    Filesystem, HookConfigFormat, ManifestFormat, ProjectGenerator, TaskRunner, TaskStatus,
};

#[cfg(test)]
pub use output::{
    MockFilesystem, MockHookConfigFormat, MockManifestFormat, MockProjectGenerator,
    MockTaskRunner,
};
