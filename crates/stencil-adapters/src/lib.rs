//! Infrastructure adapters for Stencil.
//!
//! This crate implements the ports defined in `stencil-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod formats;
pub mod process;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use formats::{Pep621Format, PoetryFormat, PrecommitFormat, manifest_format};
pub use process::{CookiecutterGenerator, ProcessTaskRunner};
