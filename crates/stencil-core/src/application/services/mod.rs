//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "sync hook pins" or "smoke-test the template".

pub mod dependency_sync;
pub mod precommit_sync;
pub(crate) mod preflight;

pub use dependency_sync::DependencySyncService;
pub use precommit_sync::PrecommitSyncService;
pub use smoke_test::{SmokeOutcome, SmokeStep, SmokeTestService};
