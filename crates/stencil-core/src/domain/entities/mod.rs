pub mod dependency_set;
pub mod hook_pins;
pub mod layout;
pub mod smoke;
pub mod sync_report;

pub use crate::domain::DomainError;
pub use dependency_set::{DependencyGroup, DependencySet, PackageEntry, VersionValue};
pub use hook_pins::{HookPin, HookPins};
pub use layout::SyncLayout;
pub use smoke::SmokePlan;
pub use sync_report::{Change, ChangeStatus, LockfileOutcome, Rewrite, SyncKind, SyncReport};
