//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on the FileSystem boundary trait but are themselves
//! concrete structs, not traits.

mod import;
mod snapshot;

pub use import::{ImportService, ImportSummary, RecordKind};
pub use snapshot::SnapshotService;
