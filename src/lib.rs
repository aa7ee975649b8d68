//! Read-only inspection of a podio-backup SQLite database.
//!
//! # Intention
//!
//! - Show the latest scan, its app/file/download counts and its JSON summary.
//! - Debugging aid for the backup app's local database, nothing more.
//!
//! # Architectural Boundaries
//!
//! - Only reads. The backup app owns the schema and every row in it.
//! - No scanning, downloading or migration logic.

pub mod config;
pub mod error;
pub mod inspector;
pub mod report;
pub mod sqlite;
pub mod summary;

pub use config::InspectorConfig;
pub use error::{InspectError, Result};
pub use inspector::Inspector;
pub use report::Report;

use std::io::Write;

/// Open, inspect, render to `out`, close.
pub fn run<W: Write>(config: &InspectorConfig, out: &mut W) -> Result<()> {
    let inspector = Inspector::open(config)?;
    let report = inspector.inspect()?;
    report.render(out)?;
    inspector.close()
}
