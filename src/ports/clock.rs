//! Clock port for stamping snapshots and reports.

use chrono::{DateTime, SecondsFormat, Utc};

/// Provides the current time.
///
/// Snapshot timestamps and `analysis_date` fields come from here so tests can
/// pin them.
pub trait Clock: Send + Sync {
    /// Returns the current UTC time.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current time as RFC 3339 with millisecond precision and a `Z` suffix.
    fn now_iso(&self) -> String {
        self.now().to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}
