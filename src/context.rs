//! Service context bundling all port trait objects.

use crate::adapters::live::{HttpSource, LiveClock, LiveFileSystem};
use crate::ports::clock::Clock;
use crate::ports::filesystem::FileSystem;
use crate::ports::source::SnapshotSource;

/// Bundles all port trait objects into a single context.
///
/// Passed explicitly into every operation that touches the outside world.
pub struct ServiceContext {
    /// Clock for snapshot and report timestamps.
    pub clock: Box<dyn Clock>,
    /// Filesystem for snapshot, report, and curriculum I/O.
    pub fs: Box<dyn FileSystem>,
    /// Upstream source for guideline and STAR documents.
    pub source: Box<dyn SnapshotSource>,
}

impl ServiceContext {
    /// Creates a live context with the system clock, real disk, and HTTP.
    #[must_use]
    pub fn live() -> Self {
        Self {
            clock: Box::new(LiveClock),
            fs: Box::new(LiveFileSystem),
            source: Box::new(HttpSource::new()),
        }
    }

    /// Creates a context from explicit adapters.
    #[must_use]
    pub fn new(
        clock: Box<dyn Clock>,
        fs: Box<dyn FileSystem>,
        source: Box<dyn SnapshotSource>,
    ) -> Self {
        Self { clock, fs, source }
    }
}
