//! Port traits defining external boundaries.
//!
//! The drift engine and impact mapper are pure; everything they read or write
//! (time, files, upstream HTTP sources) goes through one of these traits.
//! Implementations live in `src/adapters/`.

pub mod clock;
pub mod filesystem;
pub mod source;

pub use clock::Clock;
pub use filesystem::FileSystem;
pub use source::{FetchFuture, SnapshotSource};
