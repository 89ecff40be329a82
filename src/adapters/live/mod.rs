//! Live adapters for real clock, disk, and network access.

pub mod clock;
pub mod filesystem;
pub mod http;

pub use clock::LiveClock;
pub use filesystem::LiveFileSystem;
pub use http::HttpSource;
