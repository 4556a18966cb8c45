pub mod caching;
pub mod sheets;
pub mod util;

pub use caching::{CachingProjectProvider, SnapshotCache};
pub use sheets::PublishedSheetsProvider;
