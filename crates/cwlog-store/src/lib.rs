pub mod error;
pub mod filters;
pub mod kv;
pub mod paths;
pub mod persist;
pub mod session;

pub use filters::{FilterState, FILTERS_KEY};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use persist::Persistence;
pub use session::{Session, Storage};
