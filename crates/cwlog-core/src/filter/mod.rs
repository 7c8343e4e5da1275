mod patch;
mod snapshot;

pub use patch::{FilterPatch, IdentifierPatch};
pub use snapshot::FilterSnapshot;
