//! CLI command implementations.

mod dictionary;
mod indices;
mod objects;
mod profile;
mod search;
mod transformations;

pub use dictionary::DictionaryCmd;
pub use indices::IndicesCmd;
pub use objects::ObjectsCmd;
pub use profile::ProfileCmd;
pub use search::SearchCmd;
pub use transformations::TransformationsCmd;
