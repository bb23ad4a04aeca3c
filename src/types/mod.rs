//! Request and response models of the Search and Ingestion APIs.

mod dictionary;
mod index;
mod ingestion;
mod objects;
mod task;

pub use dictionary::*;
pub use index::*;
pub use ingestion::*;
pub use objects::*;
pub use task::*;
