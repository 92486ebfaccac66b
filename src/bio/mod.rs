pub mod taxonomy;

pub use taxonomy::{ListResult, Taxon};
