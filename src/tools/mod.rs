//! Bindings for the external taxonkit tool
//!
//! Each operation maps onto one taxonkit subcommand: the command line is
//! built from typed options, input is streamed on stdin, and the output is
//! parsed into records or a [`ListResult`](crate::bio::ListResult) tree.

pub mod options;
pub mod records;
pub mod taxonkit;
pub mod types;

pub use options::{CommonOptions, FilterOptions, LcaOptions, LineageOptions, Name2TaxidOptions};
pub use records::{LineageRecord, Name2TaxidRecord, NameRecord};
pub use taxonkit::TaxonKit;
pub use types::Subcommand;
