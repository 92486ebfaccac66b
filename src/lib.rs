//! Typed bindings for the TaxonKit NCBI taxonomy toolkit.
//!
//! All taxonomy work happens inside the `taxonkit` binary; this crate builds
//! its command lines, streams input to it and parses what it prints.
//!
//! ```no_run
//! use taxonkit_rs::{CommonOptions, TaxonKit, TaxonKitConfig};
//!
//! let taxonkit = TaxonKit::new(TaxonKitConfig::default())?;
//! let result = taxonkit.list([13685, 9903], &CommonOptions::default())?;
//! for entry in &result {
//!     let (taxon, tree) = entry?;
//!     println!("{} ({}): {} related taxa", taxon.name, taxon.taxid, tree.traverse().count());
//! }
//! # Ok::<(), taxonkit_rs::TaxonKitError>(())
//! ```

pub mod bio;
pub mod core;
pub mod error;
pub mod logging;
pub mod tools;

pub use crate::bio::{ListResult, Taxon};
pub use crate::core::config::{load_config, save_config, Config, TaxonKitConfig};
pub use crate::core::validation::{validate_data_dir, validate_threads};
pub use crate::error::{TaxonKitError, TaxonKitResult};
pub use crate::tools::{
    CommonOptions, FilterOptions, LcaOptions, LineageOptions, LineageRecord, Name2TaxidOptions,
    Name2TaxidRecord, NameRecord, TaxonKit,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
