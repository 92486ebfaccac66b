//! Per-call options for taxonkit subcommands

use std::path::PathBuf;

use crate::core::config::TaxonKitConfig;

/// Options shared by every subcommand; unset fields fall back to the configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommonOptions {
    pub threads: Option<usize>,
    pub data_dir: Option<PathBuf>,
    pub debug: bool,
}

impl CommonOptions {
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(data_dir.into());
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Merge with configuration defaults. A thread count of zero means "taxonkit default".
    pub(crate) fn resolve(&self, config: &TaxonKitConfig) -> CommonOptions {
        CommonOptions {
            threads: self.threads.or(config.threads).filter(|&n| n > 0),
            data_dir: self.data_dir.clone().or_else(|| config.data_dir.clone()),
            debug: self.debug || config.debug,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineageOptions {
    /// Output format for `taxonkit reformat --format`, e.g. "{f};{g};{s};{S}"
    pub format: Option<String>,
    pub common: CommonOptions,
}

impl LineageOptions {
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Name2TaxidOptions {
    /// Only match scientific names, ignoring synonyms
    pub sci_name: bool,
    pub common: CommonOptions,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOptions {
    /// Keep taxa at these ranks
    pub equal_to: Vec<String>,
    /// Keep taxa ranked higher than this rank
    pub higher_than: Option<String>,
    /// Keep taxa ranked lower than this rank
    pub lower_than: Option<String>,
    pub discard_noranks: bool,
    pub save_predictable_norank: bool,
    pub discard_root: bool,
    pub root_taxid: Option<u32>,
    /// Ranks to drop regardless of the other filters
    pub black_list: Vec<String>,
    /// Custom rank order file
    pub rank_file: Option<PathBuf>,
    pub common: CommonOptions,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LcaOptions {
    pub skip_deleted: bool,
    pub skip_unfound: bool,
    pub common: CommonOptions,
}
