//! Subprocess bindings for the taxonkit command-line tool

use std::ffi::OsString;
use std::fmt::Display;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tracing::{debug, info, warn};

use super::options::{
    CommonOptions, FilterOptions, LcaOptions, LineageOptions, Name2TaxidOptions,
};
use super::records::{self, LineageRecord, Name2TaxidRecord, NameRecord};
use super::types::Subcommand;
use crate::bio::taxonomy::ListResult;
use crate::core::config::{Config, TaxonKitConfig};
use crate::core::validation::validate_data_dir;
use crate::core::version::parse_taxonkit_version;
use crate::error::{TaxonKitError, TaxonKitResult};

/// Handle to an installed taxonkit binary.
///
/// Construction resolves the binary and runs `taxonkit version` once, so a
/// missing or broken installation fails here rather than on the first query.
#[derive(Debug, Clone)]
pub struct TaxonKit {
    binary_path: PathBuf,
    version: String,
    config: TaxonKitConfig,
}

impl TaxonKit {
    pub fn new(config: TaxonKitConfig) -> TaxonKitResult<Self> {
        let binary_path = which::which(&config.binary).map_err(|e| {
            TaxonKitError::BinaryNotFound(format!("{}: {}", config.binary.display(), e))
        })?;

        let output = Command::new(&binary_path)
            .arg(Subcommand::Version.name())
            .stdin(Stdio::null())
            .output()?;
        check_status(&output)?;

        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        debug!("Using {} at {}", version, binary_path.display());

        Ok(Self {
            binary_path,
            version,
            config,
        })
    }

    /// Initialize from the config file and environment
    pub fn from_env() -> TaxonKitResult<Self> {
        Self::new(Config::load_or_default()?.taxonkit)
    }

    /// Raw output of `taxonkit version`, e.g. "taxonkit v0.17.0"
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn semver(&self) -> TaxonKitResult<semver::Version> {
        parse_taxonkit_version(&self.version)
    }

    pub fn binary_path(&self) -> &Path {
        &self.binary_path
    }

    pub fn config(&self) -> &TaxonKitConfig {
        &self.config
    }

    /// Taxon trees below the given taxids (`taxonkit list`)
    pub fn list<I, T>(&self, ids: I, opts: &CommonOptions) -> TaxonKitResult<ListResult>
    where
        I: IntoIterator<Item = T>,
        T: Display,
    {
        match self.run_list(ids, opts)? {
            Some(json) => ListResult::from_json(&json),
            None => Ok(ListResult::default()),
        }
    }

    /// Like [`TaxonKit::list`] but returns the JSON mapping untouched
    pub fn list_raw<I, T>(&self, ids: I, opts: &CommonOptions) -> TaxonKitResult<serde_json::Value>
    where
        I: IntoIterator<Item = T>,
        T: Display,
    {
        match self.run_list(ids, opts)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(serde_json::Value::Object(Default::default())),
        }
    }

    fn run_list<I, T>(&self, ids: I, opts: &CommonOptions) -> TaxonKitResult<Option<String>>
    where
        I: IntoIterator<Item = T>,
        T: Display,
    {
        let Some(idlist) = join_input(ids, ",") else {
            warn!("No taxids provided to taxonkit list; returning an empty result");
            return Ok(None);
        };
        let opts = opts.resolve(&self.config);

        let mut args = self.base_args(Subcommand::List);
        args.extend(os_args(["--json", "--show-name", "--show-rank", "--ids", idlist.as_str()]));
        args.extend(common_args(&opts)?);

        let output = self.execute(&args, None, Stdio::piped(), opts.debug)?;
        Ok(Some(String::from_utf8_lossy(&output.stdout).into_owned()))
    }

    /// Full and reformatted lineages (`taxonkit lineage` then `taxonkit reformat`).
    ///
    /// The lineage output is staged in a temporary file that is removed when
    /// this call returns.
    pub fn lineage<I, T>(&self, ids: I, opts: &LineageOptions) -> TaxonKitResult<Vec<LineageRecord>>
    where
        I: IntoIterator<Item = T>,
        T: Display,
    {
        let Some(idlist) = join_input(ids, "\n") else {
            warn!("No taxids provided to taxonkit lineage; returning an empty result");
            return Ok(Vec::new());
        };
        let common = opts.common.resolve(&self.config);
        let common_flags = common_args(&common)?;

        let mut args = self.base_args(Subcommand::Lineage);
        args.extend(os_args([
            "--show-lineage-taxids",
            "--show-rank",
            "--show-status-code",
        ]));
        args.extend(common_flags.iter().cloned());

        let lineage_file = tempfile::Builder::new()
            .prefix("taxonkit-")
            .suffix("-lineage.txt")
            .tempfile()?;
        let stdout = Stdio::from(lineage_file.as_file().try_clone()?);
        self.execute(&args, Some(idlist), stdout, common.debug)?;
        lineage_file.as_file().sync_all()?;

        let mut args = self.base_args(Subcommand::Reformat);
        if let Some(format) = &opts.format {
            args.extend(os_args(["--format", format.as_str()]));
        }
        args.extend(common_flags);
        args.extend(os_args(["--lineage-field", "3", "--show-lineage-taxids"]));
        args.push(lineage_file.path().as_os_str().to_owned());

        let output = self.execute(&args, None, Stdio::piped(), common.debug)?;
        records::parse_lineage(&String::from_utf8_lossy(&output.stdout))
    }

    /// Scientific names of the given taxids
    pub fn name<I, T>(&self, ids: I, opts: &CommonOptions) -> TaxonKitResult<Vec<NameRecord>>
    where
        I: IntoIterator<Item = T>,
        T: Display,
    {
        let Some(idlist) = join_input(ids, "\n") else {
            warn!("No taxids provided to taxonkit lineage; returning an empty result");
            return Ok(Vec::new());
        };
        let opts = opts.resolve(&self.config);

        let mut args = self.base_args(Subcommand::Lineage);
        args.extend(os_args(["--show-name", "--no-lineage"]));
        args.extend(common_args(&opts)?);

        let output = self.execute(&args, Some(idlist), Stdio::piped(), opts.debug)?;
        records::parse_names(&String::from_utf8_lossy(&output.stdout))
    }

    /// Look up taxids by scientific name or synonym (`taxonkit name2taxid`)
    pub fn name2taxid<I, T>(
        &self,
        names: I,
        opts: &Name2TaxidOptions,
    ) -> TaxonKitResult<Vec<Name2TaxidRecord>>
    where
        I: IntoIterator<Item = T>,
        T: Display,
    {
        let Some(namelist) = join_input(names, "\n") else {
            warn!("No names provided to taxonkit name2taxid; returning an empty result");
            return Ok(Vec::new());
        };
        let common = opts.common.resolve(&self.config);

        let mut args = self.base_args(Subcommand::Name2Taxid);
        args.push("--show-rank".into());
        if opts.sci_name {
            args.push("--sci-name".into());
        }
        args.extend(common_args(&common)?);

        let output = self.execute(&args, Some(namelist), Stdio::piped(), common.debug)?;
        records::parse_name2taxid(&String::from_utf8_lossy(&output.stdout))
    }

    /// Keep only the taxids passing the rank filters (`taxonkit filter`)
    pub fn filter<I, T>(&self, ids: I, opts: &FilterOptions) -> TaxonKitResult<Vec<u32>>
    where
        I: IntoIterator<Item = T>,
        T: Display,
    {
        let Some(idlist) = join_input(ids, "\n") else {
            warn!("No taxids provided to taxonkit filter; returning an empty result");
            return Ok(Vec::new());
        };
        let common = opts.common.resolve(&self.config);

        let mut args = self.base_args(Subcommand::Filter);
        if !opts.equal_to.is_empty() {
            args.extend(os_args(["--equal-to", opts.equal_to.join(",").as_str()]));
        }
        if let Some(rank) = &opts.higher_than {
            args.extend(os_args(["--higher-than", rank.as_str()]));
        }
        if let Some(rank) = &opts.lower_than {
            args.extend(os_args(["--lower-than", rank.as_str()]));
        }
        if opts.discard_noranks {
            args.push("--discard-noranks".into());
        }
        if opts.save_predictable_norank {
            args.push("--save-predictable-norank".into());
        }
        if opts.discard_root {
            args.push("--discard-root".into());
        }
        if let Some(root) = opts.root_taxid {
            args.extend(os_args(["--root-taxid", root.to_string().as_str()]));
        }
        if !opts.black_list.is_empty() {
            args.extend(os_args(["--black-list", opts.black_list.join(",").as_str()]));
        }
        if let Some(rank_file) = &opts.rank_file {
            args.push("--rank-file".into());
            args.push(rank_file.as_os_str().to_owned());
        }
        args.extend(common_args(&common)?);

        let output = self.execute(&args, Some(idlist), Stdio::piped(), common.debug)?;
        records::parse_taxids(&String::from_utf8_lossy(&output.stdout))
    }

    /// Lowest common ancestor of one set of taxids
    pub fn lca<I, T>(&self, ids: I, opts: &LcaOptions) -> TaxonKitResult<Option<u32>>
    where
        I: IntoIterator<Item = T>,
        T: Display,
    {
        let Some(query) = join_input(ids, " ") else {
            warn!("No taxids provided to taxonkit lca; returning an empty result");
            return Ok(None);
        };
        let lcas = self.run_lca(vec![query], opts)?;
        Ok(lcas.into_iter().next().flatten())
    }

    /// Lowest common ancestor of each group of taxids.
    ///
    /// The result has one entry per input group, in order; empty groups are not
    /// sent to taxonkit and yield `None`.
    pub fn lca_multi<G, I, T>(&self, groups: G, opts: &LcaOptions) -> TaxonKitResult<Vec<Option<u32>>>
    where
        G: IntoIterator<Item = I>,
        I: IntoIterator<Item = T>,
        T: Display,
    {
        let mut slots = Vec::new();
        let mut queries = Vec::new();
        for (index, group) in groups.into_iter().enumerate() {
            match join_input(group, " ") {
                Some(query) => {
                    queries.push(query);
                    slots.push(true);
                }
                None => {
                    warn!("Skipping empty taxid group {} for taxonkit lca", index);
                    slots.push(false);
                }
            }
        }
        if queries.is_empty() {
            warn!("No taxids provided to taxonkit lca; returning an empty result");
            return Ok(vec![None; slots.len()]);
        }

        let mut lcas = self.run_lca(queries, opts)?.into_iter();
        Ok(slots
            .into_iter()
            .map(|sent| if sent { lcas.next().flatten() } else { None })
            .collect())
    }

    /// One query line per entry; the result has exactly one LCA per query
    fn run_lca(&self, queries: Vec<String>, opts: &LcaOptions) -> TaxonKitResult<Vec<Option<u32>>> {
        let common = opts.common.resolve(&self.config);

        let mut args = self.base_args(Subcommand::Lca);
        if opts.skip_deleted {
            args.push("--skip-deleted".into());
        }
        if opts.skip_unfound {
            args.push("--skip-unfound".into());
        }
        args.extend(common_args(&common)?);

        let expected = queries.len();
        let mut input = queries.join("\n");
        input.push('\n');

        let output = self.execute(&args, Some(input), Stdio::piped(), common.debug)?;
        let lcas = records::parse_lca(&String::from_utf8_lossy(&output.stdout))?;
        if lcas.len() != expected {
            return Err(TaxonKitError::Parse(format!(
                "taxonkit lca returned {} rows for {} queries",
                lcas.len(),
                expected
            )));
        }
        Ok(lcas)
    }

    fn base_args(&self, subcommand: Subcommand) -> Vec<OsString> {
        vec![subcommand.name().into()]
    }

    /// Run taxonkit to completion, feeding `input` on stdin from a helper thread
    fn execute(
        &self,
        args: &[OsString],
        input: Option<String>,
        stdout: Stdio,
        verbose: bool,
    ) -> TaxonKitResult<Output> {
        let command_line = self.command_line(args);
        if verbose {
            info!("{}", command_line);
        } else {
            debug!("{}", command_line);
        }

        let mut child = Command::new(&self.binary_path)
            .args(args)
            .stdin(if input.is_some() { Stdio::piped() } else { Stdio::null() })
            .stdout(stdout)
            .stderr(Stdio::piped())
            .spawn()?;

        let output = std::thread::scope(|scope| -> TaxonKitResult<Output> {
            let writer = child.stdin.take().zip(input).map(|(mut stdin, input)| {
                scope.spawn(move || stdin.write_all(input.as_bytes()))
            });

            let output = child.wait_with_output()?;

            // A child that exits early closes its stdin; its exit status reports why
            if let Some(Ok(Err(e))) = writer.map(|w| w.join()) {
                if e.kind() != ErrorKind::BrokenPipe {
                    return Err(e.into());
                }
            }
            Ok(output)
        })?;

        check_status(&output)?;
        Ok(output)
    }

    fn command_line(&self, args: &[OsString]) -> String {
        let program = self
            .binary_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "taxonkit".to_string());
        std::iter::once(program)
            .chain(args.iter().map(|arg| arg.to_string_lossy().into_owned()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn check_status(output: &Output) -> TaxonKitResult<()> {
    if output.status.success() {
        Ok(())
    } else {
        Err(TaxonKitError::Cli(
            String::from_utf8_lossy(&output.stderr).into_owned(),
        ))
    }
}

/// Join the items with `separator`; `None` when there are none.
/// Newline-separated input gets a trailing newline so the last line is terminated.
fn join_input<I, T>(items: I, separator: &str) -> Option<String>
where
    I: IntoIterator<Item = T>,
    T: Display,
{
    let items: Vec<String> = items.into_iter().map(|item| item.to_string()).collect();
    if items.is_empty() {
        return None;
    }
    let mut joined = items.join(separator);
    if separator == "\n" {
        joined.push('\n');
    }
    Some(joined)
}

fn os_args<'a>(args: impl IntoIterator<Item = &'a str>) -> Vec<OsString> {
    args.into_iter().map(OsString::from).collect()
}

/// --threads and --data-dir, validating the data directory first
fn common_args(opts: &CommonOptions) -> TaxonKitResult<Vec<OsString>> {
    let mut args = Vec::new();
    if let Some(threads) = opts.threads {
        args.push("--threads".into());
        args.push(threads.to_string().into());
    }
    if let Some(data_dir) = &opts.data_dir {
        args.push("--data-dir".into());
        args.push(validate_data_dir(data_dir)?.into_os_string());
    }
    Ok(args)
}
