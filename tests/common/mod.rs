//! Common test utilities for taxonkit-rs integration tests
//!
//! Provides a mock `taxonkit` shell script that records every invocation
//! and emits canned output shaped like the real tool's.
#![allow(dead_code)]

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

use taxonkit_rs::{TaxonKit, TaxonKitConfig, TaxonKitError};

const MOCK_SCRIPT: &str = r#"#!/bin/sh
# Mock taxonkit binary for testing
echo "$*" >> "__LOG__"
cmd="$1"
shift
case "$cmd" in
    version)
        echo "taxonkit v0.17.0"
        ;;
    list)
        ids=""
        while [ "$#" -gt 0 ]; do
            case "$1" in
                --ids) shift; ids="$1" ;;
            esac
            shift
        done
        if [ "$ids" = "8204,2468" ]; then
            echo '{"8204 [species] Anarhichas lupus": {}, "2468 [species] Plasmid NR79": {}}'
        else
            echo '{"83882 [genus] Apogon": {"638272 [subgenus] Apogon": {"308069 [species] Apogon maculatus": {}}}}'
        fi
        ;;
    lineage)
        case "$*" in
            *--no-lineage*)
                while IFS= read -r id; do
                    printf '%s\tName %s\n' "$id" "$id"
                done
                ;;
            *)
                while IFS= read -r id; do
                    if [ "$id" = "0" ]; then
                        printf '%s\t-1\t\t\t\n' "$id"
                    else
                        printf '%s\t%s\tcellular organisms;Taxon %s\t131567;%s\tspecies\n' "$id" "$id" "$id" "$id"
                    fi
                done
                ;;
        esac
        ;;
    reformat)
        for last; do :; done
        if [ ! -s "$last" ]; then
            echo "[ERRO] empty lineage file: $last" >&2
            exit 3
        fi
        while IFS= read -r row; do
            id=$(printf '%s' "$row" | cut -f1)
            code=$(printf '%s' "$row" | cut -f2)
            if [ "$code" = "-1" ]; then
                printf '%s\t\t\n' "$row"
            else
                printf '%s\tStandard %s\t%s\n' "$row" "$id" "$id"
            fi
        done < "$last"
        ;;
    name2taxid)
        while IFS= read -r name; do
            if [ "$name" = "Rexia erectus" ]; then
                printf '%s\t\t\n' "$name"
            else
                printf '%s\t9606\tspecies\n' "$name"
            fi
        done
        ;;
    filter)
        cat
        ;;
    lca)
        while IFS= read -r line; do
            printf '%s\t%s\n' "$line" "${line%% *}"
        done
        ;;
    *)
        echo "unknown command: $cmd" >&2
        exit 2
        ;;
esac
"#;

const FAILING_SCRIPT: &str = r#"#!/bin/sh
echo "$*" >> "__LOG__"
if [ "$1" = "version" ]; then
    echo "taxonkit v0.17.0"
    exit 0
fi
echo "[ERRO] taxonomy data not found" >&2
exit 1
"#;

const BROKEN_SCRIPT: &str = r#"#!/bin/sh
echo "$*" >> "__LOG__"
echo "taxonkit: cannot execute" >&2
exit 126
"#;

/// A mock taxonkit installation living in a temporary directory
pub struct MockTaxonKit {
    temp_dir: TempDir,
    pub binary: PathBuf,
    pub log: PathBuf,
}

impl MockTaxonKit {
    /// Mock that answers every subcommand
    pub fn new() -> Self {
        Self::with_script(MOCK_SCRIPT)
    }

    /// Mock whose subcommands all fail after `version` succeeds
    pub fn failing() -> Self {
        Self::with_script(FAILING_SCRIPT)
    }

    /// Mock whose `version` call already fails
    pub fn broken() -> Self {
        Self::with_script(BROKEN_SCRIPT)
    }

    fn with_script(script: &str) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let binary = temp_dir.path().join("taxonkit");
        let log = temp_dir.path().join("invocations.log");

        {
            let mut file = File::create(&binary).unwrap();
            let script = script.replace("__LOG__", log.to_str().unwrap());
            file.write_all(script.as_bytes()).unwrap();
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&binary).unwrap().permissions();
            perms.set_mode(0o755);
            fs::set_permissions(&binary, perms).unwrap();
        }

        MockTaxonKit {
            temp_dir,
            binary,
            log,
        }
    }

    pub fn config(&self) -> TaxonKitConfig {
        TaxonKitConfig {
            binary: self.binary.clone(),
            ..Default::default()
        }
    }

    /// Initialize a handle, retrying while another test's fork still holds the script open
    pub fn taxonkit_with(&self, config: TaxonKitConfig) -> Result<TaxonKit, TaxonKitError> {
        let mut attempts = 0;
        loop {
            match TaxonKit::new(config.clone()) {
                Err(TaxonKitError::Io(e)) if e.raw_os_error() == Some(26) && attempts < 10 => {
                    attempts += 1;
                    std::thread::sleep(Duration::from_millis(50));
                }
                other => return other,
            }
        }
    }

    pub fn taxonkit(&self) -> TaxonKit {
        self.taxonkit_with(self.config()).unwrap()
    }

    /// Argument lists of every recorded invocation, in order
    pub fn invocations(&self) -> Vec<String> {
        fs::read_to_string(&self.log)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// A taxonomy data directory holding a minimal nodes.dmp
    pub fn data_dir(&self) -> PathBuf {
        let dir = self.temp_dir.path().join("taxdump");
        fs::create_dir_all(&dir).unwrap();
        write_nodes_dump(&dir);
        dir
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }
}

pub fn write_nodes_dump(dir: &Path) {
    fs::write(
        dir.join("nodes.dmp"),
        "1\t|\t1\t|\tno rank\t|\t\t|\t8\t|\t0\t|\t1\t|\t0\t|\t0\t|\t0\t|\t0\t|\t0\t|\t\t|\n",
    )
    .unwrap();
}
