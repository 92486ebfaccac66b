use std::path::PathBuf;

/// Directory taxonkit searches for the NCBI taxonomy dump when no
/// --data-dir is given: ${HOME}/.taxonkit
pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".taxonkit")
}

/// Default location of the taxonkit-rs configuration file.
/// Checks TAXONKIT_RS_CONFIG, falls back to <config dir>/taxonkit-rs/config.toml
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var("TAXONKIT_RS_CONFIG") {
        return PathBuf::from(path);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("taxonkit-rs")
        .join("config.toml")
}

/// Path of the nodes dump inside a taxonomy data directory
pub fn nodes_dump_path(data_dir: &std::path::Path) -> PathBuf {
    data_dir.join("nodes.dmp")
}
