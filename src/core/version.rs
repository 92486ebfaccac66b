//! Version handling for the taxonkit binary

use semver::Version;
use crate::error::{TaxonKitError, TaxonKitResult};

/// Parse the output of `taxonkit version` (e.g. "taxonkit v0.17.0")
pub fn parse_taxonkit_version(output: &str) -> TaxonKitResult<Version> {
    let raw = output
        .split_whitespace()
        .last()
        .ok_or_else(|| TaxonKitError::Version("empty version string".to_string()))?;

    Version::parse(raw.trim_start_matches('v'))
        .map_err(|e| TaxonKitError::Version(format!("Invalid version format {:?}: {}", output, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parsing() {
        let version = parse_taxonkit_version("taxonkit v0.17.0").unwrap();
        assert_eq!(version.major, 0);
        assert_eq!(version.minor, 17);
        assert_eq!(version.patch, 0);

        let bare = parse_taxonkit_version("0.8.0\n").unwrap();
        assert_eq!(bare, Version::new(0, 8, 0));
    }

    #[test]
    fn test_version_parsing_errors() {
        assert!(matches!(parse_taxonkit_version(""), Err(TaxonKitError::Version(_))));
        assert!(matches!(
            parse_taxonkit_version("taxonkit dev"),
            Err(TaxonKitError::Version(_))
        ));
    }
}
