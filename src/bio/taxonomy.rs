//! Taxon records and the nested tree produced by `taxonkit list --json`

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{TaxonKitError, TaxonKitResult};

/// A single taxon as reported by taxonkit
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Taxon {
    pub taxid: u32,
    pub rank: String,
    pub name: String,
}

impl Taxon {
    pub fn new(taxid: u32, rank: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            taxid,
            rank: rank.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for Taxon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] {}", self.taxid, self.rank, self.name)
    }
}

/// Parse a `"<taxid> [<rank>] <name>"` key.
///
/// Only the first two bracket characters delimit fields, so brackets later in
/// the name survive verbatim. The rank is kept as-is; taxid and name are trimmed.
impl FromStr for Taxon {
    type Err = TaxonKitError;

    fn from_str(key: &str) -> TaxonKitResult<Self> {
        let mut parts = key.splitn(3, |c: char| c == '[' || c == ']');
        let (taxid, rank, name) = match (parts.next(), parts.next(), parts.next()) {
            (Some(taxid), Some(rank), Some(name)) => (taxid, rank, name),
            _ => {
                return Err(TaxonKitError::Parse(format!(
                    "malformed taxon key {:?}: expected \"<taxid> [<rank>] <name>\"",
                    key
                )))
            }
        };

        let taxid = taxid.trim().parse::<u32>().map_err(|e| {
            TaxonKitError::Parse(format!("invalid taxid in taxon key {:?}: {}", key, e))
        })?;

        Ok(Self {
            taxid,
            rank: rank.to_string(),
            name: name.trim().to_string(),
        })
    }
}

/// Taxon tree returned by `taxonkit list`.
///
/// Each key is a composite `"<taxid> [<rank>] <name>"` string mapping to the
/// subtree below it; an empty subtree is a leaf. Keys keep the order taxonkit
/// emitted them in. Keys are only parsed into [`Taxon`] values when iterated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListResult {
    nodes: IndexMap<String, ListResult>,
}

impl ListResult {
    /// Build a tree from taxonkit's JSON output; fails without partial results.
    ///
    /// Nesting is bounded by serde_json's recursion limit of 128 levels; deeper
    /// input is rejected with [`TaxonKitError::Json`]. NCBI lineages stay well
    /// below that.
    pub fn from_json(json: &str) -> TaxonKitResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Number of top-level taxa
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Subtree stored under a composite key
    pub fn get(&self, key: &str) -> Option<&ListResult> {
        self.nodes.get(key)
    }

    /// Composite keys of the top-level taxa, unparsed
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// `(taxon, subtree)` pairs for the top-level taxa
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.nodes.iter(),
        }
    }

    /// Every taxon in the tree, depth-first, each before its descendants
    pub fn traverse(&self) -> Traverse<'_> {
        Traverse {
            stack: vec![self.nodes.iter()],
        }
    }

    /// The raw nested mapping as a JSON value
    pub fn to_value(&self) -> TaxonKitResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl FromStr for ListResult {
    type Err = TaxonKitError;

    fn from_str(json: &str) -> TaxonKitResult<Self> {
        Self::from_json(json)
    }
}

impl fmt::Display for ListResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser).map_err(|_| fmt::Error)?;
        f.write_str(&String::from_utf8_lossy(&buf))
    }
}

impl<'a> IntoIterator for &'a ListResult {
    type Item = TaxonKitResult<(Taxon, &'a ListResult)>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the top-level `(taxon, subtree)` pairs of a [`ListResult`]
pub struct Iter<'a> {
    inner: indexmap::map::Iter<'a, String, ListResult>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = TaxonKitResult<(Taxon, &'a ListResult)>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(key, subtree)| key.parse().map(|taxon| (taxon, subtree)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

/// Pre-order walk over every taxon of a [`ListResult`]
pub struct Traverse<'a> {
    stack: Vec<indexmap::map::Iter<'a, String, ListResult>>,
}

impl<'a> Iterator for Traverse<'a> {
    type Item = TaxonKitResult<Taxon>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(level) = self.stack.last_mut() {
            match level.next() {
                Some((key, subtree)) => {
                    if !subtree.is_empty() {
                        self.stack.push(subtree.nodes.iter());
                    }
                    return Some(key.parse());
                }
                None => {
                    self.stack.pop();
                }
            }
        }
        None
    }
}
