//! Typed rows parsed from taxonkit's tab-separated output

use serde::{Deserialize, Serialize};

use crate::error::{TaxonKitError, TaxonKitResult};

/// One row of `taxonkit lineage` piped through `taxonkit reformat`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineageRecord {
    pub taxid: u32,
    /// -1 if not found, 0 if deleted, the new taxid if merged, otherwise `taxid`
    pub code: i64,
    /// Reformatted ("standard") lineage
    pub lineage: String,
    pub lineage_taxids: String,
    pub rank: String,
    pub full_lineage: String,
    pub full_lineage_taxids: String,
}

/// One row of `taxonkit lineage --show-name --no-lineage`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRecord {
    pub taxid: u32,
    pub name: String,
}

/// One row of `taxonkit name2taxid --show-rank`; unmatched names have no taxid or rank
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Name2TaxidRecord {
    pub name: String,
    pub taxid: Option<u32>,
    pub rank: Option<String>,
}

fn rows(output: &str) -> impl Iterator<Item = Vec<&str>> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.split('\t').collect())
}

fn parse_field<T: std::str::FromStr>(value: &str, column: &str, line: &[&str]) -> TaxonKitResult<T>
where
    T::Err: std::fmt::Display,
{
    value.trim().parse::<T>().map_err(|e| {
        TaxonKitError::Parse(format!(
            "invalid {} {:?} in row {:?}: {}",
            column,
            value,
            line.join("\t"),
            e
        ))
    })
}

fn optional<'a>(value: Option<&&'a str>) -> Option<&'a str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

/// Columns in: TaxID, Code, FullLineage, FullLineageTaxIDs, Rank, Lineage, LineageTaxIDs
pub fn parse_lineage(output: &str) -> TaxonKitResult<Vec<LineageRecord>> {
    rows(output)
        .map(|fields| {
            if fields.len() < 2 {
                return Err(TaxonKitError::Parse(format!(
                    "expected at least TaxID and Code lineage columns, found {}: {:?}",
                    fields.len(),
                    fields.join("\t")
                )));
            }
            let column = |i: usize| fields.get(i).copied().unwrap_or("").to_string();

            Ok(LineageRecord {
                taxid: parse_field(fields[0], "TaxID", &fields)?,
                code: parse_field(fields[1], "Code", &fields)?,
                full_lineage: column(2),
                full_lineage_taxids: column(3),
                rank: column(4),
                lineage: column(5),
                lineage_taxids: column(6),
            })
        })
        .collect()
}

/// Columns in: TaxID, Name
pub fn parse_names(output: &str) -> TaxonKitResult<Vec<NameRecord>> {
    rows(output)
        .map(|fields| {
            Ok(NameRecord {
                taxid: parse_field(fields[0], "TaxID", &fields)?,
                name: fields.get(1).copied().unwrap_or("").to_string(),
            })
        })
        .collect()
}

/// Columns in: Name, TaxID, Rank
pub fn parse_name2taxid(output: &str) -> TaxonKitResult<Vec<Name2TaxidRecord>> {
    rows(output)
        .map(|fields| {
            let taxid = match optional(fields.get(1)) {
                Some(value) => Some(parse_field(value, "TaxID", &fields)?),
                None => None,
            };
            Ok(Name2TaxidRecord {
                name: fields[0].to_string(),
                taxid,
                rank: optional(fields.get(2)).map(str::to_string),
            })
        })
        .collect()
}

/// One taxid per line
pub fn parse_taxids(output: &str) -> TaxonKitResult<Vec<u32>> {
    rows(output)
        .map(|fields| parse_field(fields[0], "TaxID", &fields))
        .collect()
}

/// Columns in: query taxids, LCA taxid; an empty LCA column is `None`
pub fn parse_lca(output: &str) -> TaxonKitResult<Vec<Option<u32>>> {
    rows(output)
        .map(|fields| match optional(fields.last()) {
            Some(lca) => Ok(Some(parse_field(lca, "LCA", &fields)?)),
            None => Ok(None),
        })
        .collect()
}
