//! Common types for taxonkit invocations

/// taxonkit subcommands wrapped by this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subcommand {
    Version,
    List,
    Lineage,
    Reformat,
    Name2Taxid,
    Filter,
    Lca,
}

impl Subcommand {
    /// Name of the subcommand on the taxonkit command line
    pub fn name(&self) -> &'static str {
        match self {
            Subcommand::Version => "version",
            Subcommand::List => "list",
            Subcommand::Lineage => "lineage",
            Subcommand::Reformat => "reformat",
            Subcommand::Name2Taxid => "name2taxid",
            Subcommand::Filter => "filter",
            Subcommand::Lca => "lca",
        }
    }
}

impl std::fmt::Display for Subcommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
