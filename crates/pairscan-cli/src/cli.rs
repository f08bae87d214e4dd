use clap::{Args, Parser, Subcommand, ValueEnum};
use pairscan::engine::config::{StoreDensity, StoreKind};
use pairscan::engine::keyer::Validation;
use serde::Deserialize;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "pairscan - find geometrically matching residue pairs between protein structures using a spatially keyed index.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads used to scan query cells.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Index a set of structures and report every residue pair matching a pair of the query.
    Scan(ScanArgs),
    /// Classify the residue pairs of a reference alignment against the criteria.
    Check(CheckArgs),
    /// Parse a criteria string, or list the standard criteria.
    Criteria(CriteriaArgs),
}

/// Settings shared by every command that applies criteria.
#[derive(Args, Debug, Clone, Default)]
pub struct CriteriaSource {
    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Criteria string overriding the config file,
    /// e.g. 'dist_co=12,dirn_co=0,index_dist_co=-11,frame_ang_co=22.5,phi_ang_co=22.5,psi_ang_co=22.5'.
    #[arg(long, value_name = "CRITERIA")]
    pub criteria: Option<String>,

    /// Representative stride for query and index alike, overriding the config file.
    /// A stride of 0 makes every residue a representative.
    #[arg(long, value_name = "INT")]
    pub stride: Option<usize>,
}

/// Arguments for the `scan` subcommand.
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Path to the query structure file.
    #[arg(short = 'Q', long, required = true, value_name = "PATH")]
    pub query: PathBuf,

    /// Paths to the structure files to index.
    #[arg(short = 'I', long = "index", required = true, num_args(1..), value_name = "PATH")]
    pub index: Vec<PathBuf>,

    #[command(flatten)]
    pub source: CriteriaSource,

    /// Override the store holding the index.
    #[arg(long, value_enum, value_name = "KIND")]
    pub index_store: Option<StoreKindArg>,

    /// Override the store grouping the query pairs.
    #[arg(long, value_enum, value_name = "KIND")]
    pub query_store: Option<StoreKindArg>,

    /// Override how densely index pairs are filed.
    #[arg(long, value_enum, value_name = "DENSITY")]
    pub density: Option<DensityArg>,

    /// Skip value and radius checks while keying.
    #[arg(long)]
    pub unchecked: bool,

    /// Write the matches to this file instead of standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to the query structure file.
    #[arg(short = 'Q', long, required = true, value_name = "PATH")]
    pub query: PathBuf,

    /// Path to the structure the query is aligned to.
    #[arg(short = 'I', long, required = true, value_name = "PATH")]
    pub index: PathBuf,

    /// Path to the alignment file: one 'QUERY_INDEX INDEX_INDEX' pair per line.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub alignment: PathBuf,

    #[command(flatten)]
    pub source: CriteriaSource,
}

/// Arguments for the `criteria` subcommand.
#[derive(Args, Debug)]
pub struct CriteriaArgs {
    /// Criteria string to parse and display. Lists the standard criteria when omitted.
    #[arg(long, value_name = "CRITERIA")]
    pub parse: Option<String>,
}

#[derive(ValueEnum, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum StoreKindArg {
    Hash,
    SortedVec,
}

impl From<StoreKindArg> for StoreKind {
    fn from(arg: StoreKindArg) -> Self {
        match arg {
            StoreKindArg::Hash => StoreKind::Hash,
            StoreKindArg::SortedVec => StoreKind::SortedVec,
        }
    }
}

#[derive(ValueEnum, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DensityArg {
    Sparse,
    Dense,
}

impl From<DensityArg> for StoreDensity {
    fn from(arg: DensityArg) -> Self {
        match arg {
            DensityArg::Sparse => StoreDensity::Sparse,
            DensityArg::Dense => StoreDensity::Dense,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationArg {
    Checked,
    Unchecked,
}

impl From<ValidationArg> for Validation {
    fn from(arg: ValidationArg) -> Self {
        match arg {
            ValidationArg::Checked => Validation::Checked,
            ValidationArg::Unchecked => Validation::Unchecked,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn scan_accepts_several_index_files() {
        let cli = Cli::parse_from([
            "pairscan", "scan", "-Q", "q.toml", "-I", "a.toml", "b.toml", "--density", "dense",
            "--index-store", "sorted-vec",
        ]);
        let Commands::Scan(args) = cli.command else {
            panic!("Expected 'scan' subcommand");
        };
        assert_eq!(args.index.len(), 2);
        assert_eq!(args.density, Some(DensityArg::Dense));
        assert_eq!(args.index_store, Some(StoreKindArg::SortedVec));
        assert!(!args.unchecked);
    }

    #[test]
    fn verbosity_is_counted_globally() {
        let cli = Cli::parse_from(["pairscan", "criteria", "-vv"]);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Criteria(CriteriaArgs { parse: None })));
    }
}
