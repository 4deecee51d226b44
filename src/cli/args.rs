use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/*-------------------------------------------------------------------------------------------------
  Command Line Interface (CLI) Arguments
-------------------------------------------------------------------------------------------------*/

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Find the cloud provider subnets containing IPv4 addresses or hostnames.",
    long_about = None,
    arg_required_else_help = true
)]
pub struct Args {
    /// List the complete subnet dataset of this cloud provider
    #[arg(short = 'p', long)]
    pub provider: Option<String>,

    /// Only list subnets whose CIDR text starts with this prefix (e.g. "20.")
    #[arg(long, requires = "provider")]
    pub prefix: Option<String>,

    /// List the supported cloud providers
    #[arg(long)]
    pub providers: bool,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Directory containing the cloud provider JSON datasets
    #[arg(short = 'd', long)]
    pub data_dir: Option<PathBuf>,

    /// Skip reserved (private) addresses and search the remaining addresses instead of rejecting
    /// the lookup
    #[arg(long)]
    pub skip_reserved: bool,

    /// Test every subnet instead of prefiltering by the first octet
    #[arg(long)]
    pub no_prefilter: bool,

    /// Save the results to a CSV file
    #[arg(long = "csv")]
    pub csv_file: Option<PathBuf>,

    /// Logging verbosity
    #[command(flatten)]
    pub verbose: clap_verbosity_flag::Verbosity,

    /// IPv4 addresses or hostnames to look up
    pub inputs: Vec<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug, Eq, PartialEq)]
pub enum OutputFormat {
    /// Table of subnets with provider, region, and service
    Table,
    /// JSON array
    Json,
    /// List of (RFC4632) CIDR-format subnets
    Cidr,
    /// List of IP networks in network mask format (n.n.n.n m.m.m.m)
    Netmask,
}
