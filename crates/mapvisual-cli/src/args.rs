use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for mapvisual
#[derive(Debug, Parser)]
#[command(
    name = "mapvisual",
    version,
    about = "Assemble, bootstrap and check the boundary documents served to the map frontend"
)]
pub struct CliArgs {
    /// Root of the local boundary cache (default: mapvisual-core/data)
    #[arg(short = 'd', long = "data-dir", env = "MAPVISUAL_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Per-request timeout for remote providers, in seconds
    #[arg(long, env = "MAPVISUAL_FETCH_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Only use local files; never contact remote providers
    #[arg(long, env = "MAPVISUAL_OFFLINE", global = true)]
    pub offline: bool,

    /// JSON file of extra name aliases ({"raw name": "canonical name"})
    #[arg(short = 'a', long = "aliases", global = true)]
    pub aliases: Option<PathBuf>,

    /// Log filter when RUST_LOG is not set (e.g. debug, mapvisual_core=trace)
    #[arg(long, default_value = "info", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Assemble a boundary document and print it as JSON
    Boundary {
        /// Country code (us, in)
        country: String,
        /// Boundary type (states, states-topo, counties-topo, option-b, disputed)
        boundary_type: String,
        /// Pretty-print the JSON
        #[arg(short, long)]
        pretty: bool,
    },

    /// Download a boundary type from its remote sources into the local cache
    Fetch {
        /// Country code; omit together with the type to fetch every boundary
        country: Option<String>,
        /// Boundary type
        boundary_type: Option<String>,
    },

    /// Validate a boundary document (assembled, or read from --file)
    Check {
        country: String,
        boundary_type: String,
        /// Check this GeoJSON file instead of assembling
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// List every boundary type and its fallback chain
    Sources,
}
