use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Integrity tree tool for snapshotting and comparing directory trees
#[derive(Parser, Debug)]
#[command(name = "treehash", version, about, long_about = None)]
pub struct Cli {
    /// Increase diagnostic verbosity (-v: info, -vv: debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the integrity tree for a directory and export a snapshot
    Generate {
        /// Directory to build the tree from
        #[arg(value_name = "ROOT")]
        root: PathBuf,

        /// Directory receiving the timestamped export
        #[arg(value_name = "EXPORT_DIR")]
        export_dir: PathBuf,
    },

    /// Compare two previously exported snapshots
    Compare {
        /// Snapshot whose nodes are reported on divergence
        #[arg(value_name = "BASE")]
        base: PathBuf,

        /// Snapshot to compare against
        #[arg(value_name = "OTHER")]
        other: PathBuf,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}
