use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "gh-module-sync",
    about = "Update progress tracking on GitHub module tracker issues",
    version,
    author
)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "GH_MODULE_SYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Repository to synchronize (owner/name)
    #[arg(long)]
    pub repo: Option<String>,

    /// Title marker identifying module tracker issues
    #[arg(long)]
    pub marker: Option<String>,

    /// Compute progress without updating any issue
    #[arg(long)]
    pub dry_run: bool,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
