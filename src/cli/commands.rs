use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::engine::filter::MatchField;

#[derive(Parser)]
#[command(name = "sharescope", version, about = "Network share inventory and scan comparison")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP REST API server
    Serve(ServeArgs),
    /// List scan sessions
    Sessions(SessionsArgs),
    /// List shares from the inventory
    Shares(SharesArgs),
    /// Compare two scan sessions
    Diff(DiffArgs),
    /// Show inventory statistics and the risk score
    Stats(StatsArgs),
}

#[derive(Args, Clone)]
pub struct ServeArgs {
    /// Listen port
    #[arg(long)]
    pub port: Option<u16>,

    /// Listen address
    #[arg(long)]
    pub host: Option<String>,

    /// SQLite database path
    #[arg(long)]
    pub db: Option<String>,

    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,
}

#[derive(Args, Clone)]
pub struct SessionsArgs {
    /// SQLite database path
    #[arg(long, default_value = "./data/sharescope.db")]
    pub db: String,

    /// Page number
    #[arg(long, default_value = "1")]
    pub page: i64,

    /// Sessions per page
    #[arg(long)]
    pub limit: Option<i64>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct SharesArgs {
    /// SQLite database path
    #[arg(long, default_value = "./data/sharescope.db")]
    pub db: String,

    /// Restrict to one session (default: latest row per share)
    #[arg(long)]
    pub session: Option<i64>,

    /// Substring to search across hostnames, share names and file names
    #[arg(long)]
    pub search: Option<String>,

    /// Only shares with at least one match of this detection type
    #[arg(long)]
    pub detection_type: Option<String>,

    /// Column the --match-value test applies to
    #[arg(long, value_enum, default_value_t = MatchFieldArg::All)]
    pub match_field: MatchFieldArg,

    /// Substring the chosen column must contain
    #[arg(long)]
    pub match_value: Option<String>,

    /// Page number
    #[arg(long, default_value = "1")]
    pub page: i64,

    /// Shares per page
    #[arg(long)]
    pub limit: Option<i64>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MatchFieldArg {
    Hostname,
    ShareName,
    All,
}

impl From<MatchFieldArg> for MatchField {
    fn from(arg: MatchFieldArg) -> Self {
        match arg {
            MatchFieldArg::Hostname => MatchField::Hostname,
            MatchFieldArg::ShareName => MatchField::ShareName,
            MatchFieldArg::All => MatchField::All,
        }
    }
}

#[derive(Args, Clone)]
pub struct DiffArgs {
    /// Baseline session id
    pub session_a: i64,

    /// Session id to compare against the baseline
    pub session_b: i64,

    /// SQLite database path
    #[arg(long, default_value = "./data/sharescope.db")]
    pub db: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct StatsArgs {
    /// SQLite database path
    #[arg(long, default_value = "./data/sharescope.db")]
    pub db: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
