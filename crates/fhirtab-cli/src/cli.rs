use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "fhirtab")]
#[command(about = "fhirtab — print a patient's FHIR resources as a table")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Server base URL (overrides config and FHIRTAB_URL env var)
    #[arg(short, long, global = true, env = "FHIRTAB_URL")]
    pub server: Option<String>,

    /// Config profile name
    #[arg(short, long, global = true, env = "FHIRTAB_PROFILE", default_value = "default")]
    pub profile: String,

    /// Output format
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    /// One line per entry, fields separated by ` | `
    #[default]
    Pipe,
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch one resource type for a patient, one row per entry
    Fetch(FetchArgs),
    /// Print the maintainer attribution string
    Author,
    /// Manage CLI configuration
    Config(ConfigArgs),
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum OnMissing {
    /// Fail the whole call on the first entry with a missing field
    #[default]
    Abort,
    /// Skip entries with missing fields, reporting each on stderr
    Skip,
}

#[derive(clap::Args)]
pub struct FetchArgs {
    /// Resource type to search (e.g. Goal, Observation)
    pub resource_type: String,

    /// Patient identifier the search is scoped to
    #[arg(short = 'P', long)]
    pub patient: String,

    /// Output column as [NAME=]PATH[+PATH...]; repeatable, in column order.
    /// Paths joined with + form one space-separated field (value + unit).
    #[arg(long = "field", value_name = "[NAME=]PATH")]
    pub fields: Vec<String>,

    /// What to do with entries missing a required field
    #[arg(long, value_enum, default_value = "abort")]
    pub on_missing: OnMissing,

    /// Treat an empty result as an error instead of printing nothing
    #[arg(long)]
    pub fail_empty: bool,

    /// Abort the request after this many seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,
}

#[derive(clap::Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current config
    Show,
    /// Set config value
    Set(ConfigSetArgs),
}

#[derive(clap::Args)]
pub struct ConfigSetArgs {
    /// Key to set (server, format, fields)
    pub key: String,
    /// Value
    pub value: String,
}
