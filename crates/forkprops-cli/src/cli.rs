use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "forkprops",
    about = "Assemble and propagate effective properties for forked test workers",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Merge property layers into the effective worker properties
    Effective(EffectiveArgs),
    /// Print a properties file in order
    Show(ShowArgs),
    /// List protected keys present in a properties file
    Protected(ProtectedArgs),
    /// Propagate a properties file into the environment and run a command
    Run(RunArgs),
}

#[derive(Args)]
pub struct EffectiveArgs {
    /// Properties file used as the ambient system layer
    #[arg(long, conflicts_with = "inherit_env")]
    pub system: Option<PathBuf>,
    /// Use this process's environment (sorted by name) as the system layer
    #[arg(long)]
    pub inherit_env: bool,
    /// Properties file of explicitly configured properties
    #[arg(long)]
    pub explicit: Option<PathBuf>,
    /// System-property variable; a bare KEY is written as ""
    #[arg(long = "var", value_name = "KEY[=VALUE]", value_parser = parse_variable)]
    pub variables: Vec<(String, Option<String>)>,
    /// User override, highest precedence
    #[arg(short = 'D', value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub user: Vec<(String, String)>,
    /// List item to encode as PREFIX0, PREFIX1, ... (commas split items)
    #[arg(long = "list", value_name = "PREFIX=ITEM", value_parser = parse_key_value)]
    pub lists: Vec<(String, String)>,
    /// Platform path list to encode as PREFIX0, PREFIX1, ...
    #[arg(long = "classpath", value_name = "PREFIX=PATHLIST", value_parser = parse_key_value)]
    pub classpaths: Vec<(String, String)>,
    /// Write the result to this file instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,
    /// Comment header for the written file
    #[arg(long)]
    pub comment: Option<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    pub file: PathBuf,
    /// Only print the indexed list stored under this prefix
    #[arg(long)]
    pub prefix: Option<String>,
}

#[derive(Args)]
pub struct ProtectedArgs {
    pub file: PathBuf,
}

#[derive(Args)]
pub struct RunArgs {
    /// Properties file to propagate
    #[arg(long)]
    pub props: PathBuf,
    /// Propagate protected keys instead of refusing
    #[arg(long)]
    pub allow_protected: bool,
    /// Command to run, after `--`
    #[arg(last = true, required = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}

pub fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got {raw:?}"))?;
    if key.is_empty() {
        return Err(format!("empty key in {raw:?}"));
    }
    Ok((key.to_string(), value.to_string()))
}

pub fn parse_variable(raw: &str) -> Result<(String, Option<String>), String> {
    match raw.split_once('=') {
        Some(("", _)) => Err(format!("empty key in {raw:?}")),
        Some((key, value)) => Ok((key.to_string(), Some(value.to_string()))),
        None if raw.is_empty() => Err("empty variable".to_string()),
        None => Ok((raw.to_string(), None)),
    }
}
