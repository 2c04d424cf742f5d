use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::OutputFormat;
use crate::input::AnswerArg;

#[derive(Parser, Debug)]
#[command(
    name = "medcalc",
    about = "Score clinical scales and print the matching guidance",
    version
)]
pub struct Cli {
    /// Config file to use instead of the platform default
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List every registered scale
    List,
    /// Show a scale's criteria, options and tiers
    Show {
        /// Scale id, e.g. `bishop`
        scale: String,
    },
    /// Validate every scale definition and report each result
    Validate,
    /// Score a scale from answers and print the result
    Calculate(CalculateArgs),
    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the effective config and where it was loaded from
    Show,
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Debug, Default)]
pub struct CalculateArgs {
    /// Scale id, e.g. `alvarado`
    pub scale: String,

    /// One answer; repeat for each criterion. Multi-select criteria take a
    /// comma-separated list, or nothing for "none selected"
    #[arg(long = "answer", short = 'a', value_name = "CRITERION=OPTION[,OPTION]")]
    pub answers: Vec<AnswerArg>,

    /// JSON file of answers; `--answer` entries take precedence
    #[arg(long = "answers", value_name = "FILE")]
    pub answers_file: Option<PathBuf>,

    /// Override the configured output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Override the configured report template
    #[arg(long, value_name = "FILE")]
    pub template: Option<PathBuf>,

    /// Also write the report as a DOCX result sheet
    #[arg(long, value_name = "FILE")]
    pub docx: Option<PathBuf>,
}
