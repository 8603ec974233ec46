use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kube-mend")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Validate and auto-repair Kubernetes manifests")]
#[command(long_about = "A CLI tool that validates Kubernetes manifest files against structural rules and automatically repairs common defects: corrupted YAML syntax, missing required fields, and incomplete container specifications.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate manifest files against structural rules
    Validate {
        /// Manifest file, or directory to walk for *.yaml/*.yml files
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// Also check Pod spec.containers entries
        #[arg(long)]
        containers: bool,

        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Repair a manifest file, fixing syntax and missing fields
    Fix {
        /// Manifest file to repair
        #[arg(value_name = "FILE")]
        path: PathBuf,

        /// Report fixes without writing anything
        #[arg(long, conflicts_with = "output")]
        dry_run: bool,

        /// Skip the .bak backup of the original file
        #[arg(long)]
        no_backup: bool,

        /// Write the repaired manifest here instead of in place
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Parse and validate a manifest without repairing it
    Analyze {
        /// Manifest file or directory to inspect
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Print the resolved environment configuration
    Config,

    /// Print tool status, version, and configuration
    Health,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

impl Cli {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let level = match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };

        env_logger::Builder::from_default_env()
            .filter_level(level)
            .init();
    }
}
