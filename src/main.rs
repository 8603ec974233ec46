use clap::Parser;
use kubemend_cli::{
    cli::{Cli, Commands},
    handlers,
};
use std::io::{self, Write};
use std::process;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> kubemend_cli::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    cli.init_logging();

    // Execute command
    let code = match cli.command {
        Commands::Validate {
            path,
            containers,
            format,
        } => handlers::handle_validate(path, containers, format)?,
        Commands::Fix {
            path,
            dry_run,
            no_backup,
            output,
            format,
        } => handlers::handle_fix(path, dry_run, no_backup, output, format)?,
        Commands::Analyze { path, format } => handlers::handle_analyze(path, format)?,
        Commands::Config => handlers::handle_config()?,
        Commands::Health => handlers::handle_health()?,
    };

    if code != 0 {
        let _ = io::stdout().flush();
        process::exit(code);
    }

    Ok(())
}
