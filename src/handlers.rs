//! Command handlers for the CLI subcommands.
//!
//! Each handler runs one subcommand end to end and returns the process
//! exit code. Output formatting is delegated to [`crate::formatter`].

use std::fs;
use std::path::{Path, PathBuf};

use colored::Colorize;
use log::debug;
use walkdir::WalkDir;

use crate::cli::OutputFormat;
use crate::config::Config;
use crate::error::MendError;
use crate::formatter::{self, FileValidation, ValidationSummary};
use crate::manifest::{kind_of, parse_document};
use crate::pipeline::{mend_file, MendOptions};
use crate::validate::{validate_file, validate_pod_spec};

/// Handle the `validate` command.
pub fn handle_validate(
    path: PathBuf,
    containers: bool,
    format: OutputFormat,
) -> crate::Result<i32> {
    let config = Config::from_env();
    if !config.validation_enabled {
        print_notice("Validation is disabled (YAML_VALIDATION_ENABLED=false)", format);
        return Ok(0);
    }

    let files = collect_manifest_files(&path)?;
    if files.is_empty() {
        print_notice(&format!("No YAML files found under {}", path.display()), format);
        return Ok(0);
    }
    debug!("validating {} file(s)", files.len());

    let summary = ValidationSummary {
        files: files
            .iter()
            .map(|file| inspect_file(file, containers))
            .collect(),
    };

    print!("{}", formatter::format_summary(&summary, format));
    Ok(if summary.all_valid() { 0 } else { 1 })
}

/// Handle the `fix` command.
pub fn handle_fix(
    path: PathBuf,
    dry_run: bool,
    no_backup: bool,
    output: Option<PathBuf>,
    format: OutputFormat,
) -> crate::Result<i32> {
    let options = MendOptions {
        dry_run: dry_run || output.is_some(),
        backup: !no_backup,
    };
    let report = mend_file(&path, &options)?;

    print!("{}", formatter::format_report(&path, &report, format));

    if let Some(target) = output {
        if report.repaired() {
            fs::write(&target, &report.output)?;
            print_notice(
                &format!("Repaired manifest written to {}", target.display()),
                format,
            );
        } else {
            eprintln!(
                "Not writing {}: content did not parse after repair",
                target.display()
            );
        }
    } else if dry_run && report.repaired() && format == OutputFormat::Table {
        println!("\n--- repaired manifest ---\n{}", report.output);
    }

    Ok(if report.converged { 0 } else { 1 })
}

/// Handle the `analyze` command. Reports without judging, so always exits 0.
pub fn handle_analyze(path: PathBuf, format: OutputFormat) -> crate::Result<i32> {
    let files = collect_manifest_files(&path)?;
    if files.is_empty() {
        print_notice(&format!("No YAML files found under {}", path.display()), format);
        return Ok(0);
    }

    let summary = ValidationSummary {
        files: files.iter().map(|file| inspect_file(file, false)).collect(),
    };

    print!("{}", formatter::format_summary(&summary, format));
    Ok(0)
}

/// Handle the `config` command.
pub fn handle_config() -> crate::Result<i32> {
    let config = Config::from_env();
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(0)
}

/// Handle the `health` command.
pub fn handle_health() -> crate::Result<i32> {
    let config = Config::from_env();

    println!("{} kube-mend {} healthy", "✓".green(), crate::VERSION);
    println!("  kubeconfig: {}", config.kubeconfig);
    println!(
        "  context: {}",
        config.context.as_deref().unwrap_or("(unset)")
    );
    println!("  namespace: {}", config.namespace);
    println!("  validation enabled: {}", config.validation_enabled);
    println!("  strict validation: {}", config.strict_validation);
    println!("  debug mode: {}", config.debug_mode);
    println!("  log level: {}", config.log_level);
    Ok(0)
}

/// Print a status line, routed to stderr when JSON output was requested.
fn print_notice(message: &str, format: OutputFormat) {
    match format {
        OutputFormat::Table => println!("{}", message),
        OutputFormat::Json => eprintln!("{}", message),
    }
}

/// Resolve the target path into the list of manifest files to check.
///
/// A file path is taken as-is; a directory is walked recursively for
/// `*.yaml`/`*.yml` files, sorted for stable output.
fn collect_manifest_files(path: &Path) -> crate::Result<Vec<PathBuf>> {
    if !path.exists() {
        return Err(MendError::FileNotFound(path.display().to_string()));
    }
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            matches!(
                entry.path().extension().and_then(|ext| ext.to_str()),
                Some("yaml") | Some("yml")
            )
        })
        .map(|entry| entry.path().to_path_buf())
        .collect();
    files.sort();
    Ok(files)
}

/// Validate one file and capture its declared kind for display.
fn inspect_file(path: &Path, check_containers: bool) -> FileValidation {
    let mut result = validate_file(path);
    let document = fs::read_to_string(path)
        .ok()
        .and_then(|content| parse_document(&content).ok());
    let kind = document
        .as_ref()
        .and_then(|document| kind_of(document).map(String::from));

    if check_containers && kind.as_deref() == Some("Pod") {
        if let Some(spec) = document.as_ref().and_then(|document| document.get("spec")) {
            let pod = validate_pod_spec(spec);
            result.valid = result.valid && pod.valid;
            result.errors.extend(pod.errors);
        }
    }

    FileValidation {
        path: path.to_path_buf(),
        kind,
        valid: result.valid,
        errors: result.errors,
    }
}
