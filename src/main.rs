//! Binary entry point for aula.
//!
//! Command-line interface over the roster export/import/pagination core.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]

use anyhow::Context;
use aula::config::AulaConfig;
use aula::io::formats::ExportFormat;
use aula::models::{Role, RosterFilter};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Aula - roster export, import, and pagination for the institute dashboard.
#[derive(Parser)]
#[command(name = "aula")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true, env = "AULA_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Export a roster file as CSV, XLSX, or PDF.
    Export {
        /// Roster CSV to export.
        input: PathBuf,

        /// Output format: csv, xlsx, or pdf.
        #[arg(short, long, default_value = "csv")]
        format: String,

        /// Directory to write the export into (defaults to the configured
        /// export directory).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Base name for the export file.
        #[arg(long)]
        name: Option<String>,
    },

    /// Validate a roster file and report accepted and excluded rows.
    Import {
        /// Roster CSV to validate.
        input: PathBuf,
    },

    /// Show one page of the roster.
    List {
        /// Roster CSV to read.
        input: PathBuf,

        /// Page number (1-indexed; out-of-range values are clamped).
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Records per page (defaults to the configured page size).
        #[arg(long)]
        page_size: Option<usize>,

        /// Case-insensitive search over name and email.
        #[arg(short, long)]
        search: Option<String>,

        /// Restrict to a role: student, teacher, or admin.
        #[arg(short, long)]
        role: Option<String>,
    },

    /// Show role totals and registrations per month.
    Stats {
        /// Roster CSV to read.
        input: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let config = match AulaConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    match run_command(cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        },
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("aula=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("aula=info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Runs the selected command.
fn run_command(cli: Cli, config: &AulaConfig) -> anyhow::Result<()> {
    match cli.command {
        Commands::Export {
            input,
            format,
            output,
            name,
        } => {
            let format: ExportFormat = format.parse()?;
            aula::cli::export(config, &input, format, output.as_deref(), name.as_deref())
                .context("export failed")?;
        },
        Commands::Import { input } => {
            aula::cli::import(&input).context("import failed")?;
        },
        Commands::List {
            input,
            page,
            page_size,
            search,
            role,
        } => {
            let mut filter = RosterFilter::new();
            if let Some(search) = search {
                filter = filter.with_search(search);
            }
            if let Some(ref role) = role {
                let role = Role::parse(role)
                    .ok_or_else(|| anyhow::anyhow!("unknown role: {role}"))?;
                filter = filter.with_role(role);
            }
            aula::cli::list(config, &input, page, page_size, &filter).context("list failed")?;
        },
        Commands::Stats { input } => {
            aula::cli::stats(&input).context("stats failed")?;
        },
    }
    Ok(())
}
