use clap::{Parser, Subcommand, ValueEnum};
use grievance_portal_lib::commands::{self, grievances, reports, settings, PortalState};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "grievance-portal")]
#[command(about = "Operator tools for a grievance portal data directory")]
struct Cli {
    #[arg(long, global = true, default_value = ".grievance-portal")]
    data_dir: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Overall status counts.
    Stats,
    /// Grievances in public order.
    List {
        #[arg(long, default_value = "all")]
        status: String,
        #[arg(long, default_value = "all")]
        department: String,
    },
    /// Most supported grievances.
    Trending {
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Resolution rate per department, trending issues, most active reporter.
    Performance,
    /// Counts broken down by department.
    Report,
    Export {
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    Backup {
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Replace all grievances and accounts with a backup file.
    Restore { file: PathBuf },
    /// Remove all grievances and accounts.
    Clear,
    /// Show settings, or merge a JSON object of changes into them.
    Settings {
        #[arg(long)]
        set: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    if let Command::Settings { set } = &cli.command {
        let value = match set {
            Some(raw) => {
                let patch = serde_json::from_str(raw).map_err(|e| format!("Invalid settings JSON: {e}"))?;
                settings::save_settings(&cli.data_dir, patch)?
            }
            None => settings::get_settings(&cli.data_dir)?,
        };
        return print_json(&value);
    }

    let state = commands::open_portal(&cli.data_dir)?;
    dispatch(&state, cli.command)
}

fn dispatch(state: &PortalState, command: Command) -> Result<(), String> {
    match command {
        Command::Stats => print_json(&reports::get_stats(state)?),
        Command::List { status, department } => {
            print_json(&grievances::list_grievances(state, &status, &department)?)
        }
        Command::Trending { limit } => print_json(&reports::get_trending(state, limit)?),
        Command::Performance => print_json(&reports::get_analytics(state)?),
        Command::Report => print_json(&reports::generate_report(state)?),
        Command::Export { format, out } => {
            let content = reports::export_data(state, format.as_str())?;
            emit(&content, out.as_deref())
        }
        Command::Backup { out } => {
            let content = reports::backup_data(state)?;
            emit(&content, out.as_deref())
        }
        Command::Restore { file } => {
            let blob = fs::read_to_string(&file)
                .map_err(|e| format!("Error reading backup file {}: {e}", file.display()))?;
            print_json(&reports::restore_data(state, &blob)?)
        }
        Command::Clear => print_json(&reports::clear_all_data(state)?),
        Command::Settings { .. } => Ok(()),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let raw = serde_json::to_string_pretty(value).map_err(|e| format!("Failed to serialize output: {e}"))?;
    println!("{raw}");
    Ok(())
}

fn emit(content: &str, out: Option<&Path>) -> Result<(), String> {
    match out {
        Some(path) => {
            fs::write(path, content).map_err(|e| format!("Failed to write {}: {e}", path.display()))?;
            log::info!("wrote {}", path.display());
            Ok(())
        }
        None => {
            println!("{content}");
            Ok(())
        }
    }
}
