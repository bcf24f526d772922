//! # Roster CLI
//!
//! Runs the employee directory server and administers its database.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;

use roster_core::EmployeeId;

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "roster")]
#[command(author = "Daemoniorum Engineering")]
#[command(version)]
#[command(about = "Employee directory server", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    /// Enable JSON logging
    #[arg(long, global = true)]
    json_logs: bool,

    /// Database file (overrides configuration)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Disable CORS headers
        #[arg(long)]
        no_cors: bool,
    },

    /// Manage employees directly in the database
    Employee {
        #[command(subcommand)]
        action: EmployeeAction,
    },

    /// Display version and build info
    Version,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum EmployeeAction {
    /// List employees, newest first
    List {
        /// Only show employees whose name contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Add an employee
    Add {
        /// Full name
        #[arg(short, long)]
        name: String,

        /// Email address (must be unique)
        #[arg(short, long)]
        email: String,

        /// Job title
        #[arg(short, long)]
        position: String,
    },

    /// Show one employee
    Show {
        /// Employee id
        id: i64,
    },

    /// Change an employee's details
    Update {
        /// Employee id
        id: i64,

        /// New full name
        #[arg(short, long)]
        name: Option<String>,

        /// New email address
        #[arg(short, long)]
        email: Option<String>,

        /// New job title
        #[arg(short, long)]
        position: Option<String>,
    },

    /// Delete an employee
    Remove {
        /// Employee id
        id: i64,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,

    /// Set the default database file
    SetDatabase {
        /// Path to the SQLite file
        path: PathBuf,
    },

    /// Show config file path
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let telemetry_config =
        roster_telemetry::TelemetryConfig::new("roster").with_log_level(&cli.log_level);

    let telemetry_config = if cli.json_logs {
        telemetry_config.with_json_logs()
    } else {
        telemetry_config
    };

    roster_telemetry::init_logging(&telemetry_config);

    let cfg = config::Config::load();
    let database = cli.database.unwrap_or_else(|| cfg.database.clone());

    match cli.command {
        Commands::Serve {
            host,
            port,
            no_cors,
        } => {
            let host = host.unwrap_or(cfg.server_host.clone());
            let port = port.unwrap_or(cfg.server_port);
            commands::serve(host, port, database, cfg.cors && !no_cors).await?;
        },

        Commands::Employee { action } => match action {
            EmployeeAction::List { search } => commands::employee_list(&database, search).await?,
            EmployeeAction::Add {
                name,
                email,
                position,
            } => commands::employee_add(&database, name, email, position).await?,
            EmployeeAction::Show { id } => {
                commands::employee_show(&database, EmployeeId(id)).await?
            },
            EmployeeAction::Update {
                id,
                name,
                email,
                position,
            } => {
                commands::employee_update(&database, EmployeeId(id), name, email, position)
                    .await?
            },
            EmployeeAction::Remove { id } => {
                commands::employee_remove(&database, EmployeeId(id)).await?
            },
        },

        Commands::Version => {
            commands::version();
        },

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                config::show_config();
            },
            ConfigAction::SetDatabase { path } => {
                let mut cfg = config::Config::load();
                match cfg.set_database(path.clone()) {
                    Ok(()) => {
                        println!("Default database set to: {}", path.display());
                        println!("Config saved to: {}", config::Config::config_path().display());
                    },
                    Err(e) => {
                        eprintln!("Failed to save config: {}", e);
                    },
                }
            },
            ConfigAction::Path => {
                println!("{}", config::Config::config_path().display());
            },
        },
    }

    Ok(())
}
