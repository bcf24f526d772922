//! CLI command implementations.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use color_eyre::eyre::{Result, WrapErr};

use roster_core::{Employee, EmployeeDraft, EmployeeId, EmployeePatch, SearchQuery};
use roster_server::{Server, ServerConfig};
use roster_store::{EmployeeService, SqliteEmployeeStore};

/// Start the API server.
pub async fn serve(host: String, port: u16, database: PathBuf, cors: bool) -> Result<()> {
    tracing::info!("Starting Roster server...");

    ensure_parent_dir(&database)?;
    let addr = format!("{}:{}", host, port)
        .parse::<SocketAddr>()
        .wrap_err_with(|| format!("invalid listen address {host}:{port}"))?;
    let config = ServerConfig::builder()
        .addr(addr)
        .cors(cors)
        .database(database)
        .build();

    let server = Server::new(config)?;
    server.run().await?;

    Ok(())
}

/// List employees, optionally filtered by name.
pub async fn employee_list(database: &Path, search: Option<String>) -> Result<()> {
    let service = open_service(database)?;
    let employees = service.list().await?;
    let query = SearchQuery::new(search.unwrap_or_default());
    let visible = query.filter(&employees);

    if visible.is_empty() {
        if query.as_str().is_empty() {
            println!("  (No employees yet)");
            println!("\nUse 'roster employee add' to add one.");
        } else {
            println!("  (No employees match \"{}\")", query.as_str());
        }
        return Ok(());
    }

    println!(
        "{:>5}  {:<24} {:<30} {:<20} {}",
        "ID", "NAME", "EMAIL", "POSITION", "CREATED"
    );
    let shown = visible.len();
    for employee in visible {
        print_row(employee);
    }
    println!("\n{} of {} employees", shown, employees.len());

    Ok(())
}

/// Add an employee.
pub async fn employee_add(
    database: &Path,
    name: String,
    email: String,
    position: String,
) -> Result<()> {
    let service = open_service(database)?;
    let employee = service
        .create(EmployeeDraft::new(name, email, position))
        .await?;

    println!("\x1b[32m✓\x1b[0m Employee added");
    print_details(&employee);
    Ok(())
}

/// Show one employee.
pub async fn employee_show(database: &Path, id: EmployeeId) -> Result<()> {
    let service = open_service(database)?;
    let employee = service.get(id).await?;
    print_details(&employee);
    Ok(())
}

/// Update fields of an employee.
pub async fn employee_update(
    database: &Path,
    id: EmployeeId,
    name: Option<String>,
    email: Option<String>,
    position: Option<String>,
) -> Result<()> {
    let service = open_service(database)?;
    let patch = EmployeePatch {
        name,
        email,
        position,
    };
    if patch.is_empty() {
        println!("Nothing to update. Pass --name, --email or --position.");
        return Ok(());
    }

    let employee = service.update(id, patch).await?;
    println!("\x1b[32m✓\x1b[0m Employee updated");
    print_details(&employee);
    Ok(())
}

/// Delete an employee.
pub async fn employee_remove(database: &Path, id: EmployeeId) -> Result<()> {
    let service = open_service(database)?;
    service.delete(id).await?;
    println!("\x1b[32m✓\x1b[0m Employee {} deleted", id);
    Ok(())
}

/// Display version information.
pub fn version() {
    println!("Roster {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Components:");
    println!("  roster-core       - Employee model and directory state");
    println!("  roster-store      - SQLite storage");
    println!("  roster-server     - HTTP API");
    println!("  roster-telemetry  - Logging");
}

fn open_service(database: &Path) -> Result<EmployeeService> {
    ensure_parent_dir(database)?;
    let store = SqliteEmployeeStore::open(database)
        .wrap_err_with(|| format!("failed to open {}", database.display()))?;
    Ok(EmployeeService::new(Arc::new(store)))
}

fn ensure_parent_dir(database: &Path) -> Result<()> {
    if let Some(parent) = database.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create {}", parent.display()))?;
    }
    Ok(())
}

fn print_row(employee: &Employee) {
    println!(
        "{:>5}  {:<24} {:<30} {:<20} {}",
        employee.id.get(),
        employee.name,
        employee.email,
        employee.position,
        employee.created_at.format("%Y-%m-%d %H:%M")
    );
}

fn print_details(employee: &Employee) {
    println!("  id:        {}", employee.id);
    println!("  name:      {}", employee.name);
    println!("  email:     {}", employee.email);
    println!("  position:  {}", employee.position);
    println!("  created:   {}", employee.created_at.to_rfc3339());
}
