//! SQLite-backed employee store.
//!
//! A single connection is shared behind a mutex. Every call runs on the
//! blocking pool so the lock is never held across an await point.

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use parking_lot::Mutex;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

use roster_core::{Employee, EmployeeId, EmployeePatch, Error, NewEmployee, Result};

use crate::store::EmployeeStore;

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS employees (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    position TEXT NOT NULL,
    created_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_employees_created_at ON employees (created_at);
";

const EMPLOYEE_SELECT_SQL: &str = "SELECT id, name, email, position, created_at FROM employees";

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Employee store over a SQLite database.
#[derive(Clone)]
pub struct SqliteEmployeeStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteEmployeeStore {
    /// Opens (or creates) a database file and ensures the table exists.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Store`] if the file cannot be opened or the schema
    /// cannot be created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let started_at = Instant::now();

        let conn = Connection::open(path).map_err(store_error)?;
        conn.busy_timeout(BUSY_TIMEOUT).map_err(store_error)?;
        let store = Self::bootstrap(conn)?;

        tracing::info!(
            path = %path.display(),
            duration_ms = started_at.elapsed().as_millis() as u64,
            "Employee store opened"
        );
        Ok(store)
    }

    /// Opens a private in-memory database.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Store`] if the schema cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(store_error)?;
        let store = Self::bootstrap(conn)?;
        tracing::debug!("In-memory employee store opened");
        Ok(store)
    }

    fn bootstrap(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA_SQL).map_err(store_error)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    async fn with_conn<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn.lock();
            f(&guard)
        })
        .await
        .map_err(|e| Error::internal(format!("store task failed: {e}")))?
    }
}

#[async_trait]
impl EmployeeStore for SqliteEmployeeStore {
    async fn list(&self) -> Result<Vec<Employee>> {
        self.with_conn(|conn| {
            let mut stmt = conn
                .prepare(&format!(
                    "{EMPLOYEE_SELECT_SQL} ORDER BY created_at DESC, id DESC"
                ))
                .map_err(store_error)?;
            let rows = stmt.query_map([], parse_employee_row).map_err(store_error)?;
            let employees = rows
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(store_error)?;
            Ok(employees)
        })
        .await
    }

    async fn get(&self, id: EmployeeId) -> Result<Option<Employee>> {
        self.with_conn(move |conn| select_by_id(conn, id)).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Employee>> {
        let email = email.to_string();
        self.with_conn(move |conn| {
            conn.query_row(
                &format!("{EMPLOYEE_SELECT_SQL} WHERE email = ?1"),
                params![email],
                parse_employee_row,
            )
            .optional()
            .map_err(store_error)
        })
        .await
    }

    async fn insert(&self, employee: NewEmployee) -> Result<Employee> {
        self.with_conn(move |conn| {
            let created_at = Utc::now();
            conn.execute(
                "INSERT INTO employees (name, email, position, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    employee.name,
                    employee.email,
                    employee.position,
                    format_timestamp(&created_at),
                ],
            )
            .map_err(|e| conflict_or_store_error(e, &employee.email))?;

            let id = EmployeeId(conn.last_insert_rowid());
            select_by_id(conn, id)?
                .ok_or_else(|| Error::internal(format!("inserted employee {id} vanished")))
        })
        .await
    }

    async fn update(&self, id: EmployeeId, patch: EmployeePatch) -> Result<Employee> {
        self.with_conn(move |conn| {
            let changed = conn
                .execute(
                    "UPDATE employees
                     SET
                        name = COALESCE(?1, name),
                        email = COALESCE(?2, email),
                        position = COALESCE(?3, position)
                     WHERE id = ?4",
                    params![patch.name, patch.email, patch.position, id.get()],
                )
                .map_err(|e| conflict_or_store_error(e, patch.email.as_deref().unwrap_or("")))?;

            if changed == 0 {
                return Err(Error::NotFound { id });
            }

            select_by_id(conn, id)?.ok_or(Error::NotFound { id })
        })
        .await
    }

    async fn delete(&self, id: EmployeeId) -> Result<()> {
        self.with_conn(move |conn| {
            let changed = conn
                .execute("DELETE FROM employees WHERE id = ?1", params![id.get()])
                .map_err(store_error)?;
            if changed == 0 {
                return Err(Error::NotFound { id });
            }
            Ok(())
        })
        .await
    }

    async fn count(&self) -> Result<u64> {
        self.with_conn(|conn| {
            conn.query_row("SELECT COUNT(*) FROM employees", [], |row| row.get::<_, i64>(0))
                .map(|n| n.max(0) as u64)
                .map_err(store_error)
        })
        .await
    }

    async fn ping(&self) -> Result<()> {
        self.with_conn(|conn| {
            conn.query_row("SELECT 1", [], |_| Ok(()))
                .map_err(store_error)
        })
        .await
    }
}

fn select_by_id(conn: &Connection, id: EmployeeId) -> Result<Option<Employee>> {
    conn.query_row(
        &format!("{EMPLOYEE_SELECT_SQL} WHERE id = ?1"),
        params![id.get()],
        parse_employee_row,
    )
    .optional()
    .map_err(store_error)
}

fn parse_employee_row(row: &Row<'_>) -> rusqlite::Result<Employee> {
    let created_at: String = row.get(4)?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?
        .with_timezone(&Utc);

    Ok(Employee {
        id: EmployeeId(row.get(0)?),
        name: row.get(1)?,
        email: row.get(2)?,
        position: row.get(3)?,
        created_at,
    })
}

// Fixed-width so that lexical order in SQL equals chronological order.
fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

fn conflict_or_store_error(err: rusqlite::Error, email: &str) -> Error {
    if is_unique_violation(&err) {
        Error::Conflict {
            email: email.to_string(),
        }
    } else {
        store_error(err)
    }
}

fn store_error(err: rusqlite::Error) -> Error {
    Error::store(err.to_string())
}
