//! The storage seam.

use async_trait::async_trait;
use roster_core::{Employee, EmployeeId, EmployeePatch, NewEmployee, Result};

/// Persistent employee storage.
///
/// Implementations own the uniqueness guarantee on `email`: a violating
/// insert or update must fail with [`roster_core::Error::Conflict`], and an
/// update or delete of a missing row with [`roster_core::Error::NotFound`].
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// Returns all employees, newest first.
    async fn list(&self) -> Result<Vec<Employee>>;

    /// Looks up an employee by id.
    async fn get(&self, id: EmployeeId) -> Result<Option<Employee>>;

    /// Looks up an employee by email.
    async fn find_by_email(&self, email: &str) -> Result<Option<Employee>>;

    /// Inserts a new employee, assigning its id and creation time.
    async fn insert(&self, employee: NewEmployee) -> Result<Employee>;

    /// Overwrites the fields present in `patch`.
    async fn update(&self, id: EmployeeId, patch: EmployeePatch) -> Result<Employee>;

    /// Permanently removes an employee.
    async fn delete(&self, id: EmployeeId) -> Result<()>;

    /// Returns the number of stored employees.
    async fn count(&self) -> Result<u64>;

    /// Checks that the store is reachable.
    async fn ping(&self) -> Result<()>;
}
