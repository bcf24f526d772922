//! Employee operations on top of a store.
//!
//! Validation happens here, before any store access. Email uniqueness is
//! checked up front for a clean early answer, but the store constraint stays
//! authoritative: a create that races past the lookup still ends as
//! [`Error::Conflict`].

use std::sync::Arc;

use roster_core::{
    Employee, EmployeeDraft, EmployeeId, EmployeePatch, Error, NewEmployee, Result,
};

use crate::store::EmployeeStore;

/// Employee operations shared by the HTTP API and the CLI.
#[derive(Clone)]
pub struct EmployeeService {
    store: Arc<dyn EmployeeStore>,
}

impl EmployeeService {
    /// Creates a service over the given store.
    pub fn new(store: Arc<dyn EmployeeStore>) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn EmployeeStore> {
        &self.store
    }

    /// Lists all employees, newest first.
    pub async fn list(&self) -> Result<Vec<Employee>> {
        self.store.list().await
    }

    /// Creates an employee from a client draft.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] if a field is missing, [`Error::Conflict`] if
    /// the email is taken, or a store error.
    pub async fn create(&self, draft: EmployeeDraft) -> Result<Employee> {
        let new = draft.validate()?;
        self.ensure_email_free(&new.email, None).await?;

        let employee = self.insert(new).await?;
        tracing::info!(id = %employee.id, email = %employee.email, "Employee created");
        Ok(employee)
    }

    /// Fetches one employee.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if no such employee exists.
    pub async fn get(&self, id: EmployeeId) -> Result<Employee> {
        self.store.get(id).await?.ok_or(Error::NotFound { id })
    }

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] for a blank field, [`Error::NotFound`] for a
    /// missing employee, [`Error::Conflict`] if the new email is taken.
    pub async fn update(&self, id: EmployeeId, patch: EmployeePatch) -> Result<Employee> {
        let patch = patch.validate()?;
        if patch.is_empty() {
            return self.get(id).await;
        }
        if let Some(email) = &patch.email {
            self.ensure_email_free(email, Some(id)).await?;
        }

        let employee = self.store.update(id, patch).await?;
        tracing::info!(id = %employee.id, "Employee updated");
        Ok(employee)
    }

    /// Permanently deletes an employee.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if no such employee exists.
    pub async fn delete(&self, id: EmployeeId) -> Result<()> {
        self.store.delete(id).await?;
        tracing::info!(id = %id, "Employee deleted");
        Ok(())
    }

    /// Number of stored employees.
    pub async fn count(&self) -> Result<u64> {
        self.store.count().await
    }

    async fn insert(&self, new: NewEmployee) -> Result<Employee> {
        match self.store.insert(new).await {
            Err(err @ Error::Conflict { .. }) => {
                tracing::debug!(error = %err, "Unique constraint rejected insert");
                Err(err)
            },
            other => other,
        }
    }

    async fn ensure_email_free(&self, email: &str, owner: Option<EmployeeId>) -> Result<()> {
        match self.store.find_by_email(email).await? {
            Some(existing) if Some(existing.id) != owner => Err(Error::Conflict {
                email: email.to_string(),
            }),
            _ => Ok(()),
        }
    }
}
