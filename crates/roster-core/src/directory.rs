//! Client-side directory state.
//!
//! The directory view is split into independent slices: the employee list,
//! the search query, and the add/edit dialog. Each slice is plain data with
//! its own update functions, and [`Directory::apply`] routes an [`Event`] to
//! the slices it concerns. Nothing here performs I/O.

use serde::{Deserialize, Serialize};

use crate::employee::{Employee, EmployeeDraft, EmployeePatch};
use crate::types::EmployeeId;

/// Employees as last seen by the client, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeList {
    employees: Vec<Employee>,
}

impl EmployeeList {
    /// Creates a list from fetched employees.
    #[must_use]
    pub fn new(employees: Vec<Employee>) -> Self {
        let mut list = Self::default();
        list.replace(employees);
        list
    }

    /// Replaces the whole list with a fresh fetch result.
    pub fn replace(&mut self, employees: Vec<Employee>) {
        self.employees = employees;
        self.sort();
    }

    /// Inserts a new employee or overwrites the one with the same id.
    pub fn upsert(&mut self, employee: Employee) {
        match self.employees.iter_mut().find(|e| e.id == employee.id) {
            Some(existing) => *existing = employee,
            None => self.employees.push(employee),
        }
        self.sort();
    }

    /// Removes an employee. Returns `true` if it was present.
    pub fn remove(&mut self, id: EmployeeId) -> bool {
        let before = self.employees.len();
        self.employees.retain(|e| e.id != id);
        self.employees.len() != before
    }

    /// Looks up an employee by id.
    #[must_use]
    pub fn get(&self, id: EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    /// Returns the employees in display order.
    #[must_use]
    pub fn as_slice(&self) -> &[Employee] {
        &self.employees
    }

    /// Number of employees.
    #[must_use]
    pub fn len(&self) -> usize {
        self.employees.len()
    }

    /// Returns `true` if the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    fn sort(&mut self) {
        self.employees
            .sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
    }
}

/// Case-insensitive name filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Creates a query.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self(query.into())
    }

    /// Replaces the query text.
    pub fn set(&mut self, query: impl Into<String>) {
        self.0 = query.into();
    }

    /// Returns the raw query text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if `employee`'s name contains the query.
    #[must_use]
    pub fn matches(&self, employee: &Employee) -> bool {
        let needle = self.0.trim().to_lowercase();
        needle.is_empty() || employee.name.to_lowercase().contains(&needle)
    }

    /// Filters `employees`, preserving order.
    #[must_use]
    pub fn filter<'a>(&self, employees: &'a [Employee]) -> Vec<&'a Employee> {
        employees.iter().filter(|e| self.matches(e)).collect()
    }
}

/// Add/edit dialog visibility and target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "employee", rename_all = "snake_case")]
pub enum Dialog {
    /// No dialog shown.
    #[default]
    Closed,
    /// Dialog open for a new employee.
    Adding,
    /// Dialog open for an existing employee.
    Editing(Employee),
}

impl Dialog {
    /// Returns `true` when the dialog is visible.
    #[must_use]
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// The employee being edited, if any.
    #[must_use]
    pub fn target(&self) -> Option<&Employee> {
        match self {
            Self::Editing(employee) => Some(employee),
            _ => None,
        }
    }

    /// Initial form contents for the current dialog state.
    #[must_use]
    pub fn form(&self) -> EmployeeForm {
        match self {
            Self::Editing(employee) => EmployeeForm {
                name: employee.name.clone(),
                email: employee.email.clone(),
                position: employee.position.clone(),
            },
            Self::Adding | Self::Closed => EmployeeForm::default(),
        }
    }
}

/// Text fields of the add/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeForm {
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Job title.
    pub position: String,
}

impl EmployeeForm {
    /// A form may be submitted only when every field has content.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        [&self.name, &self.email, &self.position]
            .iter()
            .all(|f| !f.trim().is_empty())
    }

    /// Turns the form into the request it should produce.
    ///
    /// Returns `None` if the form is invalid or the dialog is closed.
    #[must_use]
    pub fn submission(&self, dialog: &Dialog) -> Option<Submission> {
        if !self.is_valid() {
            return None;
        }
        match dialog {
            Dialog::Closed => None,
            Dialog::Adding => Some(Submission::Create(EmployeeDraft::new(
                self.name.clone(),
                self.email.clone(),
                self.position.clone(),
            ))),
            Dialog::Editing(employee) => Some(Submission::Update {
                id: employee.id,
                patch: EmployeePatch::default()
                    .with_name(self.name.clone())
                    .with_email(self.email.clone())
                    .with_position(self.position.clone()),
            }),
        }
    }
}

/// Request produced by submitting the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// `POST /api/employees`.
    Create(EmployeeDraft),
    /// `PUT /api/employees/:id`.
    Update {
        /// Target employee.
        id: EmployeeId,
        /// Fields to overwrite.
        patch: EmployeePatch,
    },
}

/// Operation whose outcome is being reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// List fetch.
    Fetch,
    /// Create.
    Create,
    /// Update.
    Update,
    /// Delete.
    Delete,
}

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    /// Operation succeeded.
    Success,
    /// Operation failed.
    Error,
}

/// Short notification shown after an operation completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Severity.
    pub level: NoticeLevel,
    /// Text to display.
    pub message: String,
}

impl Notice {
    /// Derives the notice for an operation that finished with HTTP `status`.
    ///
    /// Returns `None` for a successful fetch, which is silent.
    #[must_use]
    pub fn for_outcome(operation: Operation, status: u16) -> Option<Self> {
        if (200..300).contains(&status) {
            let message = match operation {
                Operation::Fetch => return None,
                Operation::Create => "Employee added successfully!",
                Operation::Update => "Employee updated successfully!",
                Operation::Delete => "Employee deleted successfully!",
            };
            return Some(Self::success(message));
        }

        let message = match (status, operation) {
            (400, Operation::Create) => "All fields are required",
            (400, _) => "Invalid employee details",
            (404, _) => "Employee not found",
            (409, _) => "Email already exists",
            (_, Operation::Fetch) => "Error fetching employees",
            (_, Operation::Create) => "Error adding employee",
            (_, Operation::Update) => "Error updating employee",
            (_, Operation::Delete) => "Error deleting employee",
        };
        Some(Self::error(message))
    }

    fn success(message: &str) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.to_string(),
        }
    }

    fn error(message: &str) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.to_string(),
        }
    }
}

/// Something that happened to the directory view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The list was fetched.
    Fetched(Vec<Employee>),
    /// An employee was created.
    Created(Employee),
    /// An employee was updated.
    Updated(Employee),
    /// An employee was deleted.
    Deleted(EmployeeId),
    /// The search box changed.
    SearchChanged(String),
    /// The user asked to add an employee.
    OpenAdd,
    /// The user asked to edit an employee.
    OpenEdit(Employee),
    /// The dialog was dismissed.
    CloseDialog,
}

/// The complete directory view state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directory {
    /// Known employees.
    pub employees: EmployeeList,
    /// Current search.
    pub search: SearchQuery,
    /// Dialog state.
    pub dialog: Dialog,
}

impl Directory {
    /// Applies an event to the relevant slices.
    pub fn apply(&mut self, event: Event) {
        match event {
            Event::Fetched(employees) => self.employees.replace(employees),
            Event::Created(employee) | Event::Updated(employee) => {
                self.employees.upsert(employee);
                self.dialog = Dialog::Closed;
            },
            Event::Deleted(id) => {
                self.employees.remove(id);
                if self.dialog.target().is_some_and(|e| e.id == id) {
                    self.dialog = Dialog::Closed;
                }
            },
            Event::SearchChanged(query) => self.search.set(query),
            Event::OpenAdd => self.dialog = Dialog::Adding,
            Event::OpenEdit(employee) => self.dialog = Dialog::Editing(employee),
            Event::CloseDialog => self.dialog = Dialog::Closed,
        }
    }

    /// Employees matching the current search, newest first.
    #[must_use]
    pub fn visible(&self) -> Vec<&Employee> {
        self.search.filter(self.employees.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    fn employee(id: i64, name: &str) -> Employee {
        Employee {
            id: EmployeeId(id),
            name: name.to_string(),
            email: format!("{}@x.com", name.to_lowercase()),
            position: "Eng".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
                + Duration::seconds(id),
        }
    }

    #[test]
    fn test_list_keeps_newest_first() {
        let list = EmployeeList::new(vec![employee(1, "Ann"), employee(3, "Cy"), employee(2, "Bob")]);
        let ids: Vec<i64> = list.as_slice().iter().map(|e| e.id.get()).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_upsert_and_remove() {
        let mut list = EmployeeList::new(vec![employee(1, "Ann")]);
        list.upsert(employee(2, "Bob"));
        assert_eq!(list.as_slice()[0].name, "Bob");

        let mut renamed = employee(1, "Ann");
        renamed.position = "Sr Eng".to_string();
        list.upsert(renamed);
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(EmployeeId(1)).unwrap().position, "Sr Eng");

        assert!(list.remove(EmployeeId(1)));
        assert!(!list.remove(EmployeeId(1)));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let employees = vec![employee(1, "Ann"), employee(2, "Joanna"), employee(3, "Bob")];
        let hits = SearchQuery::new("AN").filter(&employees);
        let names: Vec<&str> = hits.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Ann", "Joanna"]);

        assert_eq!(SearchQuery::default().filter(&employees).len(), 3);
    }

    #[test]
    fn test_dialog_form_and_submission() {
        let dialog = Dialog::Adding;
        let mut form = dialog.form();
        assert!(!form.is_valid());
        assert_eq!(form.submission(&dialog), None);

        form.name = "Ann".into();
        form.email = "ann@x.com".into();
        form.position = "Eng".into();
        assert_eq!(
            form.submission(&dialog),
            Some(Submission::Create(EmployeeDraft::new("Ann", "ann@x.com", "Eng")))
        );

        let editing = Dialog::Editing(employee(4, "Dee"));
        let mut form = editing.form();
        assert_eq!(form.name, "Dee");
        form.position = "Lead".into();
        match form.submission(&editing) {
            Some(Submission::Update { id, patch }) => {
                assert_eq!(id, EmployeeId(4));
                assert_eq!(patch.position.as_deref(), Some("Lead"));
            },
            other => panic!("unexpected submission: {other:?}"),
        }

        assert_eq!(form.submission(&Dialog::Closed), None);
    }

    #[test]
    fn test_directory_events() {
        let mut dir = Directory::default();
        dir.apply(Event::Fetched(vec![employee(1, "Ann"), employee(2, "Bob")]));
        dir.apply(Event::OpenAdd);
        assert!(dir.dialog.is_open());

        dir.apply(Event::Created(employee(3, "Cy")));
        assert_eq!(dir.dialog, Dialog::Closed);
        assert_eq!(dir.employees.len(), 3);

        dir.apply(Event::OpenEdit(employee(2, "Bob")));
        dir.apply(Event::Deleted(EmployeeId(2)));
        assert_eq!(dir.dialog, Dialog::Closed);

        dir.apply(Event::SearchChanged("c".into()));
        let visible: Vec<&str> = dir.visible().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(visible, vec!["Cy"]);
    }

    #[test]
    fn test_notice_distinguishes_failures() {
        assert_eq!(Notice::for_outcome(Operation::Fetch, 200), None);
        assert_eq!(
            Notice::for_outcome(Operation::Create, 201).unwrap().level,
            NoticeLevel::Success
        );
        assert_eq!(
            Notice::for_outcome(Operation::Create, 409).unwrap().message,
            "Email already exists"
        );
        assert_eq!(
            Notice::for_outcome(Operation::Delete, 404).unwrap().message,
            "Employee not found"
        );
        assert_eq!(
            Notice::for_outcome(Operation::Update, 500).unwrap().message,
            "Error updating employee"
        );
    }

    #[test]
    fn test_directory_state_serializes() {
        let mut dir = Directory::default();
        dir.apply(Event::OpenEdit(employee(1, "Ann")));
        let json = serde_json::to_value(&dir).unwrap();
        assert_eq!(json["dialog"]["state"], "editing");
        assert_eq!(json["dialog"]["employee"]["name"], "Ann");

        let back: Directory = serde_json::from_value(json).unwrap();
        assert_eq!(back, dir);
    }
}
