//! Employee records and the payloads that create or modify them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::EmployeeId;

/// Message returned when a create payload lacks one of its fields.
pub const REQUIRED_FIELDS_MESSAGE: &str = "All fields (name, email, position) are required";

/// A stored employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Store-assigned identifier.
    pub id: EmployeeId,
    /// Full name.
    pub name: String,
    /// Email address, unique across all employees.
    pub email: String,
    /// Job title.
    pub position: String,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

/// Create payload as received from a client.
///
/// Every field is optional at this stage so that a missing field surfaces as
/// a validation error instead of a decoding failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeDraft {
    /// Full name.
    #[serde(default)]
    pub name: Option<String>,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Job title.
    #[serde(default)]
    pub position: Option<String>,
}

impl EmployeeDraft {
    /// Creates a draft with all three fields set.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        position: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            position: Some(position.into()),
        }
    }

    /// Validates the draft into a [`NewEmployee`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if any field is absent or blank.
    pub fn validate(self) -> Result<NewEmployee> {
        match (
            normalize(self.name),
            normalize(self.email),
            normalize(self.position),
        ) {
            (Some(name), Some(email), Some(position)) => Ok(NewEmployee {
                name,
                email,
                position,
            }),
            _ => Err(Error::validation(REQUIRED_FIELDS_MESSAGE)),
        }
    }
}

/// A validated employee ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewEmployee {
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Job title.
    pub position: String,
}

/// Partial update. Absent fields are left untouched.
///
/// `id` and `createdAt` are not part of the patch; clients that send a whole
/// employee back have those keys ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeePatch {
    /// New full name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New job title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

impl EmployeePatch {
    /// Sets the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the email.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the position.
    #[must_use]
    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = Some(position.into());
        self
    }

    /// Returns `true` if the patch touches no field.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.position.is_none()
    }

    /// Trims every provided field and rejects blank ones.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first blank field.
    pub fn validate(self) -> Result<Self> {
        Ok(Self {
            name: non_blank("name", self.name)?,
            email: non_blank("email", self.email)?,
            position: non_blank("position", self.position)?,
        })
    }

    /// Returns `employee` with this patch applied.
    #[must_use]
    pub fn apply(&self, employee: &Employee) -> Employee {
        Employee {
            id: employee.id,
            name: self.name.clone().unwrap_or_else(|| employee.name.clone()),
            email: self.email.clone().unwrap_or_else(|| employee.email.clone()),
            position: self
                .position
                .clone()
                .unwrap_or_else(|| employee.position.clone()),
            created_at: employee.created_at,
        }
    }
}

fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn non_blank(field: &str, value: Option<String>) -> Result<Option<String>> {
    match value {
        None => Ok(None),
        Some(v) => match normalize(Some(v)) {
            Some(v) => Ok(Some(v)),
            None => Err(Error::validation(format!("Field '{field}' must not be empty"))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ann() -> Employee {
        Employee {
            id: EmployeeId(1),
            name: "Ann".to_string(),
            email: "ann@x.com".to_string(),
            position: "Eng".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_draft_validates_and_trims() {
        let new = EmployeeDraft::new("  Ann ", "ann@x.com ", "Eng")
            .validate()
            .unwrap();
        assert_eq!(new.name, "Ann");
        assert_eq!(new.email, "ann@x.com");
        assert_eq!(new.position, "Eng");
    }

    #[test]
    fn test_draft_rejects_missing_or_blank_fields() {
        let missing = EmployeeDraft {
            name: Some("Ann".to_string()),
            email: None,
            position: Some("Eng".to_string()),
        };
        let err = missing.validate().unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        assert_eq!(err.to_string(), REQUIRED_FIELDS_MESSAGE);

        let blank = EmployeeDraft::new("Ann", "ann@x.com", "   ");
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_draft_from_json_with_missing_keys() {
        let draft: EmployeeDraft = serde_json::from_str(r#"{"name":"Ann"}"#).unwrap();
        assert_eq!(draft.email, None);
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_patch_ignores_immutable_keys() {
        let patch: EmployeePatch = serde_json::from_str(
            r#"{"id": 99, "createdAt": "2020-01-01T00:00:00Z", "position": "Sr Eng"}"#,
        )
        .unwrap();
        assert_eq!(patch, EmployeePatch::default().with_position("Sr Eng"));
    }

    #[test]
    fn test_patch_apply_changes_only_given_fields() {
        let before = ann();
        let after = EmployeePatch::default()
            .with_position("Sr Eng")
            .apply(&before);

        assert_eq!(after.position, "Sr Eng");
        assert_eq!(after.name, before.name);
        assert_eq!(after.email, before.email);
        assert_eq!(after.id, before.id);
        assert_eq!(after.created_at, before.created_at);
    }

    #[test]
    fn test_patch_validation() {
        let patch = EmployeePatch::default().with_name(" Bob ").validate().unwrap();
        assert_eq!(patch.name.as_deref(), Some("Bob"));

        let err = EmployeePatch::default().with_email("").validate().unwrap_err();
        assert_eq!(err.to_string(), "Field 'email' must not be empty");

        assert!(EmployeePatch::default().validate().unwrap().is_empty());
    }

    #[test]
    fn test_employee_json_shape() {
        let value = serde_json::to_value(ann()).unwrap();
        assert_eq!(value["id"], 1);
        assert_eq!(value["email"], "ann@x.com");
        assert!(value.get("createdAt").is_some());
        assert!(value.get("created_at").is_none());
    }
}
