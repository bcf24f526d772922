//! # Roster Core
//!
//! Core types for the Roster employee directory.
//!
//! This crate provides the abstractions shared by every Roster component:
//! - The unified error type
//! - Employee records and their create/update payloads
//! - Client-side directory state

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod directory;
pub mod employee;
pub mod error;
pub mod types;

pub use directory::{Dialog, Directory, EmployeeForm, EmployeeList, Event, Notice, SearchQuery};
pub use employee::{Employee, EmployeeDraft, EmployeePatch, NewEmployee, REQUIRED_FIELDS_MESSAGE};
pub use error::{Error, Result};
pub use types::{EmployeeId, RequestId};
