//! # Roster Store
//!
//! Employee persistence for Roster.
//!
//! - [`EmployeeStore`]: the storage trait
//! - [`SqliteEmployeeStore`]: rusqlite implementation (file or in-memory)
//! - [`EmployeeService`]: validated operations shared by the server and CLI

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod service;
pub mod sqlite;
pub mod store;

pub use service::EmployeeService;
pub use sqlite::SqliteEmployeeStore;
pub use store::EmployeeStore;
