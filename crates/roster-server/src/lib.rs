//! # Roster Server
//!
//! HTTP API for the employee directory.
//!
//! | Method | Path | |
//! |---|---|---|
//! | GET | `/api/employees` | list, newest first |
//! | POST | `/api/employees` | create |
//! | GET | `/api/employees/:id` | read |
//! | PUT | `/api/employees/:id` | partial update |
//! | DELETE | `/api/employees/:id` | delete |
//!
//! Request bodies are decoded as JSON whatever their `Content-Type`.
//!
//! Failures carry an object under `error`, not a bare string:
//!
//! ```json
//! {"error": {"message": "Email already exists", "type": "conflict_error", "code": "email_taken"}}
//! ```
//!
//! Clients that only need the text should read `error.message`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod api;
mod handlers;
pub mod server;

pub use api::{ApiError, DeleteResponse, ErrorResponse, ServerStatus};
pub use server::{AppState, Server, ServerConfig};
