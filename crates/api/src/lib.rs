//! Taskflow HTTP API.
//!
//! Endpoints:
//! - GET    /health          : liveness and reminder queue depth
//! - POST   /auth/register   : create an account
//! - POST   /auth/login      : exchange credentials for a bearer token
//! - GET    /api/tasks       : list the caller's tasks
//! - POST   /api/tasks       : create a task
//! - PATCH  /api/tasks/{id}  : update a task
//! - DELETE /api/tasks/{id}  : delete a task

pub mod middleware;
pub mod password;
pub mod routes;
pub mod state;
