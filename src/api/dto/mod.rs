//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `envelope` - Uniform `{code, message, data|errors}` response wrapper
//! - `user` - User-related request/response DTOs
//! - `health` - Liveness and health check payloads

mod envelope;
mod health;
mod user;

pub use envelope::{ApiResponse, Empty, error, not_found, success};
pub use health::{ComponentHealth, HealthResponse, HealthStatus, PingResponse};
pub use user::{CreateUserRequest, EmailQuery, UpdateUserRequest, UserView};
