mod app_error;
mod code;

pub use app_error::{AppError, AppResult};
pub use code::{ErrorCode, message_for, resolve_http_status};
