//! Response code taxonomy.
//!
//! Every envelope carries a numeric code from this closed set. Codes are
//! grouped by range (`2xxxx` success, `4xxxx` client error, `5xxxx` server
//! error) and the HTTP status of an error envelope is derived from that range.

use axum::http::StatusCode;

/// Closed set of response codes emitted by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 20000,
    LoginSuccess = 20001,
    LogoutSuccess = 20002,
    CreatedSuccess = 20003,
    BadRequest = 40000,
    ParamInvalid = 40001,
    QueryParamInvalid = 40002,
    CreateFailed = 40003,
    InvalidOtp = 40004,
    SendEmailFailed = 40005,
    UserHasExists = 40006,
    LoginFailed = 40007,
    Unauthorized = 40101,
    InvalidToken = 40102,
    ExpiredToken = 40103,
    StolenToken = 40104,
    NotFound = 40400,
    UserNotExists = 40401,
    InternalError = 50000,
    JwtInternalError = 50001,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 20] = [
        ErrorCode::Success,
        ErrorCode::LoginSuccess,
        ErrorCode::LogoutSuccess,
        ErrorCode::CreatedSuccess,
        ErrorCode::BadRequest,
        ErrorCode::ParamInvalid,
        ErrorCode::QueryParamInvalid,
        ErrorCode::CreateFailed,
        ErrorCode::InvalidOtp,
        ErrorCode::SendEmailFailed,
        ErrorCode::UserHasExists,
        ErrorCode::LoginFailed,
        ErrorCode::Unauthorized,
        ErrorCode::InvalidToken,
        ErrorCode::ExpiredToken,
        ErrorCode::StolenToken,
        ErrorCode::NotFound,
        ErrorCode::UserNotExists,
        ErrorCode::InternalError,
        ErrorCode::JwtInternalError,
    ];

    pub const fn as_u32(self) -> u32 {
        self as u32
    }

    /// Looks up a raw integer in the closed set.
    pub fn from_u32(raw: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|code| code.as_u32() == raw)
    }

    pub const fn message(self) -> &'static str {
        match self {
            ErrorCode::Success => "Success",
            ErrorCode::LoginSuccess => "Login Success",
            ErrorCode::LogoutSuccess => "Logout Success",
            ErrorCode::CreatedSuccess => "Created Success",
            ErrorCode::BadRequest => "Bad Request",
            ErrorCode::ParamInvalid => "Param invalid",
            ErrorCode::QueryParamInvalid => "Query param invalid",
            ErrorCode::CreateFailed => "Create failed",
            ErrorCode::InvalidOtp => "OTP is invalid",
            ErrorCode::SendEmailFailed => "Send email failed",
            ErrorCode::UserHasExists => "User has already exists",
            ErrorCode::LoginFailed => "Login credential is incorrect",
            ErrorCode::Unauthorized => "Unauthorized",
            ErrorCode::InvalidToken => "Token is invalid",
            ErrorCode::ExpiredToken => "Token is expired",
            ErrorCode::StolenToken => "Token is stolen",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::UserNotExists => "User not exists",
            ErrorCode::InternalError => "Internal error",
            ErrorCode::JwtInternalError => "JWT internal error",
        }
    }

    /// HTTP status derived from the code's range.
    pub fn http_status(self) -> StatusCode {
        StatusCode::from_u16(resolve_http_status(self.as_u32()))
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message(), self.as_u32())
    }
}

impl From<ErrorCode> for u32 {
    fn from(code: ErrorCode) -> Self {
        code.as_u32()
    }
}

/// Maps a raw response code to an HTTP status by range.
pub fn resolve_http_status(code: u32) -> u16 {
    match code {
        20000..20200 => 200,
        40000..50000 => 400,
        _ => 500,
    }
}

/// Display message for a raw response code, falling back to the internal
/// error message for integers outside the closed set.
pub fn message_for(code: u32) -> &'static str {
    ErrorCode::from_u32(code)
        .unwrap_or(ErrorCode::InternalError)
        .message()
}
