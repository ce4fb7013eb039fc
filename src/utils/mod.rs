pub mod password;
pub mod validate;
pub mod validation;

pub use validate::ValidatedJson;
