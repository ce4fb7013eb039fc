mod user;

pub(crate) use user::bson_timestamp;
pub use user::{NewUser, USER_COLLECTION, UserChanges, UserRecord, next_update_time, now};
