//! MongoDB connection management.
//!
//! The driver's `Client` owns the connection pool; handles are cheap clones.

mod connector;

pub use connector::{MongoHandle, connect, disconnect};
