pub mod client;
#[cfg(test)]
pub mod memory;
pub mod mongo;

pub use client::{Database, DbError};
pub use mongo::MongoGateway;
