pub mod contact_repo;
pub mod error;
