pub mod contact;
pub mod diagnostics;
pub mod health;
pub mod root;
