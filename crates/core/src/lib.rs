// Jobstate Core - Job lifecycle tracking
// NO I/O, NO persistence: state lives as long as the owning controller

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use error::{AppError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
