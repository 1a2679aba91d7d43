pub mod app;
pub mod artifact;
pub mod client;
pub mod deploy;
pub mod error;
pub mod provider;

mod mock;

pub use crate::error::AppError;
