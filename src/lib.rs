pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod environment;
pub mod error;
pub mod signal;
pub mod ui;

pub use environment::{Environment, Overrides};
pub use error::{ApiError, TinyDbError, TinyDbResult};
