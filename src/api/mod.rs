//! HTTP access to the TinyDB API

pub mod client;
pub mod constants;
pub mod identity;

pub use client::{Authorization, TinyDbClient};
pub use identity::{HttpIdentityProvider, Identity, IdentityProvider};
