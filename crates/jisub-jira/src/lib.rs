//! jisub JIRA Integration
//!
//! Client library for creating sub-tasks under a JIRA issue and updating
//! its fields.

pub mod auth;
pub mod client;
pub mod error;
pub mod mapping;
pub mod request;
pub mod types;

pub use auth::BearerAuth;
pub use client::JiraClient;
pub use error::{Error, Result};
pub use mapping::Mapping;
pub use types::*;
