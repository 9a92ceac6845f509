//! jisub core
//!
//! Configuration model and on-disk storage shared by the jisub crates.

pub mod error;
pub mod models;
pub mod storage;

pub use error::{Error, Result};
pub use models::Config;
