pub mod config;
pub mod data;
pub mod error;
pub mod fixtures;
pub mod random;
pub mod requests;
pub mod scenarios;
pub mod traits;
pub mod types;
pub mod verify;

pub use error::{Error, Result};
