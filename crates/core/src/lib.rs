pub mod config;
pub mod error;
pub mod logger;
pub mod model;

pub use error::{ClientError, Result};
