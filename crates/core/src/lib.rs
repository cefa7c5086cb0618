pub mod config;
pub mod error;
pub mod types;

pub use config::{Config, parse_config, parse_config_str};
pub use error::{Error, Result};
pub use types::*;
