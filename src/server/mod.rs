//! Server module for inferdoc
//!
//! # Module Structure
//!
//! - `config`: Application configuration types
//! - `loader`: Configuration loading from files, environment and flags
//! - `init`: Proxy startup and shutdown

pub mod config;
mod init;
mod loader;

pub use init::run;
pub use loader::{load_config, ALT_API_KEY_VAR, ENV_PREFIX};
