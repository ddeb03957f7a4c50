//! Configuration management
//!
//! Layered TOML configuration with environment variable overrides.
//!
//! # Configuration Priority (lowest to highest)
//! 1. `default.toml` - Base default configuration
//! 2. `{environment}.toml` - Environment-specific configuration
//! 3. `local.toml` - Local overrides (not committed to version control)
//! 4. `COSTUME_*` environment variables
//! 5. Command line flags (merged by the CLI)

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use environment::Environment;
pub use loader::ConfigLoader;
pub use settings::{DatabaseBackend, DatabaseConfig, JwtConfig, RentalConfig, Settings};
