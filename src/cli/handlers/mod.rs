//! One handler per subcommand.

pub mod migrate;
pub mod openapi;
pub mod serve;

pub use migrate::MigrateCommandHandler;
pub use openapi::OpenApiCommandHandler;
pub use serve::ServeCommandHandler;
