pub mod commands;
pub mod context;
pub mod error;
pub mod logging;
pub mod render;
pub mod repl;

pub use context::CliContext;
pub use error::CliError;
pub use repl::readline;
