pub mod args;
pub mod error;
pub mod error_view;
pub mod output;
pub mod style;
pub mod ui;
pub mod migrate;
pub mod status;

pub use args::{Cli, Command, MigrateArgs, StatusArgs};
pub use error::CliError;
