pub mod dry_run;
pub mod error;
pub mod ledger;
pub mod mode;
pub mod runner;
pub mod transaction;

pub use error::ExecutorError;
pub use mode::ExecutionMode;
pub use runner::{pending_scripts, RunObserver, RunReport, Runner};
