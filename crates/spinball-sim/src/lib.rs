pub mod error;
pub mod options;
pub mod runner;

pub use error::RunError;
pub use options::RunOptions;
pub use runner::{HeadlessRunner, RunSummary};
