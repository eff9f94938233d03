pub mod collector;
pub mod config;
pub mod error;
pub mod utils;

pub use collector::CollectorExecutor;
pub use config::GlobalConfig;
pub use error::{Result, SweepError};
pub use utils::format_duration;
