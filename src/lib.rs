pub mod batch;
pub mod core;
pub mod textformat;

pub use batch::BatchConfig;
pub use core::GlobalConfig;
pub use core::error::{Result, SweepError};
