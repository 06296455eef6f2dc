pub mod cli;
pub mod error;
pub mod format;
pub mod logging;
pub mod mode;
pub mod serializable;
