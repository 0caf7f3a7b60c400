//! Debug logging for provider selection and vault access
//!
//! Output goes to a file in the system temp directory so that library
//! consumers (including the Python bindings) keep a clean stdout/stderr.

pub mod file_logger;

pub use file_logger::{
    log, trace, debug, info, warn, error,
    log_file_path, LogLevel,
};
