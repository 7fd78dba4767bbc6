//! Library side of the form sharing CLI: logging setup and the share pipeline.

pub mod logging;
pub mod pipeline;
pub mod types;
