//! Shared utilities for the wrap exchange.

pub mod logging;
pub mod time;

pub use logging::{init_logging, LogFormat, UnknownLogFormat};
pub use time::{format_block_span, format_duration, BLOCK_TIME_SECS};
