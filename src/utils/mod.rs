pub mod date_utils;
pub mod log_utils;

pub use date_utils::{parse_iso_date, parse_slash_date};
pub use log_utils::init_tracing;
