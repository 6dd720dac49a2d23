//! Utility modules supporting search operations.
//!
//! - [`HttpClient`]: shared HTTP client with sensible defaults
//! - [`short_date`] / [`short_date_from_unix`]: compact date formatting for
//!   providers whose timestamps the shell displays directly

mod date;
mod http;

pub use date::{short_date, short_date_from_unix};
pub use http::HttpClient;
