//! Reprofile Providers - Remote report sources
//!
//! A [`ReportSource`] turns a connection into the list of reports it
//! currently offers. [`fetch_reports_cancellable`] runs one fetch with a
//! timeout and a cancel signal; [`refresh_report_cache`] additionally
//! stores a completed fetch as the connection's cached report list.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod error;
pub mod fetch;
pub mod http;
pub mod source;

pub use error::{FetchError, RemoteFault};
pub use fetch::{fetch_reports_cancellable, refresh_report_cache, FetchOutcome};
pub use http::HttpReportSource;
pub use source::ReportSource;
