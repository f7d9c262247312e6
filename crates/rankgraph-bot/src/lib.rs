//! # RankGraph Bot
//!
//! Discord front end for RankGraph.
//!
//! Logs in, reads one page of a channel's history when the gateway reports
//! ready, charts the rank reports found there, and shuts down.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod bot;
pub mod cli;
pub mod error;
pub mod run_once;
pub mod source;

pub use bot::*;
pub use cli::*;
pub use error::*;
pub use run_once::*;
pub use source::*;
