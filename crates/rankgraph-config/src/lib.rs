//! # RankGraph Config
//!
//! Type-safe configuration management for RankGraph.
//!
//! This crate provides configuration loading from `.env`, the process
//! environment, and an optional YAML file, together with validation and
//! documented defaults for every rendering parameter.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;

pub use defaults::*;
pub use loader::*;
pub use schema::*;
pub use validator::*;
