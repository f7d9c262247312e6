//! # RankGraph Graphs
//!
//! Rank report extraction, message fetching, and chart rendering.
//!
//! Messages are fetched once through a [`MessageSource`], matched against the
//! rank report pattern, and drawn as a line chart with plotters. The
//! [`RankPipeline`] ties the stages together.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod chart;
pub mod extractor;
pub mod fetcher;
pub mod monthly;
pub mod pipeline;
pub mod renderer;
pub mod traits;
pub mod viewer;

pub use chart::*;
pub use extractor::*;
pub use fetcher::*;
pub use monthly::*;
pub use pipeline::*;
pub use renderer::*;
pub use traits::*;
pub use viewer::*;
