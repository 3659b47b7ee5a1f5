//! Channel throughput benchmarks and charts of the results.
//!
//! Two messaging implementations are measured, "alt" (the crossbeam
//! channel) and "std" (`std::sync::mpsc`), each in an unbounded and in a
//! rendezvous (zero-capacity) configuration.  The sweeps in [`throughput`]
//! serialize one CSV file per series; [`chart`] renders those files into
//! SVG scatter charts of throughput against sender-thread count.

pub mod chart;
pub mod error;
pub mod series;
pub mod throughput;

pub use crate::error::Error;
pub use crate::series::{Record, Series};
