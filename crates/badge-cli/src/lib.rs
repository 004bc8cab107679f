//! Library side of the `badge-maker` binary: logging setup and the staged
//! CSV-to-document pipeline.

pub mod logging;
pub mod pipeline;
pub mod types;
