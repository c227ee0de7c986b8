//! CLI library components for the DV standardization workbench.

pub mod logging;
pub mod pipeline;
