//! Heuristic measurement inference for DV labels.
//!
//! Deterministic, rules-driven classification of free-text variable
//! labels into measurement metadata. No model calls, no I/O: the rule
//! repository comes from `dv-standards` and everything here is pure.

#![deny(unsafe_code)]

pub mod batch;
pub mod engine;

pub use batch::{BatchItem, batch_infer};
pub use engine::infer;
