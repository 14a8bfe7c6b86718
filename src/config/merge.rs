//! Merge rules for the layered configuration.

pub mod merge_policy;
pub mod mode_overrides;
