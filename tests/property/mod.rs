//! Property-based tests for cache and fan-out guarantees

mod cache_properties;
mod fan_out_properties;
