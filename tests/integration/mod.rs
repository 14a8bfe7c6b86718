//! Integration tests for status-line segment evaluation

mod caching;
mod config_integration;
mod demo_session;
mod fan_out;
mod segments;
mod test_utils;
