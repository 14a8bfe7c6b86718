//! Configuration sources, lowest precedence first: global file, workspace
//! file, environment.

pub mod env;
pub mod global_file;
pub mod workspace_file;
