//! CLI domain: parse, route, output and presentation only.
//! Segment evaluation lives in the library; the route table only wires it up.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands, OutputFormat};
pub use presentation::{
    format_check_result, format_listed_json, format_listed_text, format_rendered_json,
    format_rendered_text, RenderedSegment,
};
pub use route::RunContext;
