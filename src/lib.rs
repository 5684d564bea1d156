pub mod architecture;
pub mod dot_ast;
pub mod dot_parser;
pub mod dot_writer;
pub mod error;
pub mod render;

pub use error::{Error, Result};

/// DOT source of the built-in PyCS architecture diagram.
pub fn architecture_source() -> String {
    dot_writer::source(&architecture::pycs_architecture())
}

/// Parses and validates a DOT document, returning the graph it declares.
pub fn load(input: &str) -> Result<dot_ast::Digraph> {
    let graph = dot_parser::parse_dot(input)?;
    graph.validate()?;
    Ok(graph)
}
