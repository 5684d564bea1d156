use std::path::PathBuf;
use std::process::ExitStatus;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("edge {from} -> {to} references undeclared node `{missing}`")]
    UnknownNode {
        from: String,
        to: String,
        missing: String,
    },

    #[error("node `{0}` is declared more than once")]
    DuplicateNode(String),

    #[error("syntax error in DOT source: {0}")]
    Syntax(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to execute `{program}`, make sure the Graphviz executables are on your PATH: {source}")]
    ExecutableNotFound {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{program}` exited with {status}: {stderr}")]
    RenderFailed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
