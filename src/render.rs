use std::fmt;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Command;

use tracing::{debug, info};

use crate::dot_ast::Digraph;
use crate::dot_writer;
use crate::error::{Error, Result};

pub const DEFAULT_PROGRAM: &str = "dot";
pub const DEFAULT_LAYOUT: &str = "dot";
pub const DEFAULT_DIRECTORY: &str = "/tmp";
pub const DEFAULT_FILENAME: &str = "pycs_architecture";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Png,
    Svg,
    Pdf,
    #[value(alias = "jpeg")]
    Jpg,
}

impl OutputFormat {
    /// Value passed to Graphviz as `-T<format>`, also used as the extension.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
            OutputFormat::Pdf => "pdf",
            OutputFormat::Jpg => "jpg",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OutputFormat::Png => "PNG",
            OutputFormat::Svg => "SVG",
            OutputFormat::Pdf => "PDF",
            OutputFormat::Jpg => "JPG",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Writes DOT source to disk and runs a Graphviz executable over it.
#[derive(Debug, Clone)]
pub struct Renderer {
    pub program: String,
    pub layout: String,
    pub format: OutputFormat,
    pub directory: PathBuf,
    pub filename: String,
    pub cleanup: bool,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            layout: DEFAULT_LAYOUT.to_string(),
            format: OutputFormat::default(),
            directory: PathBuf::from(DEFAULT_DIRECTORY),
            filename: DEFAULT_FILENAME.to_string(),
            cleanup: true,
        }
    }
}

impl Renderer {
    pub fn source_path(&self) -> PathBuf {
        self.directory.join(&self.filename)
    }

    pub fn output_path(&self) -> PathBuf {
        self.directory
            .join(format!("{}.{}", self.filename, self.format.extension()))
    }

    /// Renders `graph` and returns the path of the image. An existing file
    /// with the same name is overwritten.
    pub fn render(&self, graph: &Digraph) -> Result<PathBuf> {
        graph.validate()?;
        debug!(
            nodes = graph.nodes().count(),
            edges = graph.edges().count(),
            name = %graph.name,
            "rendering graph"
        );

        std::fs::create_dir_all(&self.directory).map_err(|source| Error::Io {
            path: self.directory.clone(),
            source,
        })?;

        let source_path = self.source_path();
        std::fs::write(&source_path, dot_writer::source(graph)).map_err(|source| Error::Io {
            path: source_path.clone(),
            source,
        })?;

        let output_path = self.output_path();
        let mut command = Command::new(&self.program);
        command
            .arg(format!("-K{}", self.layout))
            .arg(format!("-T{}", self.format))
            .arg("-o")
            .arg(&output_path)
            .arg(&source_path);
        debug!(?command, "spawning graphviz");

        let output = command.output().map_err(|source| match source.kind() {
            ErrorKind::NotFound | ErrorKind::PermissionDenied => Error::ExecutableNotFound {
                program: self.program.clone(),
                source,
            },
            _ => Error::Io {
                path: PathBuf::from(&self.program),
                source,
            },
        })?;

        if !output.status.success() {
            return Err(Error::RenderFailed {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        if self.cleanup {
            std::fs::remove_file(&source_path).map_err(|source| Error::Io {
                path: source_path.clone(),
                source,
            })?;
        }

        info!(path = %output_path.display(), "diagram rendered");
        Ok(output_path)
    }
}
