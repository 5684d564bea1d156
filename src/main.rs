use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pycs_diagram::render::{self, OutputFormat, Renderer};

#[derive(Parser)]
#[command(name = "pycs-diagram", about = "Render the PyCS architecture stack diagram with Graphviz")]
struct Cli {
    /// Directory the image is written to
    #[arg(long, default_value = render::DEFAULT_DIRECTORY)]
    directory: PathBuf,

    /// Base file name of the DOT source and image
    #[arg(long, default_value = render::DEFAULT_FILENAME)]
    filename: String,

    /// Output image format
    #[arg(long, value_enum, default_value_t = OutputFormat::Png)]
    format: OutputFormat,

    /// Graphviz layout engine
    #[arg(long, default_value = render::DEFAULT_LAYOUT)]
    layout: String,

    /// Graphviz executable
    #[arg(long, default_value = render::DEFAULT_PROGRAM)]
    dot_binary: String,

    /// Keep the DOT source file next to the image
    #[arg(long)]
    keep_source: bool,

    /// Only print the DOT source, do not run Graphviz
    #[arg(long)]
    no_render: bool,

    /// Render this DOT file instead of the built-in diagram
    #[arg(long)]
    input: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("ERROR: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> pycs_diagram::Result<()> {
    let graph = match &cli.input {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|source| pycs_diagram::Error::Io {
                path: path.clone(),
                source,
            })?;
            pycs_diagram::load(&text)?
        }
        None => pycs_diagram::architecture::pycs_architecture(),
    };

    if !cli.no_render {
        let renderer = Renderer {
            program: cli.dot_binary,
            layout: cli.layout,
            format: cli.format,
            directory: cli.directory,
            filename: cli.filename,
            cleanup: !cli.keep_source,
        };
        let output = renderer.render(&graph)?;
        println!("Diagram generated: {}", output.display());
        println!("{} file: {}", renderer.format.label(), output.display());
        println!();
    }

    println!("--- DOT Source ---");
    println!("{}", pycs_diagram::dot_writer::source(&graph));
    Ok(())
}
