mod inspect;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "miniscope",
    version,
    about = "Editor intelligence for WXML/WXSS mini-program projects",
    long_about = "Miniscope resolves class names and CSS variables across a mini-program's \
                  paired markup/stylesheet files, following @import chains and the project's \
                  global stylesheet. It serves completions and document symbols over LSP and \
                  offers the same collectors as one-shot inspection commands."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the Language Server Protocol (LSP) server
    #[command(
        long_about = "Serves completions and document symbols over stdio. Intended to be \
                            launched by an editor; logs go to ~/.miniscope/logs."
    )]
    Lsp,
    /// Print the class names visible from a file
    #[command(
        long_about = "For a stylesheet, prints every class-selector name reachable through \
                            its @import chain. For a markup file, prints the class tokens its \
                            class attributes actually use."
    )]
    Classes {
        /// Markup or stylesheet file to inspect
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Workspace root used to resolve /-prefixed imports. Defaults to the file's directory.
        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,
    },
    /// Print the page-scoped CSS variables visible from a stylesheet
    #[command(
        long_about = "Prints every custom property declared in page-scoped rules of the \
                            given stylesheet and its @import chain."
    )]
    Vars {
        /// Stylesheet file to inspect
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Workspace root used to resolve /-prefixed imports. Defaults to the file's directory.
        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,
    },
    /// Print the outline symbols of a markup document
    #[command(
        long_about = "Prints one line per element/script symbol, the same flat outline the \
                            LSP document-symbol provider reports."
    )]
    Outline {
        /// Markup file to inspect
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging based on command
    let component = match &cli.command {
        Commands::Lsp => "lsp",
        _ => "cli",
    };
    let _guard = miniscope_core::logging::init_logging(component, !matches!(cli.command, Commands::Lsp));

    match cli.command {
        Commands::Lsp => {
            tracing::info!("starting miniscope language server on stdio");
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(miniscope_lsp::run_server())
        }
        Commands::Classes { file, root } => inspect::classes(&file, root.as_deref()),
        Commands::Vars { file, root } => inspect::vars(&file, root.as_deref()),
        Commands::Outline { file } => inspect::outline(&file),
    }
}
