use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use livetext::commands::{self, Overrides};
use livetext::diagnostics;

/// Command line for the `livetext` binary.
#[derive(Parser)]
#[command(name = "livetext", about = "Write text edited in the browser back into its source file")]
struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
    /// Log every candidate attempt
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// `livetext` subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Patch one file: replace the first occurrence of the old text
    Patch {
        /// File to patch
        file: PathBuf,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
        /// Replacement text
        #[arg(long = "new")]
        new_text: String,
        /// Text to look for
        #[arg(long = "old")]
        old_text: String,
    },
    /// Check that a running service answers
    Ping {
        /// Service URL (defaults to `[service] url`, then the bind address)
        #[arg(long)]
        server: Option<String>,
    },
    /// List the files tried for a page, in order
    Resolve {
        /// Page URL or path, e.g. `/about` or `http://localhost:3000/about`
        page: String,
        /// Project root (defaults to `project_root` in .livetext.toml)
        #[arg(long)]
        root: Option<PathBuf>,
    },
    /// Save an edit made on a page into whichever candidate file contains it
    Save {
        /// File to try before any guess (overrides `explicit_file`)
        #[arg(long)]
        file: Option<PathBuf>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
        /// Text after the edit
        #[arg(long = "new")]
        new_text: String,
        /// Text as rendered before the edit
        #[arg(long = "old")]
        old_text: String,
        /// Page URL or path the edit was made on
        page: String,
        /// Project root (overrides `project_root`)
        #[arg(long)]
        root: Option<PathBuf>,
        /// Send patches to a running service instead of patching in-process
        #[arg(long)]
        server: Option<String>,
    },
    /// Run the HTTP patch service
    Serve {
        /// Listen address (defaults to `[service] bind`, 127.0.0.1:3456)
        #[arg(long)]
        bind: Option<String>,
    },
}

/// Parse arguments, set up logging, run the subcommand.
fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG overrides; --verbose => debug; else info.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        return EnvFilter::new(if cli.verbose { "livetext=debug" } else { "livetext=info" });
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let result = match cli.command {
        Commands::Patch { file, json, new_text, old_text } => {
            commands::patch(&file, &old_text, &new_text, json)
        },
        Commands::Ping { server } => commands::ping(server.as_deref()).map(|()| return ExitCode::SUCCESS),
        Commands::Resolve { page, root } => {
            commands::resolve(&page, root.as_deref()).map(|()| return ExitCode::SUCCESS)
        },
        Commands::Save { file, json, new_text, old_text, page, root, server } => {
            let overrides = Overrides { file, root, server };
            commands::save(&page, &old_text, &new_text, &overrides, json)
        },
        Commands::Serve { bind } => commands::serve(bind.as_deref()).map(|()| return ExitCode::SUCCESS),
    };

    return result.unwrap_or_else(|e| {
        diagnostics::print_error(&e);
        return ExitCode::FAILURE;
    });
}
