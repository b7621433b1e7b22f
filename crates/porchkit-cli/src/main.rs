//! Porchkit CLI - inspect, edit and diff configuration packages

use clap::{Parser, Subcommand};
use miette::Result;
use std::path::PathBuf;

mod commands;
mod error;
mod exit_codes;
mod store;

#[derive(Parser)]
#[command(name = "porchkit")]
#[command(author = "Porchkit Contributors")]
#[command(version)]
#[command(about = "Inspect, edit and diff the resources of configuration packages", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,

    /// Package layout file (default: <package>/.porchkit.yaml if present)
    #[arg(long, global = true)]
    layout: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the resources of a package
    Resources {
        /// Package path
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Only resources of this kind
        #[arg(short, long)]
        kind: Option<String>,

        /// Hide local-config resources
        #[arg(long)]
        deployable: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the package manifest
    Manifest {
        /// Package path
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Compare two snapshots of a package
    Diff {
        /// Original package path
        original: PathBuf,

        /// Current package path
        current: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Show line diffs of changed resources
        #[arg(long)]
        show_diff: bool,

        /// Exit with status 2 when the snapshots differ
        #[arg(long)]
        exit_code: bool,
    },

    /// Add the documents of a YAML file as new resources
    Add {
        /// Package path
        path: PathBuf,

        /// YAML file holding one or more documents
        file: PathBuf,

        /// Target file inside the package (allocated from the kind if unset)
        #[arg(long)]
        filename: Option<String>,

        /// Target directory inside the package
        #[arg(long)]
        component: Option<String>,
    },

    /// Remove resources by id
    Remove {
        /// Package path
        path: PathBuf,

        /// Resource ids (as listed by `porchkit resources`)
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("PORCHKIT_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    // Setup miette for nice error display
    miette::set_panic_hook();

    let cli = Cli::parse();
    init_tracing(cli.debug);

    let layout = cli.layout.as_deref();

    let outcome = match cli.command {
        Commands::Resources {
            path,
            kind,
            deployable,
            json,
        } => commands::resources::run(&path, layout, kind.as_deref(), deployable, json),

        Commands::Manifest { path } => commands::manifest::run(&path, layout),

        Commands::Diff {
            original,
            current,
            json,
            show_diff,
            exit_code,
        } => commands::diff::run(&original, &current, layout, json, show_diff, exit_code),

        Commands::Add {
            path,
            file,
            filename,
            component,
        } => commands::add::run(
            &path,
            layout,
            &file,
            filename.as_deref(),
            component.as_deref(),
        ),

        Commands::Remove { path, ids } => commands::remove::run(&path, layout, &ids),
    };

    match outcome {
        Ok(exit_codes::SUCCESS) => Ok(()),
        Ok(code) => std::process::exit(code),
        Err(err) => {
            let code = err.exit_code();
            eprintln!("{:?}", miette::Report::new(err));
            std::process::exit(code);
        }
    }
}
