//! Main CLI application structure

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{docs, gen, graph_cmd, tasks};
use crate::config::{Config, DefaultFormat};

#[derive(Parser)]
#[command(name = "tkn-graph")]
#[command(author, version, about = "Inspect Tekton YAML: documents, pipeline tasks and dependency graphs")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured format)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check whether a file contains Tekton resources
    ///
    /// Exits 0 when at least one recognized document exists, 1 otherwise.
    Detect {
        /// Input file, or - for stdin
        input: String,
    },

    /// List the Tekton documents in a file
    Docs {
        /// Input file, or - for stdin
        input: String,

        /// Only documents of this kind (exact-case, e.g. Pipeline)
        #[arg(long)]
        kind: Option<String>,
    },

    /// List the task entries of a pipeline
    Tasks {
        /// Input file, or - for stdin
        input: String,

        /// Pipeline name when the file holds several
        #[arg(long)]
        pipeline: Option<String>,
    },

    /// Show a pipeline's declared resources, workspaces and params
    Resources {
        /// Input file, or - for stdin
        input: String,

        /// Pipeline name when the file holds several
        #[arg(long)]
        pipeline: Option<String>,
    },

    /// Emit a pipeline's task dependency graph
    Graph {
        /// Input file, or - for stdin
        input: String,

        /// Pipeline name when the file holds several
        #[arg(long)]
        pipeline: Option<String>,

        /// Graphviz DOT instead of the default output
        #[arg(long)]
        dot: bool,
    },

    /// Generate resource skeletons
    #[command(subcommand)]
    Gen(gen::GenCommands),
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    let format = cli.format.unwrap_or(match config.output.format {
        DefaultFormat::Text => OutputFormat::Text,
        DefaultFormat::Json => OutputFormat::Json,
    });
    let output = Output::new(format, cli.verbose);

    output.verbose("tkn-graph starting");

    match cli.command {
        Commands::Detect { input } => {
            let found = docs::detect(&output, &input)?;
            if !found {
                std::process::exit(1);
            }
        }

        Commands::Docs { input, kind } => {
            docs::list(&output, &input, kind.as_deref())?;
        }

        Commands::Tasks { input, pipeline } => {
            tasks::tasks(&output, &input, pipeline.as_deref())?;
        }

        Commands::Resources { input, pipeline } => {
            tasks::resources(&output, &input, pipeline.as_deref())?;
        }

        Commands::Graph {
            input,
            pipeline,
            dot,
        } => {
            graph_cmd::run(&output, &input, pipeline.as_deref(), dot, &config.dot)?;
        }

        Commands::Gen(cmd) => gen::run(cmd, &output)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}
