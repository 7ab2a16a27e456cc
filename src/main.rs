//! # beodata-align CLI (`beo-align`)
//!
//! Merges a tokenized stream into an existing N-way edition alignment.
//!
//! ## Usage
//!
//! ```bash
//! beo-align --config ./config/beo-align.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `beo-align align` | Write the alignment with the token stream appended as a new edition |
//! | `beo-align check` | Validate both inputs and dry-run the merge |
//! | `beo-align export` | Write the merged alignment as JSON, with token annotations |
//!
//! Logging goes to stderr; set `RUST_LOG` or pass `--verbose`.

use beodata_align::{align_cmd, check, config, export};

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// beodata-align — extend a verse-edition alignment with a tokenized edition.
#[derive(Parser)]
#[command(
    name = "beo-align",
    about = "beodata-align — extend a verse-edition alignment with a tokenized edition",
    version,
    long_about = "Walks a pre-existing N-way alignment of verse editions and a fine-grained, \
    annotated token stream in parallel, attributing zero, one or many tokens to every aligned \
    row, and writes the alignment back out with the token stream as an extra edition."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/beo-align.toml`. If the file does not exist,
    /// built-in defaults are used and inputs can be given as flags.
    #[arg(long, global = true, default_value = "./config/beo-align.toml")]
    config: PathBuf,

    /// Log at debug level (lists every skipped line).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Flags shared by every command that reads the inputs.
#[derive(Args)]
struct InputArgs {
    /// Tokenized stream (pipe-delimited, 18 fields per record).
    #[arg(long)]
    tokens: Option<PathBuf>,

    /// Aligned corpus (space-separated ids then texts).
    #[arg(long)]
    aligned: Option<PathBuf>,

    /// Number of editions in the aligned corpus.
    #[arg(long)]
    editions: Option<usize>,

    /// Fail on the first malformed line instead of skipping it.
    #[arg(long)]
    strict: bool,
}

impl InputArgs {
    fn overrides(self, output: Option<PathBuf>) -> config::Overrides {
        config::Overrides {
            tokens: self.tokens,
            aligned: self.aligned,
            editions: self.editions,
            output,
            strict: self.strict,
        }
    }
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Align the token stream against the aligned corpus.
    ///
    /// Writes one line per aligned row: the original edition ids, the new
    /// edition id, the original texts, then the new edition text.
    Align {
        #[command(flatten)]
        inputs: InputArgs,

        /// Output path, or `-` for stdout. Overrides `[output].path`.
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Validate both inputs without writing output.
    ///
    /// Reports record counts, malformed lines, ordering problems and how
    /// many tokens the merge would leave unclaimed.
    Check {
        #[command(flatten)]
        inputs: InputArgs,
    },

    /// Export the merged alignment as JSON.
    ///
    /// Each row carries all edition ids and texts plus the claimed tokens
    /// with lemma, part of speech, inflection and gloss.
    Export {
        #[command(flatten)]
        inputs: InputArgs,

        /// Write to this file instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let base = config::load_or_minimal(&cli.config)?;

    match cli.command {
        Commands::Align { inputs, output } => {
            let cfg = base.apply(inputs.overrides(output))?;
            align_cmd::run_align(&cfg).await?;
        }
        Commands::Check { inputs } => {
            let cfg = base.apply(inputs.overrides(None))?;
            check::run_check(&cfg).await?;
        }
        Commands::Export { inputs, output } => {
            let cfg = base.apply(inputs.overrides(None))?;
            export::run_export(&cfg, output.as_deref()).await?;
        }
    }

    Ok(())
}
