//! Doctree CLI
//!
//! Parses documentation comments and prints their trees

mod commands;

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use doctree_core::init_tracing;
use tracing::error;

#[derive(Parser)]
#[command(name = "doctree")]
#[command(about = "Inspect position-tracked documentation comment trees")]
#[command(version = doctree_core::VERSION)]
#[command(
    long_about = "doctree parses documentation comments and prints the resulting tree,\n\
with the source position of every node.\n\
\n\
Examples:\n  \
doctree parse Foo.javadoc            # Print the tree of a comment\n  \
doctree parse --format json -        # Read stdin, print JSON\n  \
doctree first-sentence Foo.javadoc   # Print only the summary sentence"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(
        short,
        long,
        global = true,
        help = "Path to configuration file (doctree.toml/.doctreerc.json)"
    )]
    config: Option<PathBuf>,

    /// Verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a comment and print its tree and any diagnostics
    Parse {
        /// Comment file, or `-` for stdin
        #[arg(help = "Comment file to parse (`-` reads stdin)")]
        input: PathBuf,

        /// File offset of the first input byte
        #[arg(long, default_value_t = 0, help = "Offset added to every reported position")]
        offset: u32,

        /// Treat the body as Markdown
        #[arg(long, help = "Parse the body as Markdown instead of HTML")]
        markdown: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Print only the first sentence of a comment
    FirstSentence {
        /// Comment file, or `-` for stdin
        #[arg(help = "Comment file to read (`-` reads stdin)")]
        input: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Indented tree with positions
    Text,
    /// JSON document
    Json,
}

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "doctree=warn",
        1 => "doctree=info",
        2 => "doctree=debug",
        _ => "doctree=trace",
    };
    unsafe {
        std::env::set_var("RUST_LOG", log_level);
    }
    init_tracing();

    if let Err(e) = run_command(cli) {
        error!("doctree failed: {:#}", e);
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Parse {
            input,
            offset,
            markdown,
            format,
        }) => commands::parse_command(&input, offset, markdown, format, cli.config.as_deref()),

        Some(Commands::FirstSentence { input }) => {
            commands::first_sentence_command(&input, cli.config.as_deref())
        }

        None => {
            let mut cmd = Cli::command();
            cmd.print_help()?;
            Ok(())
        }
    }
}
