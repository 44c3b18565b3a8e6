//! OxiHuff CLI - Huffman compression from the command line
//!
//! Compresses files into self-describing `.hf` streams and restores them.

mod commands;
mod utils;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use commands::{TransformOptions, cmd_compress, cmd_decompress, cmd_info, cmd_test};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "oxihuff")]
#[command(author, version, about = "Pure Rust Huffman compression")]
#[command(long_about = "
OxiHuff compresses files with a Huffman code built from each file's own byte
histogram. The code tree travels in the output header, so every .hf file
decompresses on its own.

Examples:
  oxihuff compress notes.txt
  oxihuff compress -v *.log
  oxihuff decompress notes.txt.hf
  oxihuff decompress data.hf -o data.bin --force
  oxihuff test *.hf
  oxihuff info notes.txt.hf --json
")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short = 'v', long = "log-level", action = clap::ArgAction::Count, global = true)]
    log_level: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress files into .hf streams
    #[command(alias = "c")]
    Compress {
        /// Files to compress
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output file (single input only; default: <file>.hf)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite existing output files
        #[arg(short, long)]
        force: bool,

        /// Print per-file statistics
        #[arg(short = 's', long)]
        stats: bool,
    },

    /// Decompress .hf streams
    #[command(alias = "x")]
    Decompress {
        /// Files to decompress
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output file (single input only; default: strip .hf or append .uhf)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite existing output files
        #[arg(short, long)]
        force: bool,

        /// Print per-file statistics
        #[arg(short = 's', long)]
        stats: bool,

        /// Refuse to produce more than this many bytes per file
        #[arg(long)]
        max_output: Option<u64>,
    },

    /// Test stream integrity without writing output
    #[command(alias = "t")]
    Test {
        /// Files to test
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Show decoded sizes
        #[arg(short = 's', long)]
        stats: bool,

        /// Refuse to produce more than this many bytes per file
        #[arg(long)]
        max_output: Option<u64>,
    },

    /// Show the header of a compressed stream
    #[command(alias = "i")]
    Info {
        /// Compressed file to inspect
        file: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_logging(level: u8) {
    let default = match level {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    let result = match cli.command {
        Commands::Compress {
            files,
            output,
            force,
            stats,
        } => cmd_compress(
            &files,
            &TransformOptions {
                output: output.as_deref(),
                force,
                verbose: stats || cli.log_level > 0,
            },
        ),
        Commands::Decompress {
            files,
            output,
            force,
            stats,
            max_output,
        } => cmd_decompress(
            &files,
            &TransformOptions {
                output: output.as_deref(),
                force,
                verbose: stats || cli.log_level > 0,
            },
            max_output,
        ),
        Commands::Test {
            files,
            stats,
            max_output,
        } => cmd_test(&files, stats || cli.log_level > 0, max_output),
        Commands::Info { file, json } => cmd_info(&file, json),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "oxihuff", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_decompress() {
        let cli = Cli::try_parse_from([
            "oxihuff",
            "-vv",
            "x",
            "a.hf",
            "b.hf",
            "--max-output",
            "1024",
        ])
        .unwrap();

        assert_eq!(cli.log_level, 2);
        match cli.command {
            Commands::Decompress {
                files, max_output, ..
            } => {
                assert_eq!(files.len(), 2);
                assert_eq!(max_output, Some(1024));
            }
            _ => panic!("expected decompress"),
        }
    }

    #[test]
    fn test_compress_requires_files() {
        assert!(Cli::try_parse_from(["oxihuff", "compress"]).is_err());
    }
}
