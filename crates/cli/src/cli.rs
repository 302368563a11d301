//! Command-line interface definition.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Singlish - a Singlish to Go source-to-source translator
#[derive(Parser)]
#[command(name = "singlish")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a dictionary file (overrides SINGLISH_KEYWORDS)
    #[arg(long, global = true, value_name = "PATH")]
    pub dictionary: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Transpile a file and print the path of the generated Go source
    Transpile {
        /// Path to the Singlish file
        file: Option<PathBuf>,
    },

    /// Transpile and build a binary named after the input file
    Build {
        /// Path to the Singlish file
        file: Option<PathBuf>,
    },

    /// Transpile and run, forwarding stdin and stdout
    Run {
        /// Path to the Singlish file
        file: Option<PathBuf>,

        /// Arguments passed through to the program
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Rewrite a file in canonical surface form
    Fmt {
        /// Path to the Singlish file
        file: Option<PathBuf>,
    },
}
