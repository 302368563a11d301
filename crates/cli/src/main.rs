mod cli;
mod pipeline;

use std::path::{Path, PathBuf};
use std::process;

use clap::{CommandFactory, Parser};

use cli::{Cli, Commands};

fn main() {
    // A bare `help` in any casing behaves like --help.
    let mut args = std::env::args();
    if let Some(first) = args.nth(1) {
        if first.eq_ignore_ascii_case("help") {
            let _ = Cli::command().print_help();
            process::exit(0);
        }
    }

    let cli = Cli::parse();
    let dictionary = cli.dictionary.clone();
    let dictionary = dictionary.as_deref();

    let code = match cli.command {
        Commands::Transpile { file } => {
            with_file("transpile", file, |file| {
                pipeline::transpile_file(file, dictionary)
            })
        }
        Commands::Build { file } => {
            with_file("build", file, |file| pipeline::build_file(file, dictionary))
        }
        Commands::Run { file, args } => with_file("run", file, |file| {
            pipeline::run_file(file, dictionary, &args)
        }),
        Commands::Fmt { file } => {
            with_file("fmt", file, |file| pipeline::format_file(file, dictionary))
        }
    };

    process::exit(code);
}

/// Subcommands need their file argument. A file argument spelling `help`
/// in any casing prints the subcommand's usage instead; a missing one
/// prints usage to stdout, an error to stderr, and fails.
fn with_file(subcommand: &str, file: Option<PathBuf>, run: impl FnOnce(&Path) -> i32) -> i32 {
    match file {
        Some(path) if is_help_arg(&path) => {
            print_subcommand_help(subcommand);
            0
        }
        Some(path) => run(&path),
        None => {
            let _ = Cli::command().print_help();
            eprintln!("\nError: missing input file");
            1
        }
    }
}

fn is_help_arg(path: &Path) -> bool {
    path.to_str()
        .is_some_and(|arg| arg.eq_ignore_ascii_case("help") || arg == "-h" || arg == "--help")
}

fn print_subcommand_help(name: &str) {
    let mut command = Cli::command();
    match command.find_subcommand_mut(name) {
        Some(subcommand) => {
            let _ = subcommand.print_help();
        }
        None => {
            let _ = command.print_help();
        }
    }
}
