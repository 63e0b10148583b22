#[cfg(all(feature = "mimalloc", not(target_family = "wasm")))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::fs::File;
use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use env_logger::Env;

mod list;
mod profiling;
mod theme;
mod tui;

#[derive(Parser)]
#[command(name = "menufind")]
#[command(about = "Find a restaurant and filter its menu by item or ingredient", long_about = None)]
#[command(version)]
struct Cli {
    /// Catalog directory containing index.json and one file per restaurant
    #[arg(long, global = true, value_name = "DIR", default_value = "data")]
    data: PathBuf,

    /// Enable debug logging
    #[arg(short = 'd', long = "debug", global = true, hide = true)]
    debug: bool,

    /// Write log output to a file instead of stderr
    #[arg(long = "log-file", global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Write a Chrome trace of search and filter work to the specified path.
    /// View with chrome://tracing or https://ui.perfetto.dev/
    #[arg(long = "profile", global = true, value_name = "PATH", hide = true)]
    profile: Option<PathBuf>,

    /// Without a command, start the interactive search
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List restaurants whose name contains a query
    #[command(alias = "s")]
    Suggest(list::SuggestArgs),

    /// Show a restaurant's menu, optionally filtered
    #[command(alias = "m")]
    Menu(list::MenuArgs),

    /// Load the catalog and report what it contains
    Check,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {e}", "Error:".red());
        for cause in e.chain().skip(1) {
            eprintln!("  {cause}");
        }
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Default level depends on --debug; RUST_LOG overrides either way
    let env = if cli.debug {
        Env::default().default_filter_or("debug")
    } else {
        Env::default().default_filter_or("error")
    };
    let mut logger = env_logger::Builder::from_env(env);
    if let Some(path) = &cli.log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        logger.target(env_logger::Target::Pipe(Box::new(file)));
    }
    logger.init();

    let _trace_guard = profiling::start(cli.profile);

    match cli.command {
        Some(Commands::Suggest(args)) => list::suggest(&cli.data, args),
        Some(Commands::Menu(args)) => list::menu(&cli.data, args),
        Some(Commands::Check) => list::check(&cli.data),
        None => {
            if !(std::io::stdin().is_terminal() && std::io::stdout().is_terminal()) {
                anyhow::bail!(
                    "Interactive search needs a terminal; use `menufind suggest` or `menufind menu` instead"
                );
            }
            tui::run(cli.data)
        }
    }
}
