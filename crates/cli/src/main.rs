mod commands;

use clap::{CommandFactory, Parser};
use clap_complete::{Shell, generate};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "purge-kit")]
#[command(version, about = "Purge files from Cloudflare's cache on every configured domain", long_about = None)]
struct Cli {
    /// Config file (default: ~/.purge-kit/config.toml)
    #[arg(short, long, global = true, env = "PURGE_KIT_CONFIG")]
    config: Option<PathBuf>,

    /// Log each purge request
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Purge files from the cache of every configured domain
    ///
    /// Requests go out one domain at a time and stop at the first failure.
    Purge {
        /// Paths to purge, relative to each domain's base URL
        #[arg(required = true)]
        paths: Vec<String>,

        /// Only purge on these domains (repeatable)
        #[arg(short, long = "domain")]
        domains: Vec<String>,

        /// Treat any 200 as success without checking the response body
        #[arg(long)]
        status_only: bool,
    },

    /// List configured domains
    Domains,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Purge {
            paths,
            domains,
            status_only,
        } => commands::purge::run(cli.config, paths, domains, status_only).await,
        Command::Domains => commands::domains::run(cli.config).await,
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "purge-kit", &mut io::stdout());
            Ok(())
        }
    }
}
