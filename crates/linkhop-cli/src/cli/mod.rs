//! CLI for linkhop.

mod commands;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use linkhop_core::TransportKind;

use commands::{run_completions, run_man, run_resolve, run_serve, ResolveArgs, ServeArgs};

/// Top-level CLI for linkhop.
#[derive(Debug, Parser)]
#[command(name = "linkhop")]
#[command(about = "linkhop: follow HTTP redirect chains to their canonical URL", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Probe transport, as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TransportArg {
    /// libcurl HEAD requests (http and https).
    Curl,
    /// Hand-written HTTP/1.1 over a plain TCP socket (http only).
    Socket,
}

impl From<TransportArg> for TransportKind {
    fn from(arg: TransportArg) -> Self {
        match arg {
            TransportArg::Curl => TransportKind::Curl,
            TransportArg::Socket => TransportKind::Socket,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Resolve a URL through its redirect chain and print the canonical URL.
    Resolve {
        /// Seed URL (defaults to `seed_url` from the config).
        url: Option<String>,
        /// Suffix appended to the resolved URL.
        #[arg(long)]
        link: Option<String>,
        /// Override the configured transport.
        #[arg(long, value_enum)]
        transport: Option<TransportArg>,
        /// Override the configured redirect bound.
        #[arg(long, value_name = "N")]
        max_hops: Option<u32>,
        /// Print every hop before the result.
        #[arg(long)]
        trace: bool,
        /// Print the full resolution as JSON.
        #[arg(long, conflicts_with = "trace")]
        json: bool,
    },

    /// Serve the forwarding endpoint (`GET /?link=...`).
    Serve {
        /// Listen address, e.g. 0.0.0.0:8080.
        #[arg(long, value_name = "ADDR")]
        listen: Option<String>,
        /// Seed URL to resolve on each request.
        #[arg(long, value_name = "URL")]
        seed: Option<String>,
        /// Override the configured transport.
        #[arg(long, value_enum)]
        transport: Option<TransportArg>,
    },

    /// Print shell completions to stdout.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Print the man page to stdout.
    Man,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Resolve {
                url,
                link,
                transport,
                max_hops,
                trace,
                json,
            } => {
                let args = ResolveArgs {
                    url,
                    link,
                    transport: transport.map(Into::into),
                    max_hops,
                    trace,
                    json,
                };
                run_resolve(args).await?
            }
            CliCommand::Serve {
                listen,
                seed,
                transport,
            } => {
                let args = ServeArgs {
                    listen,
                    seed,
                    transport: transport.map(Into::into),
                };
                run_serve(args).await?
            }
            CliCommand::Completions { shell } => run_completions(shell, &mut Cli::command())?,
            CliCommand::Man => run_man(Cli::command())?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
