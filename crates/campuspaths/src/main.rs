mod app;
mod cli;
mod client;
mod commands;
mod config;
mod model;
mod render;
mod state;

use clap::Parser;

fn main() {
    let cli = cli::Cli::parse();
    drawkit::logging::init(cli.verbose, cli.quiet, cli.no_color);

    if let Err(e) = cli.run() {
        tracing::error!("{e:#}");
        std::process::exit(1);
    }
}
