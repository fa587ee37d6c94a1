mod app;
mod cli;
mod color;
mod commands;
mod edges;
mod geometry;
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
