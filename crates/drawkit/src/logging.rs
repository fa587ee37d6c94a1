//! Console diagnostics for both binaries, written to stderr through `tracing`.
//!
//! `-q` keeps only warnings and errors, the default adds info, `-v` adds
//! debug and `-vv` adds trace.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::FmtSubscriber;

/// Filter implied by the global `--verbose` count and `--quiet` flag.
pub fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::WARN;
    }
    match verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Install the global subscriber. `no_color` also turns off `colored` report output.
pub fn init(verbose: u8, quiet: bool, no_color: bool) {
    if no_color {
        colored::control::set_override(false);
    }
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level_for(verbose, quiet))
        .with_ansi(!no_color)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
