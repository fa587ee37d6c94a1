use clap::{ArgAction, Parser, Subcommand};
use drawkit::completion::Shell;
use std::path::PathBuf;

use crate::state::{DEFAULT_GRID_SIZE, MAX_GRID_SIZE};

#[derive(Parser)]
#[command(name = "dots")]
#[command(author, version, about)]
#[command(long_about = "Connect the dots: draw colored edges between points of a grid.\n\n\
    Each edge line reads `COL,ROW COL,ROW COLOR`, e.g. `0,0 2,1 red`.\n\n\
    Examples:\n  \
    dots                          Open the editor on a 4x4 grid\n  \
    dots --size 10 --edges e.txt  Open with edges preloaded\n  \
    dots check e.txt --size 10    Validate an edge file\n  \
    dots export --size 10 --edges e.txt -o grid.png")]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Dots per row and column
    #[arg(long, default_value_t = DEFAULT_GRID_SIZE, value_parser = parse_grid_size)]
    pub size: usize,

    /// Canvas side length in pixels
    #[arg(long, default_value = "500")]
    pub canvas: f32,

    /// Background image drawn under the grid (path or URL)
    #[arg(long, default_value = "image.jpg")]
    pub background: String,

    /// Edge list file to preload and draw
    #[arg(long)]
    pub edges: Option<PathBuf>,

    /// Launch in a window instead of maximized
    #[arg(long)]
    pub windowed: bool,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate an edge list file against a grid size
    Check {
        /// Edge list file
        file: PathBuf,

        /// Dots per row and column
        #[arg(long, default_value_t = DEFAULT_GRID_SIZE, value_parser = parse_grid_size)]
        size: usize,
    },

    /// Render the grid and its edges to a PNG image
    Export {
        /// Dots per row and column
        #[arg(long, default_value_t = DEFAULT_GRID_SIZE, value_parser = parse_grid_size)]
        size: usize,

        /// Edge list file
        #[arg(long)]
        edges: Option<PathBuf>,

        /// Background image drawn under the grid (path or URL)
        #[arg(long)]
        background: Option<String>,

        /// Output PNG file
        #[arg(short, long, default_value = "dots.png")]
        output: PathBuf,

        /// Canvas side length in pixels
        #[arg(long, default_value = "500")]
        canvas: f32,
    },

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn parse_grid_size(value: &str) -> Result<usize, String> {
    let size: usize = value
        .parse()
        .map_err(|_| format!("`{value}` is not a grid size"))?;
    if size > MAX_GRID_SIZE {
        return Err(format!("grid size must be at most {MAX_GRID_SIZE}"));
    }
    Ok(size)
}

fn read_edges(file: Option<PathBuf>) -> anyhow::Result<Option<String>> {
    use anyhow::Context;
    file.map(|f| {
        std::fs::read_to_string(&f).with_context(|| format!("Failed to read {}", f.display()))
    })
    .transpose()
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Commands::Check { file, size }) => {
                if !file.exists() {
                    anyhow::bail!("File not found: {}", file.display());
                }
                crate::commands::check::run(&file, size)
            }
            Some(Commands::Export {
                size,
                edges,
                background,
                output,
                canvas,
            }) => crate::commands::export::run(size, read_edges(edges)?, background, output, canvas),
            Some(Commands::Completion { shell }) => {
                drawkit::completion::print::<Self>(shell, "dots");
                Ok(())
            }
            None => crate::app::run(crate::app::LaunchOptions {
                grid_size: self.size,
                canvas: self.canvas,
                background: self.background,
                edges: read_edges(self.edges)?,
                windowed: self.windowed,
            }),
        }
    }
}
