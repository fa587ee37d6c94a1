use clap::{ArgAction, Parser, Subcommand};
use drawkit::completion::Shell;

use crate::client::Client;
use crate::config::Config;

#[derive(Parser)]
#[command(name = "campuspaths")]
#[command(author, version, about)]
#[command(long_about = "Campus path viewer.\n\n\
    Pick a START and an END building and the shortest walking route is drawn\n\
    on the campus map. Paths come from a pathfinding service over HTTP.\n\n\
    Examples:\n  \
    campuspaths                              Open the map viewer\n  \
    campuspaths --server http://host:4567    Use another service\n  \
    campuspaths buildings                    List known buildings\n  \
    campuspaths route CSE KNE                Print the route between two buildings\n  \
    campuspaths config set assets.campus_map ~/maps/campus.jpg")]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Base URL of the pathfinding service (overrides the config file)
    #[arg(long, global = true)]
    pub server: Option<String>,

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
    /// List the buildings known to the service
    Buildings,

    /// Print the shortest path between two buildings
    Route {
        /// Short name of the start building
        start: String,

        /// Short name of the end building
        end: String,
    },

    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. server.base_url, assets.campus_map)
        key: String,

        /// Value to set
        value: String,
    },
}

impl Cli {
    fn base_url(&self, config: &Config) -> String {
        self.server
            .clone()
            .unwrap_or_else(|| config.base_url().to_string())
    }

    pub fn run(self) -> anyhow::Result<()> {
        let config = Config::load_or_default();
        let base_url = self.base_url(&config);

        match self.command {
            Some(Commands::Buildings) => crate::commands::buildings::run(&Client::new(&base_url)),
            Some(Commands::Route { start, end }) => {
                crate::commands::route::run(&Client::new(&base_url), &start, &end)
            }
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Completion { shell }) => {
                drawkit::completion::print::<Self>(shell, "campuspaths");
                Ok(())
            }
            None => crate::app::run(crate::app::LaunchOptions {
                base_url,
                campus_map: config.campus_map().to_string(),
                start_marker: config.start_marker().to_string(),
                destination_marker: config.destination_marker().to_string(),
                windowed: self.windowed,
            }),
        }
    }
}
