//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod catalog;
mod config_cmd;
mod history;
mod search;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use covid_search::{Config, Settings};

#[derive(Parser)]
#[command(name = "covid-search")]
#[command(about = "Search Twitter for COVID-19 relief leads in your city")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true, env = "COVID_SEARCH_CONFIG")]
    config: Option<PathBuf>,

    /// Directory for local state (search history)
    #[arg(long, global = true, env = "COVID_SEARCH_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

/// Flags that adjust the session's default selection.
#[derive(Args, Debug, Clone, Default)]
pub struct SelectionArgs {
    /// Include an extra word (repeatable)
    #[arg(short, long = "add", value_name = "WORD")]
    pub add: Vec<String>,

    /// Stop including a word (repeatable)
    #[arg(short, long = "drop", value_name = "WORD")]
    pub drop: Vec<String>,

    /// Start without the default include words
    #[arg(long)]
    pub no_defaults: bool,

    /// Extra words to exclude, comma separated
    #[arg(short, long, value_name = "WORDS")]
    pub exclude: Option<String>,

    /// Show all tweets, not only ones mentioning "verified"
    #[arg(long)]
    pub all_posts: bool,

    /// Keep tweets asking for help ("required", "need", "want")
    #[arg(long)]
    pub include_requests: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the search for a city and open it in the browser
    Search {
        /// City to search in
        city: Option<String>,
        #[command(flatten)]
        selection: SelectionArgs,
        /// Print the URL instead of opening the browser
        #[arg(short, long)]
        print: bool,
        /// Do not save this search to history
        #[arg(long)]
        no_history: bool,
    },

    /// Print the query and URL without opening or recording anything
    Query {
        /// City to search in
        city: Option<String>,
        #[command(flatten)]
        selection: SelectionArgs,
        /// Print one query per preset city
        #[arg(long, conflicts_with = "city")]
        all_cities: bool,
    },

    /// Pick a preset city by name or number
    Pick {
        /// City name (case-insensitive) or 1-based index from `cities`
        city: String,
        #[command(flatten)]
        selection: SelectionArgs,
        /// Print the URL instead of opening the browser
        #[arg(short, long)]
        print: bool,
    },

    /// Show recent searches
    History {
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Show at most this many records
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Show active include words and suggestions
    Words {
        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// List preset cities
    Cities,

    /// Show project links
    About,

    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
    /// Print the config file location
    Path,
    /// Write the default configuration to the config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Run the CLI.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone();
    let load_config = || Config::load(config_path.as_deref());
    let settings = match cli.data_dir {
        Some(dir) => Settings::with_data_dir(dir),
        None => Settings::default(),
    };

    match cli.command {
        Commands::Search {
            city,
            selection,
            print,
            no_history,
        } => search::cmd_search(
            &settings,
            load_config()?,
            city.as_deref(),
            &selection,
            print,
            no_history,
        ),
        Commands::Query {
            city,
            selection,
            all_cities,
        } => search::cmd_query(load_config()?, city.as_deref(), &selection, all_cities),
        Commands::Pick {
            city,
            selection,
            print,
        } => search::cmd_pick(&settings, load_config()?, &city, &selection, print),
        Commands::History { json, limit } => history::cmd_history(&settings, json, limit),
        Commands::Words { selection } => catalog::cmd_words(load_config()?, &selection),
        Commands::Cities => catalog::cmd_cities(&load_config()?),
        Commands::About => catalog::cmd_about(&load_config()?),
        Commands::Config { command } => match command {
            ConfigCommands::Show => config_cmd::cmd_config_show(&load_config()?),
            // These work before a config file exists.
            ConfigCommands::Path => config_cmd::cmd_config_path(cli.config.as_deref()),
            ConfigCommands::Init { force } => {
                config_cmd::cmd_config_init(cli.config.as_deref(), force)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_search_flags() {
        let cli = Cli::try_parse_from([
            "covid-search",
            "search",
            "Pune",
            "--add",
            "Plasma",
            "-a",
            "ICU",
            "--drop",
            "Beds",
            "--exclude",
            "sold,fake",
            "--all-posts",
            "--print",
        ])
        .unwrap();

        match cli.command {
            Commands::Search {
                city,
                selection,
                print,
                no_history,
            } => {
                assert_eq!(city.as_deref(), Some("Pune"));
                assert_eq!(selection.add, vec!["Plasma", "ICU"]);
                assert_eq!(selection.drop, vec!["Beds"]);
                assert_eq!(selection.exclude.as_deref(), Some("sold,fake"));
                assert!(selection.all_posts);
                assert!(!selection.include_requests);
                assert!(print);
                assert!(!no_history);
            }
            _ => panic!("expected search command"),
        }
    }

    #[test]
    fn all_cities_conflicts_with_city() {
        assert!(Cli::try_parse_from(["covid-search", "query", "Pune", "--all-cities"]).is_err());
    }
}
