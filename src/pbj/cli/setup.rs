use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Log filter override, in `tracing_subscriber::EnvFilter` syntax.
pub const LOG_ENV: &str = "PBJ_LOG";

#[derive(Parser, Debug)]
#[command(
    name = "pbj",
    bin_name = "pbj",
    version,
    args_conflicts_with_subcommands = true
)]
#[command(
    about = "Change directories using mnemonics saved in a categorized list",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Category to list, or key/number to jump to in the current category
    pub target: Option<String>,

    /// Key or number to jump to within the category given first
    pub selector: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Save a directory under a new key (never overwrites)
    #[command(alias = "s")]
    Save {
        key: String,
        /// Directory to save (defaults to the current directory)
        path: Option<String>,
        /// Target category (defaults to the current category)
        #[arg(short = 'C', long)]
        category: Option<String>,
    },

    /// Save a directory under a key, replacing it if it exists
    #[command(alias = "c")]
    Replace {
        key: String,
        /// Directory to save (defaults to the current directory)
        path: Option<String>,
        /// Target category (defaults to the current category)
        #[arg(short = 'C', long)]
        category: Option<String>,
    },

    /// Remove a key
    #[command(alias = "r")]
    Rm {
        key: String,
        /// Category holding the key (defaults to the current category)
        #[arg(short = 'C', long)]
        category: Option<String>,
    },

    /// Remove a category and all of its keys
    #[command(alias = "rc")]
    Rmcat { category: String },

    /// Change the current category, optionally jumping to one of its keys
    #[command(alias = "cd")]
    Use {
        /// Category to switch to (prompts if omitted)
        category: Option<String>,
        /// Key or number to jump to in that category
        selector: Option<String>,
    },

    /// Change the default category
    Default {
        /// Category to make the default (prompts if omitted)
        category: Option<String>,
    },

    /// List a category (the current one if omitted)
    #[command(alias = "ls")]
    List { category: Option<String> },

    /// List all categories and their keys
    #[command(alias = "a")]
    All,

    /// Rename a category or a key of the current category
    Rename,

    /// Import key/directory pairs from a JSON file
    Import {
        file: std::path::PathBuf,
        /// Target category (defaults to the current category)
        #[arg(short = 'C', long)]
        category: Option<String>,
    },

    /// Show the configuration, or a single config key
    Config { key: Option<String> },
}

/// Installs the stderr log subscriber. `PBJ_LOG` wins over `--verbose`.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
