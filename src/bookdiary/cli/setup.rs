use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Returns the version string, including the git hash for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{}", VERSION, GIT_HASH)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "bookdiary", bin_name = "bookdiary", version = get_version())]
#[command(about = "Keep track of your books and a reading diary for each", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Library file (overrides BOOKDIARY_DATA_FILE and the config file)
    #[arg(long, global = true, value_name = "PATH")]
    pub data_file: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage books
    #[command(subcommand)]
    #[command(alias = "b")]
    Book(BookCommands),

    /// Manage reading diary entries
    #[command(subcommand)]
    #[command(alias = "d")]
    Diary(DiaryCommands),

    /// Get or set configuration
    Config {
        /// Configuration key (e.g., data-file)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,

        /// Remove the key from the config file
        #[arg(long, conflicts_with = "value")]
        unset: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum BookCommands {
    /// Add a book
    #[command(alias = "n")]
    Add {
        title: String,
        author: String,
        /// Year of publication
        #[arg(allow_hyphen_values = true)]
        year: String,
        #[arg(long, default_value = "")]
        genre: String,
        #[arg(long, default_value = "")]
        memo: String,
    },

    /// List books, optionally filtered by a search term
    #[command(alias = "ls")]
    List {
        /// Matches title, author, genre or memo (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show one book
    #[command(alias = "v")]
    Show {
        /// Book id or unique id prefix
        id: String,
    },

    /// Change fields of a book
    #[command(alias = "e")]
    Edit {
        /// Book id or unique id prefix
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        author: Option<String>,
        #[arg(long)]
        year: Option<String>,
        #[arg(long)]
        genre: Option<String>,
        #[arg(long)]
        memo: Option<String>,
    },

    /// Delete a book and all of its diary entries
    #[command(alias = "rm")]
    Delete {
        /// Book id or unique id prefix
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum DiaryCommands {
    /// Write a diary entry for a book
    #[command(alias = "n")]
    Add {
        /// Book id or unique id prefix
        book: String,
        content: String,
        /// Entry date, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// List a book's diary entries, newest first
    #[command(alias = "ls")]
    List {
        /// Book id or unique id prefix
        book: String,
        /// Matches entry content (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show one diary entry
    #[command(alias = "v")]
    Show {
        /// Diary entry id or unique id prefix
        id: String,
    },

    /// Change a diary entry
    #[command(alias = "e")]
    Edit {
        /// Diary entry id or unique id prefix
        id: String,
        #[arg(long)]
        content: Option<String>,
        /// New date, YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,
    },

    /// Delete a diary entry
    #[command(alias = "rm")]
    Delete {
        /// Diary entry id or unique id prefix
        id: String,
    },
}

/// Installs the stderr log subscriber. `RUST_LOG` wins over `--verbose`.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "bookdiary=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
