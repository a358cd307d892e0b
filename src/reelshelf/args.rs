use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "reelshelf")]
#[command(about = "Personal movie & series catalog", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Shared entry fields for add/edit.
#[derive(Args, Debug, Clone)]
pub struct EntryFields {
    /// Genre label
    #[arg(long)]
    pub genre: Option<String>,

    /// Personal rating, 0-10
    #[arg(short, long)]
    pub rating: Option<f32>,

    /// Mark as "Plan to Watch" instead of "Watched"
    #[arg(long)]
    pub planned: bool,

    /// Free-text notes
    #[arg(long)]
    pub notes: Option<String>,

    /// Content scores, each 0-5
    #[arg(long)]
    pub romance: Option<i32>,
    #[arg(long)]
    pub comedy: Option<i32>,
    #[arg(long)]
    pub action: Option<i32>,
    #[arg(long)]
    pub intimacy: Option<i32>,
    #[arg(long)]
    pub violence: Option<i32>,
    #[arg(long)]
    pub nudity: Option<i32>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum SortField {
    Added,
    Title,
    Year,
    Rating,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a movie
    #[command(alias = "m")]
    Movie {
        /// Title
        title: String,
        /// Release year
        year: i32,
        #[command(flatten)]
        fields: EntryFields,
    },

    /// Add a series
    #[command(alias = "s")]
    Series {
        /// Title
        title: String,
        /// Run, e.g. "2017-2020" or "2017" while airing
        years: String,
        /// Seasons count
        #[arg(long)]
        seasons: Option<i64>,
        /// Episodes watched
        #[arg(long)]
        episodes: Option<i64>,
        #[command(flatten)]
        fields: EntryFields,
    },

    /// List entries
    #[command(alias = "ls")]
    List {
        /// Only movies
        #[arg(long, conflicts_with = "series")]
        movies: bool,
        /// Only series
        #[arg(long)]
        series: bool,
        /// Filter by genre (exact, case-insensitive)
        #[arg(long)]
        genre: Option<String>,
        /// Only "Plan to Watch" entries
        #[arg(long, conflicts_with = "watched")]
        planned: bool,
        /// Only watched entries
        #[arg(long)]
        watched: bool,
        /// Only family-friendly entries
        #[arg(long)]
        family: bool,
        /// Minimum rating
        #[arg(long)]
        min_rating: Option<f32>,
        /// Sort order (presentation only)
        #[arg(long, value_enum, default_value_t = SortField::Added)]
        sort: SortField,
    },

    /// Search titles, genres and notes
    #[command(alias = "f")]
    Search {
        /// Search term
        term: String,
    },

    /// Edit an entry identified by title and year
    #[command(alias = "e")]
    Edit {
        /// Title of the entry to edit
        title: String,
        /// Year of the entry to edit (series: start year)
        year: i32,
        /// The entry is a series
        #[arg(long)]
        series: bool,
        /// Rename
        #[arg(long)]
        new_title: Option<String>,
        /// Change a movie's year
        #[arg(long)]
        new_year: Option<i32>,
        /// Change a series' run, e.g. "2017-2022"
        #[arg(long)]
        years: Option<String>,
        /// Seasons count
        #[arg(long)]
        seasons: Option<i64>,
        /// Episodes watched
        #[arg(long)]
        episodes: Option<i64>,
        /// Mark watched
        #[arg(long, conflicts_with = "planned")]
        watched: bool,
        #[command(flatten)]
        fields: EntryFields,
    },

    /// Delete an entry identified by title and year
    #[command(alias = "rm")]
    Delete {
        /// Title of the entry to delete
        title: String,
        /// Year of the entry to delete (series: start year)
        year: i32,
        /// The entry is a series
        #[arg(long)]
        series: bool,
    },

    /// Show catalog statistics
    Stats,

    /// Save the catalog (runs automatically after edits)
    Save,

    /// List backups
    Backups {
        /// Keep only the newest N backups
        #[arg(long)]
        prune: Option<usize>,
    },

    /// Export the catalog to a CSV file
    Export {
        /// Destination path
        path: PathBuf,
    },

    /// Import entries from a CSV file
    Import {
        /// Source path
        path: PathBuf,
        /// Replace the catalog instead of merging
        #[arg(long)]
        replace: bool,
    },

    /// Show the log file
    Logs {
        /// Only the last N lines
        #[arg(long)]
        lines: Option<usize>,
    },
}
