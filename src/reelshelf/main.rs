use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use reelshelf::api::ShelfApi;
use reelshelf::commands::list::SortBy;
use reelshelf::commands::update::EntryPatch;
use reelshelf::commands::{CmdMessage, MessageLevel};
use reelshelf::config::ShelfConfig;
use reelshelf::error::{Result, ShelfError};
use reelshelf::model::{Entry, EntryKey, EntryKind, WatchStatus, SCORE_DIMENSIONS};
use reelshelf::store::{CatalogStats, EntryFilter};
use reelshelf::validate::{DraftKind, DraftScores, EntryDraft};
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Arc;
use unicode_width::UnicodeWidthStr;

mod args;
use args::{Cli, Commands, EntryFields, SortField};

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {}", "Error:".red(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let base_dir = resolve_base_dir()?;
    let config = ShelfConfig::load(&base_dir).unwrap_or_default();
    init_logging(&config, &base_dir, cli.verbose);

    tracing::info!(data_dir = %base_dir.display(), "reelshelf starting");
    let mut api = ShelfApi::open(&base_dir, &config)?;

    let outcome = match cli.command {
        Some(Commands::Movie {
            title,
            year,
            fields,
        }) => handle_add(&mut api, movie_draft(title, year, &fields)),
        Some(Commands::Series {
            title,
            years,
            seasons,
            episodes,
            fields,
        }) => handle_add(&mut api, series_draft(title, years, seasons, episodes, &fields)),
        Some(Commands::List {
            movies,
            series,
            genre,
            planned,
            watched,
            family,
            min_rating,
            sort,
        }) => {
            let filter = EntryFilter {
                kind: match (movies, series) {
                    (true, _) => Some(EntryKind::Movie),
                    (_, true) => Some(EntryKind::Series),
                    _ => None,
                },
                genre,
                status: match (watched, planned) {
                    (true, _) => Some(WatchStatus::Watched),
                    (_, true) => Some(WatchStatus::PlanToWatch),
                    _ => None,
                },
                family_friendly: family.then_some(true),
                min_rating,
                ..Default::default()
            };
            let result = api.list(&filter, sort_by(sort))?;
            print_entries(&result.listed);
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Search { term }) => {
            let result = api.search(&term)?;
            print_entries(&result.listed);
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Edit {
            title,
            year,
            series,
            new_title,
            new_year,
            years,
            seasons,
            episodes,
            watched,
            fields,
        }) => {
            let key = entry_key(&title, year, series);
            let patch = EntryPatch {
                title: new_title,
                year: new_year,
                genre: fields.genre.clone(),
                rating: fields.rating,
                status: match (watched, fields.planned) {
                    (true, _) => Some(WatchStatus::Watched),
                    (_, true) => Some(WatchStatus::PlanToWatch),
                    _ => None,
                },
                notes: fields.notes.clone(),
                romance: fields.romance,
                comedy: fields.comedy,
                action: fields.action,
                intimacy: fields.intimacy,
                violence: fields.violence,
                nudity: fields.nudity,
                seasons,
                episodes_watched: episodes,
                years,
            };
            let result = api.update(&key, &patch)?;
            print_messages(&result.messages);
            save_and_report(&api)
        }
        Some(Commands::Delete {
            title,
            year,
            series,
        }) => {
            let result = api.delete(&entry_key(&title, year, series))?;
            print_messages(&result.messages);
            save_and_report(&api)
        }
        Some(Commands::Stats) => {
            let result = api.stats()?;
            if let Some(stats) = &result.stats {
                print_stats(stats);
            }
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Save) => save_and_report(&api),
        Some(Commands::Backups { prune }) => {
            let result = api.backups(prune)?;
            for path in &result.backups {
                println!("{}", path.display());
            }
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Export { path }) => {
            let result = api.export(&path)?;
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Import { path, replace }) => {
            let result = api.import(&path, replace)?;
            print_messages(&result.messages);
            save_and_report(&api)
        }
        Some(Commands::Logs { lines }) => {
            print_log(&config.log_file_path(&base_dir), lines);
            Ok(())
        }
        None => {
            let result = api.list(&EntryFilter::default(), SortBy::Added)?;
            print_entries(&result.listed);
            print_messages(&result.messages);
            Ok(())
        }
    };

    tracing::info!("reelshelf exiting");
    outcome
}

fn resolve_base_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("REELSHELF_DATA") {
        return Ok(PathBuf::from(dir));
    }
    let proj_dirs = ProjectDirs::from("com", "reelshelf", "reelshelf")
        .ok_or_else(|| ShelfError::Api("could not determine a data directory".to_string()))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

/// Append-only file logging; stderr if the log file cannot be opened.
fn init_logging(config: &ShelfConfig, base_dir: &std::path::Path, verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));

    let log_path = config.log_file_path(base_dir);
    let file = std::fs::create_dir_all(base_dir)
        .ok()
        .and_then(|_| OpenOptions::new().create(true).append(true).open(&log_path).ok());

    match file {
        Some(file) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Arc::new(file))
            .init(),
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
    }
}

fn sort_by(field: SortField) -> SortBy {
    match field {
        SortField::Added => SortBy::Added,
        SortField::Title => SortBy::Title,
        SortField::Year => SortBy::Year,
        SortField::Rating => SortBy::Rating,
    }
}

fn entry_key(title: &str, year: i32, series: bool) -> EntryKey {
    let kind = if series {
        EntryKind::Series
    } else {
        EntryKind::Movie
    };
    EntryKey::new(title, year, kind)
}

fn movie_draft(title: String, year: i32, fields: &EntryFields) -> EntryDraft {
    let mut draft = EntryDraft::movie(title, year);
    apply_fields(&mut draft, fields);
    draft
}

fn series_draft(
    title: String,
    years: String,
    seasons: Option<i64>,
    episodes: Option<i64>,
    fields: &EntryFields,
) -> EntryDraft {
    let mut draft = EntryDraft::series(title, years);
    if let DraftKind::Series {
        seasons: s,
        episodes_watched: e,
        ..
    } = &mut draft.kind
    {
        *s = seasons.unwrap_or(0);
        *e = episodes.unwrap_or(0);
    }
    apply_fields(&mut draft, fields);
    draft
}

fn apply_fields(draft: &mut EntryDraft, fields: &EntryFields) {
    if let Some(genre) = &fields.genre {
        draft.genre = genre.clone();
    }
    if let Some(rating) = fields.rating {
        draft.rating = rating;
    }
    if fields.planned {
        draft.status = WatchStatus::PlanToWatch;
    }
    if let Some(notes) = &fields.notes {
        draft.notes = notes.clone();
    }
    draft.scores = DraftScores {
        romance: fields.romance.unwrap_or(0),
        comedy: fields.comedy.unwrap_or(0),
        action: fields.action.unwrap_or(0),
        intimacy: fields.intimacy.unwrap_or(0),
        violence: fields.violence.unwrap_or(0),
        nudity: fields.nudity.unwrap_or(0),
    };
}

fn handle_add(api: &mut ShelfApi, draft: EntryDraft) -> Result<()> {
    let result = api.add(&draft)?;
    print_messages(&result.messages);
    save_and_report(api)
}

fn save_and_report(api: &ShelfApi) -> Result<()> {
    let result = api.save()?;
    print_messages(&result.messages);
    Ok(())
}

fn print_log(path: &std::path::Path, lines: Option<usize>) {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => {
            println!("{}", "No log file found.".dimmed());
            return;
        }
    };
    match lines {
        Some(n) => {
            let all: Vec<&str> = content.lines().collect();
            for line in &all[all.len().saturating_sub(n)..] {
                println!("{}", line);
            }
        }
        None => print!("{}", content),
    }
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

const LINE_WIDTH: usize = 100;
const FAMILY_MARKER: &str = "✦";

fn print_entries(entries: &[Entry]) {
    if entries.is_empty() {
        return;
    }

    for entry in entries {
        let year_col = match entry.series() {
            Some(d) => format!("({})", d.years),
            None => format!("({})", entry.year),
        };
        let kind_col = format!("{:<6}", entry.kind().to_string());
        let rating_col = if entry.rating > 0.0 {
            format!("{:>4.1}", entry.rating)
        } else {
            "   -".to_string()
        };
        let family_col = if entry.family_friendly() {
            format!(" {}", FAMILY_MARKER)
        } else {
            "  ".to_string()
        };
        let status_col = match entry.status {
            WatchStatus::Watched => String::new(),
            WatchStatus::PlanToWatch => " (plan to watch)".to_string(),
        };

        let title_and_year = format!("{} {}", entry.title, year_col);
        let right = format!("{}  {}{}{}", kind_col, rating_col, family_col, status_col);
        let available = LINE_WIDTH.saturating_sub(right.width() + 4);
        let title_display = truncate_to_width(&title_and_year, available);
        let padding = available.saturating_sub(title_display.width());

        println!(
            "  {}{}  {}  {}{}{}",
            title_display.bold(),
            " ".repeat(padding),
            kind_col.dimmed(),
            rating_col,
            family_col.green(),
            status_col.yellow()
        );
        if !entry.genre.is_empty() && entry.genre != "Unknown" {
            println!("      {}", entry.genre.dimmed());
        }
        let warnings = entry.content_warnings();
        if !warnings.is_empty() {
            println!("      {}", warnings.join(", ").dimmed());
        }
    }
}

fn print_stats(stats: &CatalogStats) {
    println!("{}", "Catalog".bold());
    println!(
        "  {} movies, {} series ({} total)",
        stats.total_movies,
        stats.total_series,
        stats.total_items()
    );
    if stats.avg_movie_rating > 0.0 {
        println!("  Average movie rating:  {:.1}", stats.avg_movie_rating);
    }
    if stats.avg_series_rating > 0.0 {
        println!("  Average series rating: {:.1}", stats.avg_series_rating);
    }
    println!(
        "  Family friendly: {} movies, {} series",
        stats.family_friendly_movies, stats.family_friendly_series
    );

    if !stats.genres.is_empty() {
        let mut genres: Vec<_> = stats.genres.iter().collect();
        genres.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));
        println!("\n{}", "Top genres".bold());
        for (genre, count) in genres.into_iter().take(5) {
            println!("  {:<20} {}", genre, count);
        }
    }

    println!("\n{}", "Content scores".bold());
    for (dim, label) in SCORE_DIMENSIONS.iter().enumerate() {
        let histogram = stats.score_histogram[dim];
        let rendered: Vec<String> = histogram
            .iter()
            .enumerate()
            .map(|(score, count)| format!("{}:{}", score, count))
            .collect();
        println!("  {:<10} {}", label, rendered.join("  ").dimmed());
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}
