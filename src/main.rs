// src/main.rs
//
// movie-explorer command line front-end
//
// Wires the application once (storage, gateway, event bus, services) and
// runs a single command against it, printing the resulting DTO as JSON.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use movie_explorer::application::commands::*;
use movie_explorer::application::state::AppState;
use movie_explorer::config::AppConfig;
use movie_explorer::db::{create_connection_pool, initialize_database, verify_database_integrity};
use movie_explorer::events::{EventBus, FeedLoadFailed};
use movie_explorer::integrations::{ImageUrls, MovieGateway, TmdbClient, UnavailableGateway};
use movie_explorer::repositories::{KeyValueStore, SqliteKeyValueStore};
use movie_explorer::services::{AuthService, MovieCollectionStore, ThemeService};

#[derive(Parser)]
#[command(name = "movie-explorer")]
#[command(about = "Browse trending movies, search, and keep a list of favorites")]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// This week's trending movies
    Trending {
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Keep loading following pages until this many are accumulated
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    /// Search by title; without a query the previous search is repeated
    Search {
        query: Option<String>,
        #[arg(long)]
        genre: Option<i64>,
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        min_rating: Option<f64>,
        /// popularity, rating, release_date or title
        #[arg(long)]
        sort: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    /// Full record for one movie
    Detail { id: i64 },
    /// Provider genre list
    Genres,
    /// Add or remove a movie from favorites
    Favorite { id: i64 },
    /// List favorites
    Favorites,
    /// Show the theme, or switch it with --toggle
    Theme {
        #[arg(long, default_value_t = false)]
        toggle: bool,
    },
    Login { username: String, password: String },
    Logout,
    /// Current session
    Whoami,
}

fn default_log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_level(verbose)));

    // stdout carries command output; logs go to stderr
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<AppConfig> {
    match path {
        Some(path) => {
            let mut config = AppConfig::load(path)?;
            config.apply_env_overrides(|key| std::env::var(key).ok());
            Ok(config)
        }
        None => Ok(AppConfig::from_env()),
    }
}

fn build_state(config: &AppConfig) -> anyhow::Result<AppState> {
    // 1. STORAGE
    let db_path = config.storage.resolve_database_path()?;
    let pool = Arc::new(
        create_connection_pool(&db_path)
            .with_context(|| format!("opening database at {}", db_path.display()))?,
    );
    {
        let conn = pool.get()?;
        initialize_database(&conn)?;
        verify_database_integrity(&conn)?;
    }
    let storage: Arc<dyn KeyValueStore> = Arc::new(SqliteKeyValueStore::new(pool));

    // 2. GATEWAY
    let gateway: Arc<dyn MovieGateway> = match TmdbClient::new(&config.tmdb) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            tracing::warn!("Movie provider unavailable: {}", e);
            Arc::new(UnavailableGateway::new(e.to_string()))
        }
    };

    // 3. EVENTS
    let event_bus = Arc::new(EventBus::new());
    event_bus.subscribe::<FeedLoadFailed, _>(|event| {
        tracing::debug!(feed = %event.feed, page = event.page, "feed load failed");
    });

    // 4. SERVICES
    let collection_store = Arc::new(MovieCollectionStore::new(
        gateway,
        storage.clone(),
        event_bus.clone(),
    ));
    let theme_service = Arc::new(ThemeService::new(
        storage.clone(),
        event_bus.clone(),
        &config.appearance,
    ));
    let auth_service = Arc::new(AuthService::new(storage, event_bus.clone()));

    // 5. APPLICATION STATE
    Ok(AppState {
        event_bus,
        collection_store,
        theme_service,
        auth_service,
        images: ImageUrls::new(config.tmdb.image_base_url.clone()),
    })
}

async fn run(state: &AppState, command: Commands) -> Result<serde_json::Value, String> {
    match command {
        Commands::Trending { page, pages } => {
            let mut result = load_trending(state, Some(page)).await?;
            for _ in 1..pages {
                if !result.feed.has_more {
                    break;
                }
                result = load_more_trending(state).await?;
            }
            to_json(&result)
        }
        Commands::Search {
            query,
            genre,
            year,
            min_rating,
            sort,
            page,
            pages,
        } => {
            let mut result = match query {
                Some(query) => {
                    let request = SearchRequestDto {
                        query,
                        genre,
                        year,
                        min_rating,
                        sort,
                        page: Some(page),
                    };
                    search_movies(state, request).await?
                }
                None => resume_last_search(state).await?,
            };
            for _ in 1..pages {
                if !result.feed.has_more {
                    break;
                }
                result = load_more_search(state).await?;
            }
            to_json(&result)
        }
        Commands::Detail { id } => to_json(&get_movie_detail(state, id).await?),
        Commands::Genres => to_json(&list_genres(state).await?),
        Commands::Favorite { id } => to_json(&toggle_favorite_by_id(state, id).await?),
        Commands::Favorites => to_json(&list_favorites(state).await?),
        Commands::Theme { toggle } => {
            let theme = if toggle {
                toggle_theme(state).await?
            } else {
                get_theme(state).await?
            };
            to_json(&theme)
        }
        Commands::Login { username, password } => {
            to_json(&login(state, &username, &password).await?)
        }
        Commands::Logout => to_json(&logout(state).await?),
        Commands::Whoami => to_json(&get_session(state).await?),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<serde_json::Value, String> {
    serde_json::to_value(value).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_ref())?;
    let state = build_state(&config)?;
    tracing::info!("movie-explorer ready");

    match run(&state, cli.command).await {
        Ok(output) => {
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            eprintln!("{}", error);
            Ok(ExitCode::FAILURE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_level_follows_verbosity() {
        assert_eq!(default_log_level(0), "info");
        assert_eq!(default_log_level(1), "debug");
        assert_eq!(default_log_level(3), "trace");
    }

    #[test]
    fn test_cli_parses_search_options() {
        let cli = Cli::try_parse_from([
            "movie-explorer",
            "-v",
            "search",
            "heat",
            "--year",
            "1995",
            "--pages",
            "2",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Search {
                query, year, pages, ..
            } => {
                assert_eq!(query.as_deref(), Some("heat"));
                assert_eq!(year, Some(1995));
                assert_eq!(pages, 2);
            }
            _ => panic!("expected search"),
        }
    }
}
