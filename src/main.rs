use clap::{Parser, Subcommand};
use imdbapi_client::{
    ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS, ImdbClient, Movie, MovieType,
    SearchByIdParameters, SearchByTitleParameters, SearchEvent, SharedOptions, Verbosity,
};
use std::process;
use tracing_subscriber::EnvFilter;

/// Look up movies on imdbapi.org
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Request timeout in milliseconds (negative values mean no timeout)
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_MS as i64, allow_negative_numbers = true)]
    timeout_ms: i64,

    /// Service endpoint
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Request the full plot, aka and release representations
    #[arg(long, global = true)]
    full: bool,

    /// Leave episodes out of the results
    #[arg(long, global = true)]
    no_episodes: bool,

    /// Print movies as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Look up a single movie by IMDb identifier (e.g. tt1375666)
    Id { movie_id: String },

    /// Search movies by title
    Title {
        title: String,

        /// Only match titles released in this year
        #[arg(long)]
        year: Option<i32>,

        /// Title type code: M, TV, TVS, V or VG
        #[arg(long = "type", default_value = "none")]
        movie_type: String,

        /// Index of the first result
        #[arg(long, default_value_t = 0)]
        offset: u32,

        /// Maximum number of results
        #[arg(long, default_value_t = 1)]
        limit: u32,

        /// Fetch every page of results (ignores --offset and --limit)
        #[arg(long)]
        all: bool,
    },
}

/// Handles progress events and prints formatted output to stderr
fn handle_search_event(event: SearchEvent) {
    match event {
        SearchEvent::PageFetched {
            offset,
            count,
            total,
        } => {
            eprintln!("Fetched {} result(s) at offset {} of {}", count, offset, total);
        }
    }
}

fn print_movie(movie: &Movie) {
    println!(
        "{} ({}) [{}]",
        movie.title.as_deref().unwrap_or("<untitled>"),
        movie.year(),
        movie.id.as_deref().unwrap_or("-")
    );
    println!("  Rating: {:.1} ({} votes)", movie.rating, movie.vote_count.unwrap_or(0));
    if !movie.genres.is_empty() {
        println!("  Genres: {}", movie.genres.join(", "));
    }
    if !movie.directors.is_empty() {
        println!("  Directors: {}", movie.directors.join(", "));
    }
    if !movie.runtimes_minutes.is_empty() {
        let runtimes: Vec<_> = movie
            .runtimes_minutes
            .iter()
            .map(|m| format!("{} min", m))
            .collect();
        println!("  Runtime: {}", runtimes.join(", "));
    }
    if let Some(plot) = &movie.plot {
        println!("  Plot: {}", plot);
    }
    println!();
}

fn print_movies(movies: &[Movie], json: bool) {
    if json {
        match serde_json::to_string_pretty(movies) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: failed to serialize movies: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    if movies.is_empty() {
        println!("No movies found.");
        return;
    }
    for movie in movies {
        print_movie(movie);
    }
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::default()
        .with_timeout_millis(cli.timeout_ms)
        .with_base_url(cli.base_url);

    let client = match ImdbClient::with_config(config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let verbosity = if cli.full {
        Verbosity::Full
    } else {
        Verbosity::Simple
    };
    let options = SharedOptions {
        plot: verbosity,
        aka: verbosity,
        release: verbosity,
        include_episodes: !cli.no_episodes,
    };

    let result = match cli.command {
        Command::Id { movie_id } => {
            let mut params = SearchByIdParameters::new(movie_id);
            params.options = options;
            client.search_by_id(&params).map(|movie| vec![movie])
        }
        Command::Title {
            title,
            year,
            movie_type,
            offset,
            limit,
            all,
        } => {
            let mut params = SearchByTitleParameters::new(title)
                .movie_type(MovieType::from_code(&movie_type))
                .offset(offset)
                .limit(limit);
            if let Some(year) = year {
                params = params.year(year);
            }
            params.options = options;

            if all {
                client.full_search_by_title_with_progress(&params, handle_search_event)
            } else {
                client.search_by_title(&params)
            }
        }
    };

    match result {
        Ok(movies) => print_movies(&movies, cli.json),
        Err(e) => {
            eprintln!("Error: {} (code {})", e, e.status().code());
            process::exit(1);
        }
    }
}
